use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Sentinel shown in the edited column until a task is first toggled or
/// edited.
pub const NEVER_EDITED: &str = "—";

/// A single todo item. The persisted JSON keeps the camelCase field names
/// so that snapshots written by the original web app stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// True while the task is still to be done.
    pub active: bool,
    pub created_time: String,
    pub edited_time: String,
}

/// The three display filters. A view concern only; the filter is never
/// persisted and never touches the collection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Inactive,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => task.active,
            Filter::Inactive => !task.active,
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Filter, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "inactive" => Ok(Filter::Inactive),
            other => Err(anyhow!(
                "Unknown filter '{}', expected all, active or inactive.",
                other
            )),
        }
    }
}
