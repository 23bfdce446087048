use anyhow::Result;
use tracing::warn;

use crate::clock::{format_timestamp, Clock, TIMESTAMP_FORMAT};
use crate::model::{Filter, Task, NEVER_EDITED};
use crate::storage::{Storage, TODOS_KEY};

/// Counts derived from the collection for the listing footer. Recomputed
/// on demand, never stored.
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// The authoritative ordered task collection. Every mutation rewrites the
/// full snapshot to the storage slot before returning.
pub struct Store {
    tasks: Vec<Task>,
    storage: Storage,
    clock: Box<dyn Clock>,
}

impl Store {
    /// Load the persisted snapshot. An absent or unreadable snapshot
    /// yields an empty list rather than an error.
    pub fn open(storage: Storage, clock: Box<dyn Clock>) -> Result<Store> {
        let raw = match storage.read(TODOS_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Could not read the task snapshot: {:#}", err);
                None
            }
        };
        let tasks = match raw {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Discarding an unreadable task snapshot: {}", err);
                Vec::new()
            }),
            None => Vec::new(),
        };
        Ok(Store {
            tasks,
            storage,
            clock,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The tasks visible under a filter, in insertion order.
    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn counts(&self) -> Counts {
        let active = self.tasks.iter().filter(|task| task.active).count();
        Counts {
            total: self.tasks.len(),
            active,
            inactive: self.tasks.len() - active,
        }
    }

    /// Append a new active task and return its id. Title validation is the
    /// caller's business, not the store's.
    pub fn add(&mut self, title: &str) -> String {
        let now = self.clock.now();
        let id = self.fresh_id(now.timestamp_millis());
        self.tasks.push(Task {
            id: id.clone(),
            title: title.to_string(),
            active: true,
            created_time: format_timestamp(now, TIMESTAMP_FORMAT),
            edited_time: NEVER_EDITED.to_string(),
        });
        self.persist();
        id
    }

    /// Remove the task with the given id. A missing id is a no-op, not an
    /// error. Returns whether a task was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.persist();
        removed
    }

    /// Flip the active flag of the task with the given id and refresh its
    /// edited time. A missing id is a no-op. Returns whether a task matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.active = !task.active;
                task.edited_time = format_timestamp(now, TIMESTAMP_FORMAT);
                true
            }
            None => false,
        };
        self.persist();
        found
    }

    /// Replace the title of the task with the given id and refresh its
    /// edited time. A missing id is a no-op. Returns whether a task matched.
    pub fn edit(&mut self, id: &str, title: &str) -> bool {
        let now = self.clock.now();
        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.title = title.to_string();
                task.edited_time = format_timestamp(now, TIMESTAMP_FORMAT);
                true
            }
            None => false,
        };
        self.persist();
        found
    }

    /// Ids come from the clock's millisecond reading; bump until unique so
    /// two adds within the same millisecond cannot collide.
    fn fresh_id(&self, millis: i64) -> String {
        let mut millis = millis;
        let mut candidate = millis.to_string();
        while self.tasks.iter().any(|task| task.id == candidate) {
            millis += 1;
            candidate = millis.to_string();
        }
        candidate
    }

    /// Serialize the whole collection into the slot. A write failure is
    /// logged and swallowed; the in-memory mutation stands.
    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.tasks) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("Failed to encode the task snapshot: {}", err);
                return;
            }
        };
        if let Err(err) = self.storage.write(TODOS_KEY, &encoded) {
            warn!("Failed to persist the task snapshot: {:#}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::StepClock;

    fn empty_store() -> Store {
        let storage = Storage::in_memory().unwrap();
        Store::open(storage, Box::new(StepClock::new())).unwrap()
    }

    #[test]
    fn add_appends_an_active_task() {
        let mut store = empty_store();
        store.add("buy milk");

        assert_eq!(store.tasks().len(), 1);
        let task = &store.tasks()[0];
        assert!(task.active);
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.edited_time, NEVER_EDITED);
        assert!(!task.created_time.is_empty());
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let mut store = empty_store();
        let first = store.add("one");
        let second = store.add("two");
        assert_ne!(first, second);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = empty_store();
        let id = store.add("ephemeral");

        assert!(store.remove(&id));
        assert_eq!(store.tasks().len(), 0);
        assert!(!store.remove(&id));
        assert_eq!(store.tasks().len(), 0);
    }

    #[test]
    fn toggle_round_trips_and_orders_edited_times() {
        let mut store = empty_store();
        let id = store.add("flip me");

        store.toggle(&id);
        assert!(!store.tasks()[0].active);
        let first_edit = store.tasks()[0].edited_time.clone();

        store.toggle(&id);
        assert!(store.tasks()[0].active);
        let second_edit = store.tasks()[0].edited_time.clone();

        assert_ne!(first_edit, NEVER_EDITED);
        assert!(second_edit >= first_edit);
    }

    #[test]
    fn edit_changes_title_but_preserves_identity() {
        let mut store = empty_store();
        let id = store.add("old title");
        let created = store.tasks()[0].created_time.clone();

        assert!(store.edit(&id, "new title"));

        let task = &store.tasks()[0];
        assert_eq!(task.title, "new title");
        assert_eq!(task.id, id);
        assert_eq!(task.created_time, created);
        assert_ne!(task.edited_time, NEVER_EDITED);
    }

    #[test]
    fn toggle_and_edit_of_missing_ids_change_nothing() {
        let mut store = empty_store();
        store.add("only one");
        let snapshot = store.tasks().to_vec();

        assert!(!store.toggle("no-such-id"));
        assert!(!store.edit("no-such-id", "new title"));
        assert_eq!(store.tasks(), snapshot.as_slice());
    }

    #[test]
    fn filters_partition_the_collection() {
        let mut store = empty_store();
        store.add("first");
        let done = store.add("second");
        store.add("third");
        store.toggle(&done);

        let all: Vec<&str> = store
            .filtered(Filter::All)
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(all, vec!["first", "second", "third"]);

        let active: Vec<&str> = store
            .filtered(Filter::Active)
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(active, vec!["first", "third"]);

        let inactive: Vec<&str> = store
            .filtered(Filter::Inactive)
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(inactive, vec!["second"]);

        let counts = store.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.inactive, 1);
    }

    #[test]
    fn snapshot_round_trips_through_the_journal_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.sqlite");

        let mut store =
            Store::open(Storage::open(&path).unwrap(), Box::new(StepClock::new())).unwrap();
        store.add("keep me");
        let toggled = store.add("flip me");
        store.toggle(&toggled);
        let written = store.tasks().to_vec();
        drop(store);

        let reloaded =
            Store::open(Storage::open(&path).unwrap(), Box::new(StepClock::new())).unwrap();
        assert_eq!(reloaded.tasks(), written.as_slice());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_an_empty_list() {
        let storage = Storage::in_memory().unwrap();
        storage.write(TODOS_KEY, "this is not json").unwrap();
        let store = Store::open(storage, Box::new(StepClock::new())).unwrap();
        assert!(store.tasks().is_empty());
    }
}
