use crate::model::Filter;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Add a new task to the list.
    Add {
        /// The task title text.
        #[structopt()]
        title: String,
    },
    /// Remove a task by id.
    Rm {
        #[structopt()]
        id: String,
    },
    /// Flip a task between active and done.
    Toggle {
        #[structopt()]
        id: String,
    },
    /// Replace the title of a task.
    Edit {
        #[structopt()]
        id: String,

        /// The new title text.
        #[structopt()]
        title: String,
    },
    /// Show the task list.
    List {
        /// Restrict the listing: all, active or inactive.
        #[structopt(short, long, default_value = "all")]
        filter: Filter,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(name = "Vazifa", about = "A tiny persistent todo list.")]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Use a different journal file.
    #[structopt(parse(from_os_str), short, long)]
    pub journal_file: Option<PathBuf>,
}
