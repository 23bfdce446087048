#[macro_use]
extern crate prettytable;

use anyhow::anyhow;
use directories::ProjectDirs;
use std::path::PathBuf;
use structopt::StructOpt;

mod cli;
mod clock;
mod interface;
mod model;
mod storage;
mod store;

use cli::{Command::*, CommandLineArgs};
use clock::SystemClock;
use storage::Storage;
use store::Store;

fn find_default_journal_file() -> Option<PathBuf> {
    if let Some(base_dirs) = ProjectDirs::from("com", "gozque", "vazifa") {
        let root_dir = base_dirs.data_dir();
        std::fs::create_dir_all(root_dir).ok()?;
        let mut path = PathBuf::from(root_dir);
        path.push("journal.sqlite");
        Some(path)
    } else {
        None
    }
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // Get the command-line arguments.
    let CommandLineArgs {
        action,
        journal_file,
    } = CommandLineArgs::from_args();

    // Unpack the journal file.
    let journal_file = journal_file
        .or_else(find_default_journal_file)
        .ok_or(anyhow!("Failed to find journal file."))?;

    let storage = Storage::open(&journal_file)?;
    let mut store = Store::open(storage, Box::new(SystemClock))?;

    // Perform the action.
    match action {
        Add { title } => interface::add_task(&mut store, &title),
        Rm { id } => interface::remove_task(&mut store, &id),
        Toggle { id } => interface::toggle_task(&mut store, &id),
        Edit { id, title } => interface::edit_task(&mut store, &id, &title),
        List { filter } => interface::list(&store, filter),
    }?;
    Ok(())
}
