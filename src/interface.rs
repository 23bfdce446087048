use anyhow::Result;
use prettytable::Table;
use textwrap::fill;

use crate::model::Filter;
use crate::store::Store;

/// Column width for task titles in the listing.
const TITLE_WIDTH: usize = 48;

/// Add a task. A title that is empty once trimmed is rejected without
/// touching the collection.
pub fn add_task(store: &mut Store, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        println!("Nothing to add: the task title is empty.");
        return Ok(());
    }
    let id = store.add(title);
    println!("Added task {}.", id);
    Ok(())
}

pub fn remove_task(store: &mut Store, id: &str) -> Result<()> {
    if store.remove(id) {
        println!("Removed task {}.", id);
    } else {
        println!("No task with id {}.", id);
    }
    Ok(())
}

pub fn toggle_task(store: &mut Store, id: &str) -> Result<()> {
    if store.toggle(id) {
        let task = store
            .tasks()
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.active);
        match task {
            Some(true) => println!("Task {} is active again.", id),
            _ => println!("Task {} is done.", id),
        }
    } else {
        println!("No task with id {}.", id);
    }
    Ok(())
}

pub fn edit_task(store: &mut Store, id: &str, title: &str) -> Result<()> {
    if store.edit(id, title) {
        println!("Updated task {}.", id);
    } else {
        println!("No task with id {}.", id);
    }
    Ok(())
}

/// Render the collection under the given filter, with the derived counts
/// as a footer.
pub fn list(store: &Store, filter: Filter) -> Result<()> {
    let mut table = Table::new();

    table.add_row(row!["id", "status", "task", "created", "edited"]);
    for task in store.filtered(filter) {
        table.add_row(row![
            task.id,
            if task.active { "active" } else { "done" },
            fill(&task.title, TITLE_WIDTH),
            task.created_time,
            task.edited_time
        ]);
    }

    table.printstd();

    let counts = store.counts();
    println!(
        "{} tasks: {} active, {} done.",
        counts.total, counts.active, counts.inactive
    );
    Ok(())
}
