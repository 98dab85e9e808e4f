//! Command-line surface for the LazyTask store.
//!
//! # Responsibility
//! - Map one subcommand invocation onto exactly one store operation.
//! - Own the load -> run -> save process sequencing and user-facing output.
//!
//! # Invariants
//! - Store errors are printed, never turned into a non-zero exit.
//! - A save failure warns but does not undo the completed command.

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use lazytask_core::{
    default_log_level, init_logging, snapshot, StoreResult, Task, TaskId, TaskStore,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lazytask", about = "JSON-persistent task list CLI", version)]
struct Args {
    /// Path to the JSON snapshot file
    #[arg(long, global = true, env = "LAZYTASK_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LAZYTASK_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task
    Add {
        title: String,
    },
    /// List tasks
    List {
        /// Show only pending tasks
        #[arg(long)]
        pending: bool,
    },
    /// Mark a task as done
    Done {
        #[arg(value_parser = clap::value_parser!(TaskId).range(1..))]
        id: TaskId,
    },
    /// Mark a task as not done
    Undone {
        #[arg(value_parser = clap::value_parser!(TaskId).range(1..))]
        id: TaskId,
    },
    /// Delete a task
    Delete {
        #[arg(value_parser = clap::value_parser!(TaskId).range(1..))]
        id: TaskId,
    },
    /// Delete all completed tasks
    Clear,
    /// Search task titles
    Search {
        query: String,
        /// Search across all tasks (not only pending)
        #[arg(long)]
        all: bool,
    },
    /// Rename a task
    Rename {
        #[arg(value_parser = clap::value_parser!(TaskId).range(1..))]
        id: TaskId,
        title: String,
    },
    /// Show stats
    Stats,
    /// Reorder by comma-separated ids, e.g. 3,1,2
    Reorder {
        ids: String,
    },
}

fn main() {
    let args = Args::parse();
    let data_path = args.data_path.clone().unwrap_or_else(default_data_path);

    let level = args
        .log
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir_for(&data_path)) {
        eprintln!("Warning: logging unavailable: {err}");
    }

    let mut store = snapshot::load(&data_path);

    if let Err(err) = run_command(&mut store, &args.command) {
        println!("Error: {err}");
    }

    if let Err(err) = snapshot::save(&data_path, &store) {
        println!("Warning: could not save tasks: {err}");
    }
}

fn run_command(store: &mut TaskStore, command: &Command) -> StoreResult<()> {
    match command {
        Command::Add { title } => {
            let task = store.add(title)?;
            println!("Added: {task}");
        }
        Command::List { pending } => {
            print_tasks(&store.list(!pending), "No tasks.");
        }
        Command::Done { id } => {
            let task = store.complete(*id, true)?;
            println!("Marked done: {task}");
        }
        Command::Undone { id } => {
            let task = store.complete(*id, false)?;
            println!("Marked undone: {task}");
        }
        Command::Delete { id } => {
            let task = store.delete(*id)?;
            println!("Deleted: {task}");
        }
        Command::Clear => {
            let removed = store.clear_completed();
            println!("Removed {removed} completed task(s).");
        }
        Command::Search { query, all } => {
            let done_filter = if *all { None } else { Some(false) };
            print_tasks(&store.search(query, done_filter), "No matches.");
        }
        Command::Rename { id, title } => {
            let task = store.rename(*id, title)?;
            println!("Renamed: {task}");
        }
        Command::Stats => {
            let stats = store.stats();
            println!(
                "Total: {} | Done: {} | Pending: {}",
                stats.total, stats.done, stats.pending
            );
        }
        Command::Reorder { ids } => {
            store.reorder(&parse_reorder_ids(ids));
            println!("Order updated.");
            print_tasks(&store.list(true), "No tasks.");
        }
    }
    Ok(())
}

fn print_tasks(tasks: &[Task], empty_message: &str) {
    if tasks.is_empty() {
        println!("{empty_message}");
        return;
    }
    for task in tasks {
        println!("{task}");
    }
}

/// Parses the `reorder` id list: comma-separated, whitespace tolerated.
/// Tokens that are not positive integers are dropped, matching the loose
/// input contract of the command (unknown ids are dropped later anyway).
fn parse_reorder_ids(raw: &str) -> Vec<TaskId> {
    raw.split(',')
        .filter_map(|token| token.trim().parse::<TaskId>().ok())
        .filter(|&id| id > 0)
        .collect()
}

fn default_data_path() -> PathBuf {
    ProjectDirs::from("", "", "lazytask")
        .map(|dirs| dirs.data_dir().join("tasks.json"))
        .unwrap_or_else(|| PathBuf::from("tasks.json"))
}

/// Log directory next to the snapshot file, absolutized for the logger.
fn log_dir_for(data_path: &Path) -> PathBuf {
    let base = data_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let dir = base.join("logs");
    if dir.is_absolute() {
        dir
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or(dir)
    }
}
