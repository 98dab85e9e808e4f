//! JSON snapshot persistence for the task store.
//!
//! # Responsibility
//! - Serialize the full store state (task sequence + id counter) to disk.
//! - Restore a store from a snapshot without ever failing the caller.
//!
//! # Invariants
//! - Writes go through a temp sibling and an atomic rename, so a reader
//!   never observes a half-written snapshot.
//! - A missing or corrupt snapshot degrades to a fresh empty store; task
//!   data is low-stakes and load must not lock the user out of the tool.

use crate::model::task::{Task, TaskId};
use crate::store::task_store::TaskStore;
use chrono::{Local, NaiveDateTime};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

/// Second-precision ISO-8601 format used inside persisted snapshots.
const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Error for snapshot save operations.
///
/// Loading has no error type: restore failures are resolved to a fresh
/// store by policy.
#[derive(Debug)]
pub enum SnapshotError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Wire shape of the snapshot file.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    next_id: TaskId,
    tasks: Vec<TaskRecord>,
}

/// Wire shape of one persisted task.
///
/// `created_at` stays a raw string on the way in so one bad timestamp
/// cannot fail the whole load; restore falls back per field instead.
#[derive(Debug, Serialize, Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    done: bool,
    #[serde(default)]
    created_at: Option<String>,
}

fn task_to_record(task: &Task) -> TaskRecord {
    TaskRecord {
        id: task.id,
        title: task.title.clone(),
        done: task.done,
        created_at: Some(task.created_at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string()),
    }
}

fn task_from_record(record: TaskRecord) -> Task {
    let created_at = record
        .created_at
        .as_deref()
        .and_then(|raw| NaiveDateTime::parse_from_str(raw, SNAPSHOT_TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(|| Local::now().naive_local());
    Task {
        id: record.id,
        title: record.title,
        done: record.done,
        created_at,
    }
}

/// Restores a store from `path`.
///
/// # Contract
/// - Missing file: empty store with the counter at 1; not an error.
/// - Unreadable or structurally invalid file: the corrupt state is
///   discarded and a fresh empty store is returned (deliberate policy).
/// - A task with an absent or unparsable timestamp is kept with its
///   `created_at` reset to the current time.
///
/// # Side effects
/// - Emits `snapshot_load` logging events with duration and status.
pub fn load(path: impl AsRef<Path>) -> TaskStore {
    let path = path.as_ref();
    let started_at = Instant::now();

    if !path.exists() {
        info!(
            "event=snapshot_load module=snapshot status=ok mode=fresh reason=missing_file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        return TaskStore::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=snapshot_load module=snapshot status=fallback error_code=unreadable_snapshot duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return TaskStore::new();
        }
    };

    let file: SnapshotFile = match serde_json::from_str(&raw) {
        Ok(file) => file,
        Err(err) => {
            warn!(
                "event=snapshot_load module=snapshot status=fallback error_code=corrupt_snapshot duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return TaskStore::new();
        }
    };

    let tasks = file.tasks.into_iter().map(task_from_record).collect();
    let store = TaskStore::from_parts(file.next_id, tasks);
    info!(
        "event=snapshot_load module=snapshot status=ok mode=file task_count={} duration_ms={}",
        store.tasks().len(),
        started_at.elapsed().as_millis()
    );
    store
}

/// Persists the full store state to `path`.
///
/// Parent directories are created as needed. The payload is written to a
/// `.json.tmp` sibling first and renamed over the destination, so partial
/// writes never corrupt an existing snapshot.
///
/// # Errors
/// - `SnapshotError::Serialize` when encoding fails.
/// - `SnapshotError::Io` when the directory, temp write, or rename fails.
///
/// # Side effects
/// - Emits `snapshot_save` logging events with duration and status.
pub fn save(path: impl AsRef<Path>, store: &TaskStore) -> SnapshotResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    match write_snapshot(path, store) {
        Ok(()) => {
            info!(
                "event=snapshot_save module=snapshot status=ok task_count={} duration_ms={}",
                store.tasks().len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=snapshot_save module=snapshot status=error error_code=snapshot_write_failed duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn write_snapshot(path: &Path, store: &TaskStore) -> SnapshotResult<()> {
    let file = SnapshotFile {
        next_id: store.next_id(),
        tasks: store.tasks().iter().map(task_to_record).collect(),
    };
    let payload = serde_json::to_string_pretty(&file)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
