//! Ordered task collection and its mutation/query operations.
//!
//! # Responsibility
//! - Own the task sequence, the monotonic id counter, and all CRUD paths.
//! - Enforce title validation before any title reaches storage.
//!
//! # Invariants
//! - Ids are assigned strictly increasing and never reused after delete.
//! - `reorder` always produces a permutation of the existing tasks.
//! - Every fallible operation is atomic: on error the store is untouched.

use crate::model::task::{normalize_title, Task, TaskId, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store mutation and lookup operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "no task with id {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Aggregate counters returned by [`TaskStore::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
}

/// Ordered, in-memory task collection with a monotonic id counter.
///
/// The sequence order is the display order the user curates via `reorder`;
/// it is unrelated to id assignment order.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store with the id counter at 1.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from persisted parts.
    ///
    /// The counter is clamped so a stale snapshot can never re-issue an id
    /// that is still live in `tasks`.
    pub fn from_parts(next_id: TaskId, tasks: Vec<Task>) -> Self {
        let min_next = tasks.iter().map(|t| t.id + 1).max().unwrap_or(1);
        Self {
            next_id: next_id.max(min_next).max(1),
            tasks,
        }
    }

    /// Adds a pending task at the end of the sequence.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the title trims to empty.
    pub fn add(&mut self, title: &str) -> StoreResult<Task> {
        let title = normalize_title(title)?;
        let task = Task::new(self.next_id, title);
        self.next_id += 1;
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Returns task clones in store order.
    ///
    /// With `include_done == false` only pending tasks are returned. The
    /// result is a snapshot; mutating it does not touch the store.
    pub fn list(&self, include_done: bool) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| include_done || !t.done)
            .cloned()
            .collect()
    }

    /// Gets one task by id.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no task has that id.
    pub fn get(&self, id: TaskId) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn get_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Sets the completion flag and returns the updated task.
    pub fn complete(&mut self, id: TaskId, done: bool) -> StoreResult<Task> {
        let task = self.get_mut(id)?;
        task.done = done;
        Ok(task.clone())
    }

    /// Replaces a task title and returns the updated task.
    ///
    /// The new title is validated before the lookup, so a blank title fails
    /// the same way whether or not the id exists.
    pub fn rename(&mut self, id: TaskId, new_title: &str) -> StoreResult<Task> {
        let title = normalize_title(new_title)?;
        let task = self.get_mut(id)?;
        task.title = title;
        Ok(task.clone())
    }

    /// Removes a task from the sequence and returns it.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Drops every completed task, keeping pending order, and returns the
    /// removed count.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        before - self.tasks.len()
    }

    /// Case-insensitive substring search over titles, store order preserved.
    ///
    /// `done_filter` additionally restricts matches to tasks whose `done`
    /// flag equals it.
    pub fn search(&self, query: &str, done_filter: Option<bool>) -> Vec<Task> {
        let needle = query.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|t| done_filter.map_or(true, |done| t.done == done))
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Applies a total reordering of the sequence.
    ///
    /// Ids listed in `ids_in_order` come first, in the given order; the
    /// first occurrence of a duplicate wins and unknown ids are dropped.
    /// Every task not mentioned keeps its prior relative order at the end,
    /// so the result is always a permutation of the current tasks.
    pub fn reorder(&mut self, ids_in_order: &[TaskId]) {
        let mut picked: HashSet<TaskId> = HashSet::new();
        let mut reordered = Vec::with_capacity(self.tasks.len());
        for &id in ids_in_order {
            if picked.contains(&id) {
                continue;
            }
            if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                reordered.push(task.clone());
                picked.insert(id);
            }
        }
        for task in &self.tasks {
            if !picked.contains(&task.id) {
                reordered.push(task.clone());
            }
        }
        self.tasks = reordered;
    }

    /// Returns total/done/pending counters.
    pub fn stats(&self) -> StoreStats {
        let total = self.tasks.len();
        let done = self.tasks.iter().filter(|t| t.done).count();
        StoreStats {
            total,
            done,
            pending: total - done,
        }
    }

    /// Current sequence, in store order. Used by snapshot persistence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Next id the store would assign. Used by snapshot persistence.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }
}
