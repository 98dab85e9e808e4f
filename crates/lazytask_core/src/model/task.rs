//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its terminal display form.
//! - Provide the title validation used by store mutations.
//!
//! # Invariants
//! - `id` is positive and never reused for another task.
//! - `created_at` is captured once at creation and immutable afterwards.

use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task within one store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = u64;

/// Timestamp format used when rendering a task line.
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Validation failure for task title input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Trims a raw title and rejects empty results.
///
/// All write paths (add/rename) must go through this before a title is
/// stored, so the non-empty invariant holds everywhere.
pub fn normalize_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Positive id, assigned monotonically by the owning store.
    pub id: TaskId,
    /// Trimmed, non-empty text.
    pub title: String,
    /// Completion flag.
    pub done: bool,
    /// Creation wall-clock time; immutable after creation.
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Creates a pending task stamped with the current local time.
    ///
    /// Callers must pass an already-normalized title; the store is the
    /// validation boundary.
    pub fn new(id: TaskId, title: String) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at: Local::now().naive_local(),
        }
    }

    /// Glyph used for the completion column in terminal output.
    pub fn status_marker(&self) -> char {
        if self.done {
            '✓'
        } else {
            '•'
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] #{} {}  ({})",
            self.status_marker(),
            self.id,
            self.title,
            self.created_at.format(DISPLAY_TIMESTAMP_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Task, TaskValidationError};
    use chrono::NaiveDate;

    #[test]
    fn normalize_title_trims_surrounding_whitespace() {
        let title = normalize_title("  buy milk \n").expect("title should normalize");
        assert_eq!(title, "buy milk");
    }

    #[test]
    fn normalize_title_rejects_whitespace_only_input() {
        let err = normalize_title(" \t ").expect_err("whitespace-only must be rejected");
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }

    #[test]
    fn display_line_uses_marker_id_title_and_minute_timestamp() {
        let mut task = Task::new(7, "Buy laptop".to_string());
        task.created_at = NaiveDate::from_ymd_opt(2026, 8, 6)
            .expect("valid date")
            .and_hms_opt(10, 30, 59)
            .expect("valid time");
        assert_eq!(task.to_string(), "[•] #7 Buy laptop  (2026-08-06 10:30)");

        task.done = true;
        assert_eq!(task.to_string(), "[✓] #7 Buy laptop  (2026-08-06 10:30)");
    }
}
