//! Core domain logic for LazyTask.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod snapshot;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use snapshot::{SnapshotError, SnapshotResult};
pub use store::task_store::{StoreError, StoreResult, StoreStats, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
