//! High-level orchestration layer over the lower-level crates.
//! Intentionally thin: exposes the fill pass used by the CLI and tools.

pub mod sync;

pub use locsync_core::{LocTable, Result, TableError};
pub use sync::{run_sync, CancelFlag, SyncError, SyncErrorLog, SyncOptions, SyncRun};
