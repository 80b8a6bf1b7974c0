// src/lib.rs

//! Coordinated updates of an in-memory file-system snapshot, with optional
//! reporting of each update's added/removed paths to an observer.
//!
//! - [`snapshot`]: the capabilities a hierarchy exposes to updates, plus a
//!   reference [`PathHierarchy`](snapshot::PathHierarchy).
//! - [`vfs`]: the update runner, diff collector and publisher.
//! - [`watch`]: watch filters deciding which paths are reported.
//! - [`config`]: TOML configuration for filters and logging.

pub mod config;
pub mod errors;
pub mod logging;
pub mod snapshot;
pub mod types;
pub mod vfs;
pub mod watch;

pub use errors::{Result, VfsError};
pub use snapshot::{NodeDiffListener, PathHierarchy, UpdateFunctionRunner};
pub use vfs::{
    ErrorHandler, LoggingErrorHandler, NotifyingUpdateFunctionRunner, SnapshotDiff,
    SnapshotDiffListener, VfsRoot, WatchingVirtualFileSystem,
};
pub use watch::WatchFilter;
