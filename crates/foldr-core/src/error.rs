//! Error types for filesystem moves and widget operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while moving files in or out of managed storage.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("Source does not exist: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The copy exists, only the original could not be removed.
    #[error("Copied to {}, but could not delete source {}: {source}", copy.display(), path.display())]
    DeleteFailed {
        path: PathBuf,
        copy: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source is the storage directory itself or one of its ancestors.
    #[error("Refusing to ingest {}, it contains managed storage", .0.display())]
    ContainsStorage(PathBuf),
    #[error("No free name for {name} in {}", dir.display())]
    DestinationUnresolvable { dir: PathBuf, name: String },
}

/// Result type for storage moves.
pub type MoveResult<T> = Result<T, MoveError>;

/// Per-item failures of widget operations.
///
/// Only [`FolderError::LaunchFailed`] is ever shown to the user; the rest are
/// logged and collected in operation reports.
#[derive(Debug, Error)]
pub enum FolderError {
    #[error("Could not move {} into storage: {source}", path.display())]
    IngestFailed {
        path: PathBuf,
        #[source]
        source: MoveError,
    },
    #[error("Could not restore {} to the desktop: {source}", path.display())]
    RestoreFailed {
        path: PathBuf,
        #[source]
        source: MoveError,
    },
    #[error("Cannot open {}: {source}", path.display())]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No free destination name for {}", .0.display())]
    DestinationUnresolvable(PathBuf),
}

impl FolderError {
    /// Path of the item the error belongs to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FolderError::IngestFailed { path, .. }
            | FolderError::RestoreFailed { path, .. }
            | FolderError::LaunchFailed { path, .. }
            | FolderError::DestinationUnresolvable(path) => path,
        }
    }
}
