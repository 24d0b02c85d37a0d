//! Errors surfaced by the command-line host.

use foldr_core::{FolderError, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config {path}: {message}")]
    Config { path: String, message: String },
    #[error("Widget {id} has no item at index {index}")]
    NoSuchItem { id: String, index: usize },
    #[error("Widget {0} is locked")]
    Locked(String),
    #[error("Could not determine the {0} directory")]
    NoDefaultDir(&'static str),
}

pub type AppResult<T> = Result<T, AppError>;
