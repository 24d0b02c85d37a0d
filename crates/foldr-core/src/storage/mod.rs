//! Persistence of widget records.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::widget::WidgetState;
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Widget not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend that persists [`WidgetState`] records by widget id.
///
/// The transient `selected` flag of items is never written.
pub trait WidgetStore: Send + Sync {
    /// Save a widget, replacing any previous record with the same id.
    fn save(&self, widget: &WidgetState) -> StorageResult<()>;

    /// Load a widget.
    fn load(&self, id: &str) -> StorageResult<WidgetState>;

    /// Delete a widget. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all widget ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a widget exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}

/// Default managed storage directory: `<data-local>/foldr/storage`.
pub fn default_storage_root() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("storage"))
}

/// Default widget record directory: `<data-local>/foldr/widgets`.
pub fn default_widgets_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("widgets"))
}

/// The user's desktop, falling back to `~/Desktop`.
pub fn default_desktop_root() -> Option<PathBuf> {
    dirs::desktop_dir().or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
}

fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|base| base.join("foldr"))
}
