//! [`WidgetHost`] for the command line: persists on change, prints warnings.

use foldr_core::{FileStore, FolderError, StorageError, WidgetHost, WidgetState, WidgetStore};
use std::path::PathBuf;

/// Host that writes every change straight to a [`FileStore`].
pub struct CliHost {
    store: FileStore,
    storage_root: PathBuf,
    desktop_root: PathBuf,
    save_error: Option<StorageError>,
    warnings: Vec<String>,
}

impl CliHost {
    pub fn new(store: FileStore, storage_root: PathBuf, desktop_root: PathBuf) -> Self {
        Self {
            store,
            storage_root,
            desktop_root,
            save_error: None,
            warnings: Vec::new(),
        }
    }

    /// First persistence failure since the host was created.
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.save_error.take()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn record(&mut self, result: Result<(), StorageError>) {
        if let Err(e) = result {
            log::error!("Failed to persist widget: {}", e);
            self.save_error.get_or_insert(e);
        }
    }
}

impl WidgetHost for CliHost {
    fn storage_root(&self) -> PathBuf {
        self.storage_root.clone()
    }

    fn desktop_root(&self) -> PathBuf {
        self.desktop_root.clone()
    }

    fn notify_changed(&mut self, state: &WidgetState) {
        let result = self.store.save(state);
        self.record(result);
    }

    fn request_rerender(&mut self) {
        log::trace!("Rerender requested");
    }

    fn show_warning(&mut self, error: &FolderError) {
        eprintln!("warning: {error}");
        self.warnings.push(error.to_string());
    }

    fn widget_deleted(&mut self, id: &str) {
        let result = self.store.delete(id);
        self.record(result);
    }
}
