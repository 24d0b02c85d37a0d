//! In-memory widget store.

use super::{StorageError, StorageResult, WidgetStore};
use crate::widget::WidgetState;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for testing and ephemeral use.
///
/// Records are kept as JSON so loading behaves like the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    widgets: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl WidgetStore for MemoryStore {
    fn save(&self, widget: &WidgetState) -> StorageResult<()> {
        let json = widget
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut widgets = self.widgets.write().map_err(lock_error)?;
        widgets.insert(widget.id.clone(), json);
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<WidgetState> {
        let widgets = self.widgets.read().map_err(lock_error)?;
        let json = widgets
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        WidgetState::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut widgets = self.widgets.write().map_err(lock_error)?;
        widgets.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let widgets = self.widgets.read().map_err(lock_error)?;
        Ok(widgets.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let widgets = self.widgets.read().map_err(lock_error)?;
        Ok(widgets.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut widget = WidgetState::new("Docs");
        widget.add_item("/s/a.txt");

        store.save(&widget).unwrap();
        let loaded = store.load(&widget.id).unwrap();

        assert_eq!(loaded.name, "Docs");
        assert_eq!(loaded.paths(), widget.paths());
    }

    #[test]
    fn test_not_found() {
        let store = MemoryStore::new();
        let result = store.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_selection_not_persisted() {
        let store = MemoryStore::new();
        let mut widget = WidgetState::new("Docs");
        widget.add_item("/s/a.txt");
        widget.selection().toggle(Path::new("/s/a.txt"));

        store.save(&widget).unwrap();
        assert!(store.load(&widget.id).unwrap().selected_paths().is_empty());
    }

    #[test]
    fn test_exists_delete_list() {
        let store = MemoryStore::new();
        let first = WidgetState::new("One");
        let second = WidgetState::new("Two");

        assert!(!store.exists(&first.id).unwrap());
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert!(store.exists(&first.id).unwrap());
        assert_eq!(store.list().unwrap().len(), 2);

        store.delete(&first.id).unwrap();
        assert!(!store.exists(&first.id).unwrap());
        store.delete(&first.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![second.id.clone()]);
    }
}
