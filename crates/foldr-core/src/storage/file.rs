//! JSON file widget store.

use super::{StorageError, StorageResult, WidgetStore, default_widgets_dir};
use crate::widget::WidgetState;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each widget as `<id>.json` in a directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store over `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create widget directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Store in the default location.
    ///
    /// On Linux: `~/.local/share/foldr/widgets/`
    /// On Windows: `%LOCALAPPDATA%\foldr\widgets\`
    pub fn default_location() -> StorageResult<Self> {
        let path = default_widgets_dir()
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(path)
    }

    fn widget_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl WidgetStore for FileStore {
    fn save(&self, widget: &WidgetState) -> StorageResult<()> {
        let path = self.widget_path(&widget.id);
        let json = widget
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn load(&self, id: &str) -> StorageResult<WidgetState> {
        let path = self.widget_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        WidgetState::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.widget_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut ids: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.widget_path(id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_save_load() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let mut widget = WidgetState::new("Projects");
        widget.locked = true;
        widget.set_grid_columns(3);
        widget.add_item("/s/plan.docx");

        store.save(&widget).unwrap();
        let loaded = store.load(&widget.id).unwrap();

        assert_eq!(loaded.name, "Projects");
        assert!(loaded.locked);
        assert_eq!(loaded.grid_columns(), 3);
        assert_eq!(loaded.paths(), widget.paths());
    }

    #[test]
    fn test_file_store_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(store.load("missing"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_store_list_ignores_other_files() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let mut first = WidgetState::new("One");
        first.id = "a".to_string();
        let mut second = WidgetState::new("Two");
        second.id = "b".to_string();
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_delete() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let widget = WidgetState::new("One");
        store.save(&widget).unwrap();
        assert!(store.exists(&widget.id).unwrap());
        store.delete(&widget.id).unwrap();
        assert!(!store.exists(&widget.id).unwrap());
    }

    #[test]
    fn test_file_store_sanitizes_id() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        let mut widget = WidgetState::new("Odd");
        widget.id = "w/1:x*".to_string();
        store.save(&widget).unwrap();

        assert!(dir.path().join("w_1_x_.json").exists());
        assert_eq!(store.load("w/1:x*").unwrap().name, "Odd");
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base_path(), nested.as_path());
    }
}
