//! The persisted record of one floating widget.

use super::order::{ReorderTarget, move_block};
use crate::item::Item;
use crate::selection::SelectionModel;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Grid columns for a new widget.
pub const DEFAULT_GRID_COLUMNS: usize = 4;

/// Badge counts above this render as "99+".
const BADGE_LIMIT: usize = 99;

fn default_grid_columns() -> usize {
    DEFAULT_GRID_COLUMNS
}

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// One floating folder widget.
///
/// `items` is kept free of case-insensitive duplicate paths; every insertion
/// goes through [`WidgetState::add_item`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetState {
    /// Unique widget identifier.
    pub id: String,
    /// Label under the folder icon.
    pub name: String,
    /// Accent color as `#RRGGBB`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Screen position of the folder icon.
    #[serde(default)]
    pub position: Point,
    /// Keep the panel open when the widget loses focus.
    #[serde(default)]
    pub pinned: bool,
    /// Reject every mutating drag operation.
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_grid_columns")]
    grid_columns: usize,
    #[serde(default)]
    items: Vec<Item>,
}

impl WidgetState {
    /// Create an empty, unlocked widget.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: default_color(),
            position: Point::ZERO,
            pinned: false,
            locked: false,
            grid_columns: DEFAULT_GRID_COLUMNS,
            items: Vec::new(),
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Paths in display order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.items.iter().map(|item| item.path.clone()).collect()
    }

    /// Index of the item with `path` (case-insensitive).
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.items.iter().position(|item| item.matches(path))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index_of(path).is_some()
    }

    pub fn get(&self, path: &Path) -> Option<&Item> {
        self.items.iter().find(|item| item.matches(path))
    }

    /// Append an item unless one with the same path is already present.
    /// Returns true if the item was added.
    pub fn add_item(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.items.push(Item::new(path));
        true
    }

    /// Remove the item with `path`, taking its selection with it.
    pub fn remove_item(&mut self, path: &Path) -> Option<Item> {
        let index = self.index_of(path)?;
        Some(self.items.remove(index))
    }

    /// Remove and return every item.
    pub fn take_items(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    /// Reorder `dragged` to `target`. See [`move_block`].
    pub fn move_items(&mut self, dragged: &[PathBuf], target: &ReorderTarget) -> bool {
        move_block(&mut self.items, dragged, target)
    }

    /// Selection view over the items.
    pub fn selection(&mut self) -> SelectionModel<'_> {
        SelectionModel::new(&mut self.items)
    }

    /// Paths of the selected items, in display order.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.path.clone())
            .collect()
    }

    pub fn grid_columns(&self) -> usize {
        self.grid_columns
    }

    /// Set the column count; at least one column is always kept.
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    /// Text for the item-count badge, `None` when empty.
    pub fn badge_text(&self) -> Option<String> {
        match self.items.len() {
            0 => None,
            n if n > BADGE_LIMIT => Some(format!("{BADGE_LIMIT}+")),
            n => Some(n.to_string()),
        }
    }

    /// Serialize to JSON. Selection is never persisted.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON, dropping any duplicate paths.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(json)?;
        state.grid_columns = state.grid_columns.max(1);
        let loaded = std::mem::take(&mut state.items);
        for item in loaded {
            if !state.contains(&item.path) {
                state.items.push(item);
            }
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_rejects_case_insensitive_duplicates() {
        let mut state = WidgetState::new("Docs");
        assert!(state.add_item("/s/Report.pdf"));
        assert!(!state.add_item("/s/report.PDF"));
        assert!(state.add_item("/s/other.pdf"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_remove_item() {
        let mut state = WidgetState::new("Docs");
        state.add_item("/s/a");
        state.add_item("/s/b");
        state.selection().toggle(Path::new("/s/a"));

        let removed = state.remove_item(Path::new("/S/A")).unwrap();
        assert!(removed.selected);
        assert!(state.selected_paths().is_empty());
        assert!(state.remove_item(Path::new("/s/a")).is_none());
        assert_eq!(state.paths(), vec![PathBuf::from("/s/b")]);
    }

    #[test]
    fn test_badge_text() {
        let mut state = WidgetState::new("Docs");
        assert_eq!(state.badge_text(), None);
        for i in 0..99 {
            state.add_item(format!("/s/{i}"));
        }
        assert_eq!(state.badge_text().as_deref(), Some("99"));
        state.add_item("/s/one-more");
        assert_eq!(state.badge_text().as_deref(), Some("99+"));
    }

    #[test]
    fn test_grid_columns_clamped() {
        let mut state = WidgetState::new("Docs");
        assert_eq!(state.grid_columns(), DEFAULT_GRID_COLUMNS);
        state.set_grid_columns(0);
        assert_eq!(state.grid_columns(), 1);
        state.set_grid_columns(6);
        assert_eq!(state.grid_columns(), 6);
    }

    #[test]
    fn test_json_round_trip_drops_selection() {
        let mut state = WidgetState::new("Docs");
        state.locked = true;
        state.add_item("/s/a");
        state.selection().select_exclusive(Path::new("/s/a"));

        let loaded = WidgetState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(loaded.id, state.id);
        assert!(loaded.locked);
        assert_eq!(loaded.paths(), state.paths());
        assert!(loaded.selected_paths().is_empty());
    }

    #[test]
    fn test_from_json_dedupes_and_defaults() {
        let json = r#"{
            "id": "w1",
            "name": "Old",
            "grid_columns": 0,
            "items": [{ "path": "/s/A" }, { "path": "/s/a" }, { "path": "/s/b" }]
        }"#;
        let state = WidgetState::from_json(json).unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.grid_columns(), 1);
        assert!(!state.locked);
        assert_eq!(state.color, "#3B82F6");
    }
}
