//! Multi-item selection over a widget's ordered items.

use crate::hit_test::{HitTester, intersects};
use crate::item::Item;
use kurbo::Rect;
use std::path::{Path, PathBuf};

/// Selection operations over a borrowed item slice.
///
/// The `selected` flag lives on each [`Item`], so removing an item drops its
/// selection with it.
pub struct SelectionModel<'a> {
    items: &'a mut [Item],
}

impl<'a> SelectionModel<'a> {
    pub fn new(items: &'a mut [Item]) -> Self {
        Self { items }
    }

    fn find_mut(&mut self, path: &Path) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.matches(path))
    }

    /// Whether the item with `path` is selected.
    pub fn is_selected(&self, path: &Path) -> bool {
        self.items
            .iter()
            .any(|item| item.selected && item.matches(path))
    }

    /// Invert the selection of one item. Returns false if it is not present.
    pub fn toggle(&mut self, path: &Path) -> bool {
        match self.find_mut(path) {
            Some(item) => {
                item.selected = !item.selected;
                true
            }
            None => false,
        }
    }

    /// Select only this item.
    pub fn select_exclusive(&mut self, path: &Path) -> bool {
        if !self.items.iter().any(|item| item.matches(path)) {
            return false;
        }
        for item in self.items.iter_mut() {
            item.selected = item.matches(path);
        }
        true
    }

    /// Press semantics: toggle with the modifier held, otherwise select
    /// exclusively, except that pressing an already-selected item keeps the
    /// whole selection so it can be dragged as a group.
    pub fn click(&mut self, path: &Path, toggle: bool) -> bool {
        if toggle {
            self.toggle(path)
        } else if self.is_selected(path) {
            true
        } else {
            self.select_exclusive(path)
        }
    }

    /// Deselect everything.
    pub fn clear_all(&mut self) {
        for item in self.items.iter_mut() {
            item.selected = false;
        }
    }

    /// Selected paths in display order.
    pub fn selected_items(&self) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| item.path.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    /// Select the items whose bounds intersect `rect`.
    ///
    /// Non-additive mode also deselects everything outside `rect`. A rectangle
    /// narrower or shorter than `min_extent` counts as a click, not a drag, and
    /// leaves the selection alone. Returns true if the rectangle was applied.
    pub fn apply_rect(
        &mut self,
        rect: Rect,
        additive: bool,
        layout: &dyn HitTester,
        min_extent: f64,
    ) -> bool {
        let rect = rect.abs();
        if rect.width() < min_extent || rect.height() < min_extent {
            return false;
        }
        for item in self.items.iter_mut() {
            let inside = layout
                .bounds_of(&item.path)
                .is_some_and(|bounds| intersects(bounds, rect));
            if inside {
                item.selected = true;
            } else if !additive {
                item.selected = false;
            }
        }
        true
    }
}
