//! Reorder arithmetic for drops inside the item panel.

use crate::item::{Item, paths_equal};
use std::path::{Path, PathBuf};

/// Where a reorder drop lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderTarget {
    /// Next to an existing item; before it unless `insert_after`.
    Item { path: PathBuf, insert_after: bool },
    /// Empty panel space: append.
    End,
}

/// Move every item matching `dragged` to the drop target as one block.
///
/// The block keeps collection order. The insertion index is the target's
/// index, minus the moved items that sat before it, plus one when inserting
/// after. For a single item this is "remove, shift down if the source was
/// before the target, step right on the right half, clamp".
///
/// Returns false (and leaves `items` untouched) for self-drops, unknown
/// targets, or when none of `dragged` is present.
pub fn move_block(items: &mut Vec<Item>, dragged: &[PathBuf], target: &ReorderTarget) -> bool {
    let is_dragged = |path: &Path| dragged.iter().any(|d| paths_equal(d, path));

    if !items.iter().any(|item| is_dragged(&item.path)) {
        return false;
    }

    let insert_at = match target {
        ReorderTarget::Item { path, insert_after } => {
            if is_dragged(path) {
                return false;
            }
            let Some(target_index) = items.iter().position(|item| item.matches(path)) else {
                return false;
            };
            let moved_before = items[..target_index]
                .iter()
                .filter(|item| is_dragged(&item.path))
                .count();
            Some(target_index - moved_before + usize::from(*insert_after))
        }
        ReorderTarget::End => None,
    };

    let (block, rest): (Vec<Item>, Vec<Item>) = std::mem::take(items)
        .into_iter()
        .partition(|item| is_dragged(&item.path));
    *items = rest;

    let index = insert_at.unwrap_or(items.len()).min(items.len());
    items.splice(index..index, block);
    true
}
