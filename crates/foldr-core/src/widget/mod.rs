//! Widget data: the ordered item collection and its per-widget settings.
//!
//! This module provides:
//! - [`WidgetState`], the persisted record of one floating widget
//! - [`ReorderTarget`] and the index arithmetic behind drag reordering
//!
//! Items stay plain data; gesture state lives in the controllers.

mod order;
mod state;

pub use order::{ReorderTarget, move_block};
pub use state::{DEFAULT_GRID_COLUMNS, WidgetState};
