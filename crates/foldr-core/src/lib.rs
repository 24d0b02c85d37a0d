//! Foldr Core Library
//!
//! Drag-drop and selection engine for desktop folder widgets: a floating icon
//! that holds files moved off the desktop, with a grid panel for viewing,
//! reordering and dropping items.
//!
//! Nothing here depends on a UI toolkit. Hosts feed pointer and OS drag events
//! into a [`Folder`], supply item bounds through a [`HitTester`], and receive
//! change notifications through [`WidgetHost`].

pub mod config;
pub mod drag;
pub mod error;
pub mod folder;
pub mod host;
pub mod input;
pub mod item;
pub mod lasso;
pub mod mover;
pub mod selection;
pub mod storage;
pub mod thumbnails;
pub mod widget;

pub use config::EngineConfig;
pub use drag::{DragController, DragMarker, DragPayload, DragPhase, DragSession, DragVisual};
pub use error::{FolderError, MoveError, MoveResult};
pub use folder::{DropOutcome, DropZone, Folder, IngestReport, RestoreReport};
pub use hit_test::{DropIndicator, HitResult, HitTester, ItemBounds, ItemLayout};
pub use host::WidgetHost;
pub use input::{DragEnd, Modifiers, MouseButton, PointerEvent};
pub use item::Item;
pub use lasso::{LassoController, LassoSession};
pub use mover::{IngestKind, Ingested, StorageMover};
pub use selection::SelectionModel;
pub use storage::{FileStore, MemoryStore, StorageError, StorageResult, WidgetStore};
pub use thumbnails::{Thumbnail, ThumbnailWorker};
pub use widget::{ReorderTarget, WidgetState};
