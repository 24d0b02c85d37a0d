//! The collaborator a [`crate::Folder`] reports to.

use crate::drag::DragPayload;
use crate::error::FolderError;
use crate::widget::WidgetState;
use std::io;
use std::path::{Path, PathBuf};

/// Services the embedding application provides to a widget.
///
/// Everything UI-framework specific sits behind this trait, so the engine can
/// run against a recording host in tests.
pub trait WidgetHost {
    /// Managed storage directory.
    fn storage_root(&self) -> PathBuf;

    /// The desktop directory drag-outs restore into.
    fn desktop_root(&self) -> PathBuf;

    /// Items, lock state or settings changed and should be persisted.
    fn notify_changed(&mut self, state: &WidgetState);

    /// Selection, indicator or item list changed and should be redrawn.
    fn request_rerender(&mut self);

    /// Open `path` with the OS default handler.
    fn launch(&mut self, path: &Path) -> io::Result<()> {
        open::that(path)
    }

    /// Show a dismissable warning. Only launch failures are reported here.
    fn show_warning(&mut self, error: &FolderError);

    /// Hand a drag payload to the OS drag-and-drop loop.
    fn begin_native_drag(&mut self, _payload: &DragPayload) {}

    /// Capture or release the pointer for the current gesture.
    fn set_pointer_capture(&mut self, _captured: bool) {}

    /// Open the item panel, e.g. after files were dropped on the icon.
    fn expand_panel(&mut self) {}

    /// The widget was deleted and its record should be dropped.
    fn widget_deleted(&mut self, _id: &str) {}
}
