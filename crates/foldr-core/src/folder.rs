//! One folder widget: state, controllers and the host they report to.
//!
//! [`Folder`] receives pointer and OS drag events, routes them to the drag and
//! lasso controllers, and applies the resulting mutations to the item list and
//! the filesystem. Filesystem failures are handled per item and collected in
//! reports; a multi-item operation never stops at the first error.

use crate::config::EngineConfig;
use crate::drag::{DragController, DragPayload, DragPhase};
use crate::error::{FolderError, MoveError};
use crate::hit_test::{HitTester, ItemLayout};
use crate::host::WidgetHost;
use crate::input::{DragEnd, Modifiers, MouseButton, PointerEvent};
use crate::item::absolutize;
use crate::lasso::LassoController;
use crate::mover::{IngestKind, StorageMover};
use crate::widget::WidgetState;
use kurbo::Point;
use std::path::{Path, PathBuf};

/// Where a payload was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropZone {
    /// On the open item panel, in panel coordinates.
    Panel(Point),
    /// On the collapsed folder icon.
    Icon,
}

/// Outcome of [`Folder::drop`].
#[derive(Debug)]
pub enum DropOutcome {
    /// Widget is locked; the drop was accepted but nothing changed.
    Rejected,
    /// Payload belongs to another widget or cannot reorder here.
    Ignored,
    /// Internal reorder; false when the drop position was a no-op.
    Reordered(bool),
    /// External files were ingested.
    Ingested(IngestReport),
}

/// Per-path results of an external drop.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Paths added to the widget, in drop order.
    pub added: Vec<PathBuf>,
    /// Dropped paths already present in the widget.
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<FolderError>,
}

/// Per-item results of sending items back to the desktop.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Items removed from the widget.
    pub removed: Vec<PathBuf>,
    /// Desktop paths of items that were moved out of storage.
    pub restored: Vec<PathBuf>,
    pub errors: Vec<FolderError>,
}

/// A folder widget wired to its host.
pub struct Folder<H: WidgetHost> {
    state: WidgetState,
    mover: StorageMover,
    drag: DragController,
    lasso: LassoController,
    config: EngineConfig,
    host: H,
}

impl<H: WidgetHost> Folder<H> {
    /// Wire `state` to `host`, taking the storage and desktop roots from it.
    pub fn new(state: WidgetState, config: EngineConfig, host: H) -> Self {
        let mover = StorageMover::new(host.storage_root(), host.desktop_root())
            .with_max_name_attempts(config.max_name_attempts);
        Self {
            state,
            mover,
            drag: DragController::new(&config),
            lasso: LassoController::new(&config),
            config,
            host,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mover(&self) -> &StorageMover {
        &self.mover
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn lasso(&self) -> &LassoController {
        &self.lasso
    }

    /// Give the state and host back, ending any gesture.
    pub fn into_parts(self) -> (WidgetState, H) {
        (self.state, self.host)
    }

    /// Grid layout of the current items at the configured scale.
    pub fn layout(&self, origin: Point) -> ItemLayout {
        ItemLayout::grid(
            self.state.paths(),
            self.state.grid_columns(),
            self.config.item_scale,
            origin,
        )
    }

    fn changed(&mut self) {
        self.host.notify_changed(&self.state);
        self.host.request_rerender();
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent, layout: &dyn HitTester) -> bool {
        match *event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers, layout),
            PointerEvent::Move { position } => self.pointer_move(position, layout),
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
        }
    }

    /// Press: arms an item drag, or starts a lasso over empty space.
    pub fn pointer_down(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
        layout: &dyn HitTester,
    ) -> bool {
        if !button.is_primary() || self.drag.is_active() || self.lasso.is_active() {
            return false;
        }

        let hit = layout.locate(position);
        let started = match &hit.item {
            Some(path) => self.drag.press(&mut self.state, path, position, modifiers),
            None => {
                self.lasso.begin(position, modifiers.toggles_selection());
                true
            }
        };
        if started {
            self.host.set_pointer_capture(true);
            self.host.request_rerender();
        }
        started
    }

    /// Move: grows the lasso or advances the drag gesture.
    pub fn pointer_move(&mut self, position: Point, layout: &dyn HitTester) -> bool {
        if self.lasso.is_active() {
            if self.lasso.update(&mut self.state, layout, position) {
                self.host.request_rerender();
            }
            return true;
        }

        match self.drag.phase() {
            DragPhase::Pressed => {
                if let Some(payload) = self.drag.pointer_move(&self.state, position) {
                    self.host.set_pointer_capture(false);
                    self.host.begin_native_drag(&payload);
                    self.host.request_rerender();
                }
                true
            }
            DragPhase::Dragging => {
                self.drag.pointer_move(&self.state, position);
                self.host.request_rerender();
                true
            }
            _ => false,
        }
    }

    /// Release: ends a lasso, or turns an armed press into a click.
    ///
    /// A click without the toggle modifier launches the item.
    pub fn pointer_up(&mut self, _position: Point, button: MouseButton) -> bool {
        if !button.is_primary() {
            return false;
        }

        if self.lasso.is_active() {
            self.lasso.end();
            self.host.set_pointer_capture(false);
            self.host.request_rerender();
            return true;
        }

        let Some(session) = self.drag.release() else {
            return false;
        };
        self.host.set_pointer_capture(false);
        self.host.request_rerender();
        if !session.toggle {
            // Failures are already reported to the host.
            let _ = self.open_item(&session.pressed);
        }
        true
    }

    /// Open an item with the OS handler, warning the user on failure.
    pub fn open_item(&mut self, path: &Path) -> Result<(), FolderError> {
        log::info!("Opening {}", path.display());
        self.host.launch(path).map_err(|source| {
            let error = FolderError::LaunchFailed {
                path: path.to_path_buf(),
                source,
            };
            log::warn!("{}", error);
            self.host.show_warning(&error);
            error
        })
    }

    /// A payload hovers the panel.
    pub fn drag_over(&mut self, payload: &DragPayload, position: Point, layout: &dyn HitTester) {
        let hit = layout.locate(position);
        let before = self.drag.indicator();
        self.drag.drag_over(&self.state, payload, &hit);
        if self.drag.indicator() != before {
            self.host.request_rerender();
        }
    }

    /// The payload left the panel.
    pub fn drag_leave(&mut self) {
        if self.drag.indicator().is_some() {
            self.drag.drag_leave();
            self.host.request_rerender();
        }
    }

    /// Handle a drop on the panel or the icon.
    ///
    /// A payload carrying this widget's marker reorders; a payload without a
    /// marker is an external file drop. Locked widgets reject both silently.
    pub fn drop(
        &mut self,
        payload: &DragPayload,
        zone: DropZone,
        layout: &dyn HitTester,
    ) -> DropOutcome {
        self.drag_leave();

        if payload.is_internal() {
            if !payload.is_from(&self.state.id) {
                log::debug!("Ignoring drop from another widget");
                return DropOutcome::Ignored;
            }
            let DropZone::Panel(position) = zone else {
                return DropOutcome::Ignored;
            };
            if self.state.locked {
                log::debug!("Widget {} is locked; reorder rejected", self.state.id);
                return DropOutcome::Rejected;
            }
            let target = layout.locate(position).reorder_target();
            let moved = self.state.move_items(&payload.files, &target);
            self.drag.complete();
            if moved {
                self.changed();
            } else {
                self.host.request_rerender();
            }
            return DropOutcome::Reordered(moved);
        }

        if self.state.locked {
            log::debug!("Widget {} is locked; drop rejected", self.state.id);
            return DropOutcome::Rejected;
        }
        let report = self.ingest_paths(&payload.files);
        if !report.added.is_empty() {
            self.host.expand_panel();
        }
        DropOutcome::Ingested(report)
    }

    /// Ingest external paths one at a time.
    ///
    /// Relative paths are resolved against the current directory. A failed
    /// copy registers the original path by reference. A missing source, the
    /// storage directory or one of its ancestors, or an exhausted name search
    /// skips that path. Either way the batch continues.
    pub fn ingest_paths(&mut self, paths: &[PathBuf]) -> IngestReport {
        let mut report = IngestReport::default();
        if self.state.locked {
            return report;
        }

        for path in paths {
            let path = &absolutize(path);
            if self.state.contains(path) {
                report.skipped.push(path.clone());
                continue;
            }

            let registered = match self.mover.ingest(path) {
                Ok(ingested) => {
                    if let IngestKind::Duplicated(source) = ingested.kind {
                        report.errors.push(FolderError::IngestFailed {
                            path: path.clone(),
                            source,
                        });
                    }
                    ingested.path
                }
                Err(MoveError::DestinationUnresolvable { .. }) => {
                    log::warn!("No free name in storage for {}", path.display());
                    report
                        .errors
                        .push(FolderError::DestinationUnresolvable(path.clone()));
                    continue;
                }
                Err(source @ (MoveError::SourceMissing(_) | MoveError::ContainsStorage(_))) => {
                    log::warn!("Skipping dropped path: {}", source);
                    report.errors.push(FolderError::IngestFailed {
                        path: path.clone(),
                        source,
                    });
                    continue;
                }
                Err(source) => {
                    log::warn!("{}; keeping a reference to the original", source);
                    report.errors.push(FolderError::IngestFailed {
                        path: path.clone(),
                        source,
                    });
                    path.clone()
                }
            };

            if self.state.add_item(registered.clone()) {
                report.added.push(registered);
            } else {
                report.skipped.push(registered);
            }
        }

        if !report.added.is_empty() {
            log::info!("Added {} item(s) to {}", report.added.len(), self.state.name);
            self.changed();
        }
        report
    }

    /// The OS drag loop ended. Sends the dragged items to the desktop on a
    /// drag-out, then returns the gesture to idle.
    pub fn drag_ended(&mut self, end: &DragEnd) -> Option<RestoreReport> {
        let report = match self.drag.take_drag_out(end) {
            Some(_) if self.state.locked => {
                log::debug!("Widget {} is locked; drag-out rejected", self.state.id);
                None
            }
            Some(items) => Some(self.restore_items(&items)),
            None => None,
        };

        self.drag.finish();
        self.host.set_pointer_capture(false);
        match &report {
            Some(report) if !report.removed.is_empty() => self.changed(),
            _ => self.host.request_rerender(),
        }
        report
    }

    /// Restore each path to the desktop and remove it from the widget.
    ///
    /// Items leave the widget even when their restore fails; the file then
    /// stays in storage.
    fn restore_items(&mut self, paths: &[PathBuf]) -> RestoreReport {
        let mut report = RestoreReport::default();
        for path in paths {
            let Some(item) = self.state.remove_item(path) else {
                continue;
            };
            match self.mover.restore(&item.path) {
                Ok(Some(dest)) => report.restored.push(dest),
                Ok(None) => {}
                Err(source) => {
                    log::warn!("Leaving {} in storage: {}", item.path.display(), source);
                    report.errors.push(FolderError::RestoreFailed {
                        path: item.path.clone(),
                        source,
                    });
                }
            }
            report.removed.push(item.path);
        }
        report
    }

    /// Abort any gesture in progress without mutating items.
    pub fn cancel_gesture(&mut self) -> bool {
        let cancelled = if self.drag.cancel() {
            self.drag.finish();
            true
        } else {
            self.lasso.cancel()
        };
        if cancelled {
            log::debug!("Gesture cancelled");
            self.host.set_pointer_capture(false);
            self.host.request_rerender();
        }
        cancelled
    }

    /// Remove one item, sending it back to the desktop if it is managed.
    pub fn remove_item(&mut self, path: &Path) -> RestoreReport {
        let report = self.restore_items(&[path.to_path_buf()]);
        if !report.removed.is_empty() {
            self.changed();
        }
        report
    }

    /// Delete the widget: every managed item goes back to the desktop.
    pub fn delete(mut self) -> (RestoreReport, H) {
        self.cancel_gesture();
        let paths = self.state.paths();
        let report = self.restore_items(&paths);
        log::info!(
            "Deleted widget {} ({} restored, {} failed)",
            self.state.name,
            report.restored.len(),
            report.errors.len()
        );
        self.host.widget_deleted(&self.state.id);
        (report, self.host)
    }

    pub fn set_locked(&mut self, locked: bool) {
        if self.state.locked != locked {
            self.state.locked = locked;
            self.changed();
        }
    }

    pub fn toggle_locked(&mut self) -> bool {
        self.set_locked(!self.state.locked);
        self.state.locked
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        if self.state.pinned != pinned {
            self.state.pinned = pinned;
            self.changed();
        }
    }

    pub fn set_grid_columns(&mut self, columns: usize) {
        let before = self.state.grid_columns();
        self.state.set_grid_columns(columns);
        if self.state.grid_columns() != before {
            self.changed();
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.state.name != name {
            self.state.name = name;
            self.changed();
        }
    }

    /// Reorder by index, as a drop on the left or right half of `to`.
    pub fn move_item(&mut self, from: usize, to: usize, insert_after: bool) -> bool {
        if self.state.locked {
            return false;
        }
        let (Some(source), Some(target)) =
            (self.state.items().get(from), self.state.items().get(to))
        else {
            return false;
        };
        let dragged = [source.path.clone()];
        let target = crate::widget::ReorderTarget::Item {
            path: target.path.clone(),
            insert_after,
        };
        let moved = self.state.move_items(&dragged, &target);
        if moved {
            self.changed();
        }
        moved
    }
}
