//! Drag gesture state machine for items in the panel.
//!
//! `Idle → Pressed → Dragging → {Completed, Cancelled} → Idle`
//!
//! A press on an item arms the gesture. Moving past the threshold turns it
//! into a drag and yields the payload the host hands to the OS. Releasing
//! before that is a click. The controller only tracks gesture state; the
//! mutations a drag ends in are applied by [`crate::Folder`].

use crate::config::EngineConfig;
use crate::hit_test::{DropIndicator, HitResult};
use crate::input::{DragEnd, Modifiers};
use crate::widget::WidgetState;
use kurbo::{Point, Vec2};
use std::path::{Path, PathBuf};

/// Phase of an item drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
    Completed,
    Cancelled,
}

/// Tags a payload as coming from a drag started in a specific widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragMarker {
    pub widget_id: String,
    pub session: u64,
}

/// Data carried by a drag-and-drop operation.
///
/// External drops only have `files`. Drags started in a widget also carry a
/// marker so the panel can tell a reorder from a file drop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragPayload {
    pub files: Vec<PathBuf>,
    pub marker: Option<DragMarker>,
}

impl DragPayload {
    /// Payload of a file drop from outside the application.
    pub fn external<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            marker: None,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.marker.is_some()
    }

    /// Whether this payload was started by the widget with `widget_id`.
    pub fn is_from(&self, widget_id: &str) -> bool {
        self.marker
            .as_ref()
            .is_some_and(|marker| marker.widget_id == widget_id)
    }
}

/// Floating stack of thumbnails that follows the pointer during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragVisual {
    pub position: Point,
    /// Items drawn in the stack, at most the preview limit.
    pub stack: Vec<PathBuf>,
    /// Dragged items not drawn in the stack.
    pub overflow: usize,
}

impl DragVisual {
    /// Overflow badge text such as "+3".
    pub fn badge(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }
}

/// One press-to-release gesture on an item.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Item under the pointer at press time.
    pub pressed: PathBuf,
    /// Pointer position at press.
    pub origin: Point,
    /// Last known pointer position.
    pub current: Point,
    /// Selection snapshot taken when the drag started.
    pub dragged: Vec<PathBuf>,
    pub phase: DragPhase,
    pub marker: DragMarker,
    /// The press toggled selection instead of selecting exclusively.
    pub toggle: bool,
}

impl DragSession {
    /// Pointer travel since the press.
    pub fn delta(&self) -> Vec2 {
        self.current - self.origin
    }
}

/// Tracks the item drag gesture of one widget.
#[derive(Debug, Clone)]
pub struct DragController {
    session: Option<DragSession>,
    visual: Option<DragVisual>,
    indicator: Option<DropIndicator>,
    threshold: f64,
    preview_limit: usize,
    indicator_gap: f64,
    next_session: u64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DragController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            session: None,
            visual: None,
            indicator: None,
            threshold: config.drag_threshold,
            preview_limit: config.drag_preview_limit,
            indicator_gap: config.indicator_gap,
            next_session: 1,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map(|session| session.phase)
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn visual(&self) -> Option<&DragVisual> {
        self.visual.as_ref()
    }

    pub fn indicator(&self) -> Option<DropIndicator> {
        self.indicator
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Primary-button press on an item.
    ///
    /// Applies click selection before capturing the press position.
    pub fn press(
        &mut self,
        state: &mut WidgetState,
        path: &Path,
        position: Point,
        modifiers: Modifiers,
    ) -> bool {
        let toggle = modifiers.toggles_selection();
        if !state.selection().click(path, toggle) {
            return false;
        }
        let session = self.next_session;
        self.next_session += 1;
        self.visual = None;
        self.indicator = None;
        self.session = Some(DragSession {
            pressed: path.to_path_buf(),
            origin: position,
            current: position,
            dragged: Vec::new(),
            phase: DragPhase::Pressed,
            marker: DragMarker {
                widget_id: state.id.clone(),
                session,
            },
            toggle,
        });
        log::debug!("Item press on {}", path.display());
        true
    }

    /// Pointer moved while the gesture is armed or dragging.
    ///
    /// Returns the payload to hand to the OS when the threshold is first
    /// exceeded.
    pub fn pointer_move(&mut self, state: &WidgetState, position: Point) -> Option<DragPayload> {
        let session = self.session.as_mut()?;
        session.current = position;

        match session.phase {
            DragPhase::Pressed => {
                let delta = session.delta();
                if delta.x.abs() <= self.threshold && delta.y.abs() <= self.threshold {
                    return None;
                }

                let mut dragged = state.selected_paths();
                if dragged.is_empty() {
                    dragged.push(session.pressed.clone());
                }
                session.dragged = dragged;
                session.phase = DragPhase::Dragging;

                let shown = session.dragged.len().min(self.preview_limit);
                self.visual = Some(DragVisual {
                    position,
                    stack: session.dragged[..shown].to_vec(),
                    overflow: session.dragged.len() - shown,
                });
                log::debug!("Drag started with {} item(s)", session.dragged.len());

                Some(DragPayload {
                    files: session.dragged.clone(),
                    marker: Some(session.marker.clone()),
                })
            }
            DragPhase::Dragging => {
                if let Some(visual) = &mut self.visual {
                    visual.position = position;
                }
                None
            }
            _ => None,
        }
    }

    /// Pointer released. Returns the session if the gesture never became a
    /// drag, in which case it was a click and the gesture is over.
    pub fn release(&mut self) -> Option<DragSession> {
        if self.phase() != DragPhase::Pressed {
            return None;
        }
        self.session.take()
    }

    /// Update the drop indicator while a payload hovers the panel.
    pub fn drag_over(&mut self, state: &WidgetState, payload: &DragPayload, hit: &HitResult) {
        self.indicator = if payload.is_from(&state.id) {
            DropIndicator::for_hit(hit, self.indicator_gap)
        } else {
            None
        };
    }

    /// The payload left the panel.
    pub fn drag_leave(&mut self) {
        self.indicator = None;
    }

    /// A drop was handled inside the widget.
    pub fn complete(&mut self) {
        self.indicator = None;
        if let Some(session) = &mut self.session {
            if session.phase == DragPhase::Dragging {
                session.phase = DragPhase::Completed;
            }
        }
    }

    /// Check the end of the OS drag loop for a drag-out.
    ///
    /// On a drag-out the session is cancelled and the items to send back to
    /// the desktop are returned: the snapshot, or the pressed item if the
    /// snapshot is empty.
    pub fn take_drag_out(&mut self, end: &DragEnd) -> Option<Vec<PathBuf>> {
        if !end.is_drag_out() {
            return None;
        }
        let session = self.session.as_mut()?;
        if session.phase != DragPhase::Dragging {
            return None;
        }
        session.phase = DragPhase::Cancelled;
        let items = if session.dragged.is_empty() {
            vec![session.pressed.clone()]
        } else {
            session.dragged.clone()
        };
        log::debug!("Drag-out with {} item(s)", items.len());
        Some(items)
    }

    /// Abort the gesture without any mutation.
    pub fn cancel(&mut self) -> bool {
        match &mut self.session {
            Some(session) if session.phase != DragPhase::Completed => {
                session.phase = DragPhase::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// End the gesture: drop the session, hide the visual and indicator.
    /// Returns the phase the gesture ended in.
    pub fn finish(&mut self) -> DragPhase {
        self.visual = None;
        self.indicator = None;
        let phase = self.phase();
        self.session = None;
        phase
    }
}
