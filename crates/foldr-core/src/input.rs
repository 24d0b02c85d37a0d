//! Pointer and keyboard input types shared by the gesture controllers.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that drives selection, reordering and lasso gestures.
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier keys held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only the control key held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// True when no modifier key is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }

    /// Whether the "toggle selection" modifier is held (Ctrl, or Cmd on macOS).
    pub fn toggles_selection(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type, in panel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// Notification that the OS drag-feedback loop has ended.
///
/// Positions are in screen coordinates. `modifiers` is empty when the user
/// released every key, which is the precondition for a drag-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    /// Last known pointer position on screen.
    pub screen_position: Point,
    /// Keys still held when the loop ended.
    pub modifiers: Modifiers,
    /// Screen bounds of the widget's own window.
    pub window_bounds: Rect,
}

impl DragEnd {
    /// Whether this end of a drag means "send the items back to the desktop".
    pub fn is_drag_out(&self) -> bool {
        self.modifiers.is_empty() && !self.window_bounds.contains(self.screen_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(Modifiers::default().is_empty());
        assert!(!Modifiers::CTRL.is_empty());
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(!shift.is_empty());
        assert!(!shift.toggles_selection());
    }

    #[test]
    fn test_toggle_modifier() {
        assert!(Modifiers::CTRL.toggles_selection());
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert!(meta.toggles_selection());
    }

    #[test]
    fn test_drag_out_requires_outside_and_no_keys() {
        let window = Rect::new(100.0, 100.0, 400.0, 300.0);
        let outside = DragEnd {
            screen_position: Point::new(20.0, 20.0),
            modifiers: Modifiers::NONE,
            window_bounds: window,
        };
        assert!(outside.is_drag_out());

        let inside = DragEnd {
            screen_position: Point::new(150.0, 150.0),
            ..outside
        };
        assert!(!inside.is_drag_out());

        let held = DragEnd {
            modifiers: Modifiers::CTRL,
            ..outside
        };
        assert!(!held.is_drag_out());
    }
}
