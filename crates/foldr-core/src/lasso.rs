//! Rubber-band selection over empty panel space.

use crate::config::EngineConfig;
use crate::hit_test::HitTester;
use crate::widget::WidgetState;
use kurbo::{Point, Rect};

/// An in-progress lasso gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LassoSession {
    /// Press position; one corner of the rectangle.
    pub anchor: Point,
    /// Current rectangle, anchor to pointer.
    pub rect: Rect,
    /// Toggle modifier held at press. Fixed for the gesture.
    pub additive: bool,
}

/// Drives [`crate::selection::SelectionModel::apply_rect`] from pointer
/// events.
///
/// A non-additive lasso replaces the selection once the rectangle is large
/// enough to count as a drag; a press and release on empty space without
/// movement leaves the selection as it was.
#[derive(Debug, Clone)]
pub struct LassoController {
    session: Option<LassoSession>,
    min_extent: f64,
}

impl Default for LassoController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl LassoController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            session: None,
            min_extent: config.lasso_min_extent,
        }
    }

    pub fn session(&self) -> Option<&LassoSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Rectangle to draw, once it is large enough to matter.
    pub fn visible_rect(&self) -> Option<Rect> {
        let rect = self.session?.rect.abs();
        (rect.width() >= self.min_extent && rect.height() >= self.min_extent).then_some(rect)
    }

    /// Start a lasso at `position`.
    pub fn begin(&mut self, position: Point, additive: bool) {
        self.session = Some(LassoSession {
            anchor: position,
            rect: Rect::from_points(position, position),
            additive,
        });
    }

    /// Grow the rectangle to `position` and reapply it to the selection.
    /// Returns true if the selection was recomputed.
    pub fn update(
        &mut self,
        state: &mut WidgetState,
        layout: &dyn HitTester,
        position: Point,
    ) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        session.rect = Rect::from_points(session.anchor, position);
        let (rect, additive) = (session.rect, session.additive);
        state
            .selection()
            .apply_rect(rect, additive, layout, self.min_extent)
    }

    /// Finish the gesture. Returns the final rectangle.
    pub fn end(&mut self) -> Option<Rect> {
        self.session.take().map(|session| session.rect.abs())
    }

    /// Drop the gesture; whatever selection it already applied stays.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_test::ItemLayout;
    use std::path::{Path, PathBuf};

    fn setup() -> (WidgetState, ItemLayout) {
        let mut state = WidgetState::new("Test");
        for name in ["A", "B", "C", "D"] {
            state.add_item(format!("/s/{name}"));
        }
        // A B
        // C D
        let layout = ItemLayout::grid(state.paths(), 2, 1.0, Point::ZERO);
        (state, layout)
    }

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/s/{name}"))
    }

    #[test]
    fn test_lasso_replaces_selection() {
        let (mut state, layout) = setup();
        state.selection().toggle(Path::new("/s/D"));

        let mut lasso = LassoController::default();
        lasso.begin(Point::new(0.0, 0.0), false);
        assert!(lasso.update(&mut state, &layout, Point::new(40.0, 200.0)));
        assert_eq!(state.selected_paths(), vec![p("A"), p("C")]);
        assert_eq!(lasso.end(), Some(Rect::new(0.0, 0.0, 40.0, 200.0)));
        assert!(!lasso.is_active());
    }

    #[test]
    fn test_lasso_shrinking_deselects() {
        let (mut state, layout) = setup();
        let mut lasso = LassoController::default();
        lasso.begin(Point::new(0.0, 0.0), false);

        lasso.update(&mut state, &layout, Point::new(150.0, 20.0));
        assert_eq!(state.selected_paths(), vec![p("A"), p("B")]);

        lasso.update(&mut state, &layout, Point::new(40.0, 20.0));
        assert_eq!(state.selected_paths(), vec![p("A")]);
    }

    #[test]
    fn test_additive_lasso_keeps_prior_selection() {
        let (mut state, layout) = setup();
        state.selection().toggle(Path::new("/s/D"));

        let mut lasso = LassoController::default();
        lasso.begin(Point::new(150.0, 20.0), true);
        lasso.update(&mut state, &layout, Point::new(0.0, 0.0));
        assert_eq!(state.selected_paths(), vec![p("A"), p("B"), p("D")]);
    }

    #[test]
    fn test_tiny_lasso_leaves_selection_unchanged() {
        let (mut state, layout) = setup();
        state.selection().toggle(Path::new("/s/B"));

        let mut lasso = LassoController::default();
        lasso.begin(Point::new(10.0, 10.0), false);
        assert!(!lasso.update(&mut state, &layout, Point::new(13.0, 13.0)));
        assert!(lasso.visible_rect().is_none());
        lasso.end();
        assert_eq!(state.selected_paths(), vec![p("B")]);
    }

    #[test]
    fn test_update_without_session() {
        let (mut state, layout) = setup();
        let mut lasso = LassoController::default();
        assert!(!lasso.update(&mut state, &layout, Point::new(100.0, 100.0)));
        assert!(!lasso.cancel());
    }
}
