//! Pan, zoom and drag state of one diagram instance.
//!
//! [`ViewState`] is an explicit value mutated only by discrete gesture
//! handlers. Rendering reads it through [`ViewState::transform`] and
//! [`ViewState::transition`]; hit testing goes the other way through
//! [`ViewState::screen_to_content`].
//!
//! The transform is `scale(zoom) translate(pan.x, pan.y)` with its origin at
//! the canvas origin, so zooming scales away from the top-left corner rather
//! than from the pointer.

use log::trace;

use waymark_core::geometry::Point;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.3;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom change of one zoom-in or zoom-out button press.
pub const ZOOM_STEP: f32 = 0.1;

/// Zoom change per unit of wheel delta.
pub const WHEEL_ZOOM_FACTOR: f32 = 0.001;

const TRANSITION: &str = "transform 0.1s ease-out";

/// Pointer buttons as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

/// Whether the viewport consumed a wheel event.
///
/// `Ignored` tells the host to apply its default behavior (page scroll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    Handled,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { anchor: Point },
}

/// Zoom, pan and drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    zoom: f32,
    pan: Point,
    drag: DragState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            drag: DragState::Idle,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Last pointer position seen while dragging.
    pub fn drag_anchor(&self) -> Option<Point> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { anchor } => Some(anchor),
        }
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        trace!(zoom = self.zoom; "Zoom changed");
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Handles a wheel event.
    ///
    /// Only zooms while the zoom modifier (Ctrl or Cmd) is held; scrolling
    /// down (positive `delta_y`) zooms out.
    pub fn wheel(&mut self, delta_y: f32, modifier_held: bool) -> WheelOutcome {
        if !modifier_held {
            return WheelOutcome::Ignored;
        }

        self.set_zoom(self.zoom - delta_y * WHEEL_ZOOM_FACTOR);
        WheelOutcome::Handled
    }

    /// Starts dragging on a primary-button press; other buttons are ignored.
    pub fn pointer_down(&mut self, button: PointerButton, position: Point) {
        if button != PointerButton::Primary {
            return;
        }
        self.drag = DragState::Dragging { anchor: position };
    }

    /// Pans by the pointer movement since the last anchor while dragging.
    pub fn pointer_move(&mut self, position: Point) {
        let DragState::Dragging { anchor } = self.drag else {
            return;
        };

        self.pan = self.pan.add_point(position.sub_point(anchor));
        self.drag = DragState::Dragging { anchor: position };
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Restores zoom 1 and zero pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }

    /// SVG/CSS transform of the viewport group.
    pub fn transform(&self) -> String {
        format!(
            "scale({}) translate({}, {})",
            self.zoom,
            self.pan.x(),
            self.pan.y()
        )
    }

    /// CSS transition of the viewport group; none while dragging so the
    /// content follows the pointer immediately.
    pub fn transition(&self) -> &'static str {
        if self.is_dragging() { "none" } else { TRANSITION }
    }

    /// Maps a point on the canvas element to content coordinates.
    pub fn screen_to_content(&self, screen: Point) -> Point {
        screen.scale(1.0 / self.zoom).sub_point(self.pan)
    }

    /// Maps a content point to canvas element coordinates.
    pub fn content_to_screen(&self, content: Point) -> Point {
        content.add_point(self.pan).scale(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_state() {
        let view = ViewState::new();
        assert_eq!(view.zoom(), 1.0);
        assert!(view.pan().is_zero());
        assert!(!view.is_dragging());
        assert_eq!(view.drag_anchor(), None);
    }

    #[test]
    fn test_zoom_in_clamps_at_max() {
        let mut view = ViewState::new();
        for _ in 0..40 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_out_clamps_at_min() {
        let mut view = ViewState::new();
        for _ in 0..40 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_steps() {
        let mut view = ViewState::new();
        view.zoom_in();
        assert_approx_eq!(f32, view.zoom(), 1.1, epsilon = 1e-5);
        view.zoom_out();
        view.zoom_out();
        assert_approx_eq!(f32, view.zoom(), 0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let mut view = ViewState::new();

        assert_eq!(view.wheel(-100.0, false), WheelOutcome::Ignored);
        assert_eq!(view.zoom(), 1.0);

        assert_eq!(view.wheel(-100.0, true), WheelOutcome::Handled);
        assert_approx_eq!(f32, view.zoom(), 1.1, epsilon = 1e-5);

        assert_eq!(view.wheel(200.0, true), WheelOutcome::Handled);
        assert_approx_eq!(f32, view.zoom(), 0.9, epsilon = 1e-5);

        view.wheel(1_000_000.0, true);
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_drag_pans() {
        let mut view = ViewState::new();

        view.pointer_down(PointerButton::Primary, Point::new(100.0, 100.0));
        assert!(view.is_dragging());
        assert_eq!(view.transition(), "none");

        view.pointer_move(Point::new(130.0, 90.0));
        view.pointer_move(Point::new(140.0, 95.0));
        assert_eq!(view.pan(), Point::new(40.0, -5.0));
        assert_eq!(view.drag_anchor(), Some(Point::new(140.0, 95.0)));

        view.pointer_up();
        assert!(!view.is_dragging());
        assert_ne!(view.transition(), "none");

        view.pointer_move(Point::new(500.0, 500.0));
        assert_eq!(view.pan(), Point::new(40.0, -5.0));
    }

    #[test]
    fn test_non_primary_button_is_ignored() {
        let mut view = ViewState::new();
        view.pointer_down(PointerButton::Secondary, Point::new(0.0, 0.0));
        view.pointer_move(Point::new(50.0, 50.0));

        assert!(!view.is_dragging());
        assert!(view.pan().is_zero());
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut view = ViewState::new();
        view.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0));
        view.pointer_leave();
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_reset() {
        let mut view = ViewState::new();
        view.zoom_in();
        view.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0));
        view.pointer_move(Point::new(10.0, 20.0));
        view.pointer_up();

        view.reset();
        assert_eq!(view.zoom(), 1.0);
        assert!(view.pan().is_zero());
    }

    #[test]
    fn test_transform_string() {
        let mut view = ViewState::new();
        assert_eq!(view.transform(), "scale(1) translate(0, 0)");

        view.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0));
        view.pointer_move(Point::new(25.0, -10.0));
        assert_eq!(view.transform(), "scale(1) translate(25, -10)");
    }

    #[test]
    fn test_screen_content_mapping() {
        let mut view = ViewState::new();
        view.zoom_in();
        view.zoom_in();
        view.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0));
        view.pointer_move(Point::new(30.0, 40.0));

        let content = Point::new(400.0, 80.0);
        let screen = view.content_to_screen(content);
        let back = view.screen_to_content(screen);

        assert_approx_eq!(f32, back.x(), content.x(), epsilon = 0.01);
        assert_approx_eq!(f32, back.y(), content.y(), epsilon = 0.01);
    }
}
