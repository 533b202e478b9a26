//! Pointer and wheel input turned into viewport changes.
//!
//! Drag pans so the content point grabbed at pointer-down stays under the
//! pointer. A second pointer starts a pinch, which suppresses dragging until
//! one of the two pointers lifts. Wheel and pinch both zoom about the viewport
//! center and go through [`Viewport::set_zoom`], so the zoom clamp is applied
//! no matter which gesture asked for the change.

use super::viewport::{Point, Viewport};

/// Multiplicative wheel step; keeps the perceived zoom rate constant.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Pointers tracked for gestures; any further pointer is ignored.
pub const MAX_TRACKED_POINTERS: usize = 2;

pub type PointerId = i32;

#[derive(Clone, Debug, Default)]
pub struct PointerState {
    pointers: Vec<(PointerId, Point)>,
}

impl PointerState {
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Returns false when the pointer could not be tracked (set is full).
    fn insert(&mut self, id: PointerId, pos: Point) -> bool {
        if let Some(slot) = self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            slot.1 = pos;
            return true;
        }
        if self.pointers.len() >= MAX_TRACKED_POINTERS {
            return false;
        }
        self.pointers.push((id, pos));
        true
    }

    fn update(&mut self, id: PointerId, pos: Point) -> bool {
        match self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            Some(slot) => {
                slot.1 = pos;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: PointerId) -> bool {
        let before = self.pointers.len();
        self.pointers.retain(|(pid, _)| *pid != id);
        self.pointers.len() != before
    }

    fn pair_distance(&self) -> Option<f64> {
        match self.pointers.as_slice() {
            [(_, a), (_, b)] => Some(a.distance(*b)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    /// Content-space point under the pointer when the drag began.
    pub anchor: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchState {
    pub active: bool,
    pub initial_distance: f64,
    pub initial_zoom: f64,
}

impl PinchState {
    /// Ratio of the current to the starting pointer distance.
    /// Coincident starting pointers yield 1 so zoom never becomes NaN or infinite.
    pub fn scale_factor(&self, current_distance: f64) -> f64 {
        if self.initial_distance <= 0.0 || !self.initial_distance.is_finite() {
            return 1.0;
        }
        let scale = current_distance / self.initial_distance;
        if scale.is_finite() { scale } else { 1.0 }
    }
}

#[derive(Clone, Debug)]
pub struct ViewportController {
    viewport: Viewport,
    pointers: PointerState,
    drag: DragState,
    pinch: PinchState,
    input_enabled: bool,
}

impl ViewportController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointers: PointerState::default(),
            drag: DragState::default(),
            pinch: PinchState::default(),
            input_enabled: true,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[cfg(test)]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    #[cfg(test)]
    pub fn pinch(&self) -> PinchState {
        self.pinch
    }

    pub fn pointers(&self) -> &PointerState {
        &self.pointers
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Disabling cancels any gesture in flight; pointer-up is still honoured.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled == enabled {
            return;
        }
        self.input_enabled = enabled;
        if !enabled {
            self.drag.active = false;
            self.pinch.active = false;
        }
    }

    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.viewport.set_screen_size(width, height);
    }

    /// Back to the initial view with no gesture or pointer tracked.
    pub fn reset(&mut self) {
        self.viewport.reset();
        self.pointers = PointerState::default();
        self.drag = DragState::default();
        self.pinch = PinchState::default();
    }

    pub fn pointer_down(&mut self, id: PointerId, pos: Point) {
        if !self.input_enabled {
            return;
        }
        if !self.pointers.insert(id, pos) {
            log::trace!("ignoring pointer {id}: already tracking two");
            return;
        }
        match self.pointers.len() {
            1 if !self.pinch.active => {
                self.drag = DragState {
                    active: true,
                    anchor: self.viewport.screen_to_content(pos),
                };
            }
            2 => {
                self.drag.active = false;
                self.pinch = PinchState {
                    active: true,
                    initial_distance: self.pointers.pair_distance().unwrap_or(0.0),
                    initial_zoom: self.viewport.zoom(),
                };
                log::trace!("pinch start distance={}", self.pinch.initial_distance);
            }
            _ => {}
        }
    }

    pub fn pointer_move(&mut self, id: PointerId, pos: Point) {
        if !self.input_enabled || !self.pointers.update(id, pos) {
            return;
        }
        if self.pinch.active {
            if let Some(distance) = self.pointers.pair_distance() {
                let scale = self.pinch.scale_factor(distance);
                self.viewport.set_zoom(self.pinch.initial_zoom * scale);
            }
            return;
        }
        if self.drag.active {
            let zoom = self.viewport.zoom();
            let anchor = self.drag.anchor;
            self.viewport
                .set_scroll_offset(Point::new(anchor.x - pos.x / zoom, anchor.y - pos.y / zoom));
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        if !self.pointers.remove(id) {
            return;
        }
        self.drag.active = false;
        if self.pinch.active {
            self.pinch.active = false;
            log::trace!("pinch end zoom={}", self.viewport.zoom());
        }
    }

    /// Positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        self.step_zoom(delta_y < 0.0);
    }

    /// One wheel notch; also backs the on-screen zoom buttons.
    pub fn step_zoom(&mut self, zoom_in: bool) {
        if !self.input_enabled {
            return;
        }
        let step = if zoom_in { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
        self.viewport.set_zoom(self.viewport.zoom() * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    const EPS: f64 = 1e-9;

    fn controller(initial_zoom: f64) -> ViewportController {
        let cfg = GameConfig {
            initial_zoom,
            ..GameConfig::default()
        };
        ViewportController::new(Viewport::new(&cfg, 800.0, 600.0))
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn wheel_steps_are_multiplicative_and_clamped() {
        let mut c = controller(0.5);
        c.wheel(1.0);
        assert_eq!(c.viewport().zoom(), 0.5);
        c.wheel(-1.0);
        assert!((c.viewport().zoom() - 0.55).abs() < EPS);
        for _ in 0..50 {
            c.wheel(-120.0);
        }
        assert_eq!(c.viewport().zoom(), 2.0);
    }

    #[test]
    fn wheel_keeps_center() {
        let mut c = controller(1.0);
        let before = c.viewport().center();
        c.wheel(-1.0);
        assert_close(c.viewport().center(), before);
    }

    #[test]
    fn zero_wheel_delta_does_nothing() {
        let mut c = controller(1.0);
        c.wheel(0.0);
        assert_eq!(c.viewport().zoom(), 1.0);
    }

    #[test]
    fn drag_keeps_anchor_under_pointer() {
        let mut c = controller(1.0);
        let start = Point::new(400.0, 300.0);
        let anchor = c.viewport().screen_to_content(start);
        c.pointer_down(1, start);
        assert!(c.drag().active);
        for p in [Point::new(300.0, 250.0), Point::new(520.0, 410.0), Point::new(390.0, 280.0)] {
            c.pointer_move(1, p);
            assert_close(c.viewport().screen_to_content(p), anchor);
        }
        c.pointer_up(1);
        assert!(!c.drag().active);
    }

    #[test]
    fn drag_anchor_holds_when_zoomed_in() {
        let mut c = controller(2.0);
        let start = Point::new(100.0, 100.0);
        let anchor = c.viewport().screen_to_content(start);
        c.pointer_down(7, start);
        let end = Point::new(180.0, 40.0);
        c.pointer_move(7, end);
        assert_close(c.viewport().screen_to_content(end), anchor);
    }

    #[test]
    fn second_pointer_turns_drag_into_pinch() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(100.0, 100.0));
        c.pointer_down(2, Point::new(200.0, 100.0));
        assert!(!c.drag().active);
        let pinch = c.pinch();
        assert!(pinch.active);
        assert!((pinch.initial_distance - 100.0).abs() < EPS);
        assert_eq!(pinch.initial_zoom, 1.0);

        let center = c.viewport().center();
        c.pointer_move(2, Point::new(250.0, 100.0));
        assert!((c.viewport().zoom() - 1.5).abs() < EPS);
        assert_close(c.viewport().center(), center);

        // Single-pointer moves do not pan while pinching.
        c.pointer_move(1, Point::new(50.0, 100.0));
        assert!((c.viewport().zoom() - 2.0).abs() < EPS);
        assert_close(c.viewport().center(), center);
    }

    #[test]
    fn pinch_is_clamped() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(0.0, 0.0));
        c.pointer_down(2, Point::new(100.0, 0.0));
        c.pointer_move(2, Point::new(1000.0, 0.0));
        assert_eq!(c.viewport().zoom(), 2.0);
        c.pointer_move(2, Point::new(1.0, 0.0));
        assert_eq!(c.viewport().zoom(), 0.5);
    }

    #[test]
    fn coincident_pinch_start_leaves_zoom_alone() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(300.0, 300.0));
        c.pointer_down(2, Point::new(300.0, 300.0));
        assert_eq!(c.pinch().initial_distance, 0.0);
        c.pointer_move(2, Point::new(500.0, 300.0));
        let zoom = c.viewport().zoom();
        assert!(zoom.is_finite());
        assert_eq!(zoom, 1.0);
    }

    #[test]
    fn lifting_either_pointer_ends_pinch_without_resuming_drag() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(100.0, 100.0));
        c.pointer_down(2, Point::new(200.0, 200.0));
        c.pointer_up(1);
        assert!(!c.pinch().active);
        assert!(!c.drag().active);
        assert_eq!(c.pointers().len(), 1);

        let center = c.viewport().center();
        c.pointer_move(2, Point::new(400.0, 400.0));
        assert_close(c.viewport().center(), center);

        c.pointer_up(2);
        assert!(c.pointers().is_empty());
        c.pointer_down(3, Point::new(10.0, 10.0));
        assert!(c.drag().active);
    }

    #[test]
    fn third_pointer_is_ignored() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(0.0, 0.0));
        c.pointer_down(2, Point::new(100.0, 0.0));
        c.pointer_down(3, Point::new(50.0, 50.0));
        assert_eq!(c.pointers().len(), 2);
        c.pointer_up(3);
        assert!(c.pinch().active);
    }

    #[test]
    fn zoom_stays_in_range_over_mixed_gestures() {
        let mut c = controller(0.5);
        let deltas = [-3.0, -1.0, 2.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0, 1.0, 4.0];
        for (i, d) in deltas.iter().enumerate() {
            c.wheel(*d);
            let spread = 10.0 + (i as f64) * 37.0;
            c.pointer_down(1, Point::new(200.0, 200.0));
            c.pointer_down(2, Point::new(210.0, 200.0));
            c.pointer_move(2, Point::new(200.0 + spread, 200.0));
            c.pointer_up(1);
            c.pointer_up(2);
            let z = c.viewport().zoom();
            assert!((0.5..=2.0).contains(&z), "zoom {z} escaped range");
        }
    }

    #[test]
    fn disabled_input_cancels_and_ignores_gestures() {
        let mut c = controller(1.0);
        c.pointer_down(1, Point::new(100.0, 100.0));
        c.set_input_enabled(false);
        assert!(!c.drag().active);
        let center = c.viewport().center();
        c.pointer_move(1, Point::new(300.0, 300.0));
        c.wheel(-1.0);
        assert_close(c.viewport().center(), center);
        assert_eq!(c.viewport().zoom(), 1.0);
        c.pointer_up(1);
        assert!(c.pointers().is_empty());
    }

    #[test]
    fn scale_factor_guards_degenerate_distances() {
        let p = PinchState {
            active: true,
            initial_distance: 0.0,
            initial_zoom: 1.0,
        };
        assert_eq!(p.scale_factor(50.0), 1.0);
        let p = PinchState {
            initial_distance: 20.0,
            ..p
        };
        assert_eq!(p.scale_factor(40.0), 2.0);
    }
}
