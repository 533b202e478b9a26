//! Camera over the map image: center, zoom and the bounds both are held to.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in content pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.x + self.width && p.y <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    center_x: f64,
    center_y: f64,
    zoom: f64,
    initial_zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    content_width: f64,
    content_height: f64,
    screen_width: f64,
    screen_height: f64,
}

impl Viewport {
    /// Centered on the content at the configured initial zoom.
    pub fn new(cfg: &GameConfig, screen_width: f64, screen_height: f64) -> Self {
        let mut vp = Self {
            center_x: cfg.content_width * 0.5,
            center_y: cfg.content_height * 0.5,
            zoom: cfg.initial_zoom,
            initial_zoom: cfg.initial_zoom,
            min_zoom: cfg.min_zoom,
            max_zoom: cfg.max_zoom,
            content_width: cfg.content_width,
            content_height: cfg.content_height,
            screen_width: screen_width.max(0.0),
            screen_height: screen_height.max(0.0),
        };
        vp.zoom = vp.clamp_zoom(cfg.initial_zoom);
        vp.clamp_center();
        vp
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }

    /// The single gate every zoom request passes before it is stored.
    /// Non-finite requests leave the current zoom in place.
    pub fn clamp_zoom(&self, requested: f64) -> f64 {
        if !requested.is_finite() {
            return self.zoom;
        }
        self.min_zoom.max(self.max_zoom.min(requested))
    }

    /// Commits a zoom about the viewport center.
    pub fn set_zoom(&mut self, requested: f64) {
        self.zoom = self.clamp_zoom(requested);
        self.clamp_center();
    }

    pub fn set_center(&mut self, center: Point) {
        self.center_x = center.x;
        self.center_y = center.y;
        self.clamp_center();
    }

    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_width = width.max(0.0);
        self.screen_height = height.max(0.0);
        self.clamp_center();
    }

    pub fn reset(&mut self) {
        self.zoom = self.clamp_zoom(self.initial_zoom);
        self.set_center(Point::new(self.content_width * 0.5, self.content_height * 0.5));
    }

    /// Content-space position of the screen's top-left corner.
    pub fn scroll_offset(&self) -> Point {
        Point::new(
            self.center_x - self.screen_width / (2.0 * self.zoom),
            self.center_y - self.screen_height / (2.0 * self.zoom),
        )
    }

    pub fn set_scroll_offset(&mut self, scroll: Point) {
        self.center_x = scroll.x + self.screen_width / (2.0 * self.zoom);
        self.center_y = scroll.y + self.screen_height / (2.0 * self.zoom);
        self.clamp_center();
    }

    pub fn screen_to_content(&self, p: Point) -> Point {
        let scroll = self.scroll_offset();
        Point::new(scroll.x + p.x / self.zoom, scroll.y + p.y / self.zoom)
    }

    /// Content area currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let scroll = self.scroll_offset();
        Rect {
            x: scroll.x,
            y: scroll.y,
            width: self.screen_width / self.zoom,
            height: self.screen_height / self.zoom,
        }
    }

    // An axis wider on screen than the content pins to the content midpoint.
    fn clamp_center(&mut self) {
        let visible_w = self.screen_width / self.zoom;
        let visible_h = self.screen_height / self.zoom;
        self.center_x = clamp_axis(self.center_x, visible_w, self.content_width);
        self.center_y = clamp_axis(self.center_y, visible_h, self.content_height);
    }
}

fn clamp_axis(center: f64, visible: f64, content: f64) -> f64 {
    if !center.is_finite() || visible >= content {
        return content * 0.5;
    }
    let half = visible * 0.5;
    center.clamp(half, content - half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn viewport(zoom: f64) -> Viewport {
        let cfg = GameConfig {
            initial_zoom: zoom,
            ..GameConfig::default()
        };
        Viewport::new(&cfg, 800.0, 600.0)
    }

    #[test]
    fn starts_centered_at_initial_zoom() {
        let vp = viewport(1.0);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.center(), Point::new(1500.0, 1000.0));
        let r = vp.visible_rect();
        assert!(approx(r.x, 1100.0) && approx(r.y, 700.0));
        assert!(approx(r.width, 800.0) && approx(r.height, 600.0));
    }

    #[test]
    fn visible_rect_culls_far_targets() {
        let vp = viewport(2.0);
        let r = vp.visible_rect();
        let near = Rect { x: 1450.0, y: 950.0, width: 100.0, height: 100.0 };
        let far = Rect { x: 2700.0, y: 650.0, width: 120.0, height: 120.0 };
        assert!(r.intersects(&near));
        assert!(!r.intersects(&far));
    }

    #[test]
    fn clamp_zoom_gates_range_and_non_finite() {
        let vp = viewport(1.0);
        assert_eq!(vp.clamp_zoom(0.1), 0.5);
        assert_eq!(vp.clamp_zoom(9.0), 2.0);
        assert_eq!(vp.clamp_zoom(1.3), 1.3);
        assert_eq!(vp.clamp_zoom(f64::NAN), 1.0);
        assert_eq!(vp.clamp_zoom(f64::INFINITY), 1.0);
    }

    #[test]
    fn center_stays_inside_content() {
        let mut vp = viewport(1.0);
        vp.set_center(Point::new(-500.0, 5000.0));
        assert_eq!(vp.center(), Point::new(400.0, 1700.0));
        let r = vp.visible_rect();
        assert!(approx(r.x, 0.0));
        assert!(approx(r.y + r.height, 2000.0));
    }

    #[test]
    fn overscanned_axis_pins_to_midpoint() {
        let mut vp = viewport(0.5);
        vp.set_screen_size(1920.0, 1080.0);
        // 3840 visible across 3000 of content; 2160 down 2000.
        vp.set_center(Point::new(100.0, 100.0));
        assert_eq!(vp.center(), Point::new(1500.0, 1000.0));
    }

    #[test]
    fn zoom_out_near_edge_reclamps_center() {
        let mut vp = viewport(2.0);
        vp.set_center(Point::new(200.0, 150.0));
        assert_eq!(vp.center(), Point::new(200.0, 150.0));
        vp.set_zoom(1.0);
        assert_eq!(vp.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn screen_midpoint_maps_to_center() {
        let mut vp = viewport(1.5);
        vp.set_center(Point::new(900.0, 800.0));
        let mid = vp.screen_to_content(Point::new(400.0, 300.0));
        assert!(approx(mid.x, 900.0) && approx(mid.y, 800.0));
        let corner = vp.screen_to_content(Point::new(0.0, 0.0));
        assert!(approx(corner.x, 900.0 - 400.0 / 1.5));
    }

    #[test]
    fn reset_restores_initial_view() {
        let mut vp = viewport(1.0);
        vp.set_zoom(2.0);
        vp.set_center(Point::new(300.0, 300.0));
        vp.reset();
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.center(), Point::new(1500.0, 1000.0));
    }
}
