//! Bounding boxes and pointer positions in viewport (client) coordinates

use serde::{Deserialize, Serialize};

/// A point in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's on-screen bounding box, as `getBoundingClientRect` reports it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Center relative to the box's own top-left corner
    pub fn half_extent(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Translate a client-space point into box-local coordinates
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Whether any part of the box lies within a viewport of the given height
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(rect.bottom(), 120.0);
        assert_eq!(rect.right(), 210.0);
        assert_eq!(rect.half_extent(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_to_local() {
        let rect = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(rect.to_local(Point::new(160.0, 45.0)), Point::new(150.0, 25.0));
    }

    #[test]
    fn test_intersects_viewport() {
        assert!(Rect::new(0.0, 0.0, 10.0, 1000.0).intersects_viewport(800.0));
        assert!(Rect::new(0.0, -300.0, 10.0, 1000.0).intersects_viewport(800.0));
        assert!(!Rect::new(0.0, 800.0, 10.0, 1000.0).intersects_viewport(800.0));
        assert!(!Rect::new(0.0, -1000.0, 10.0, 1000.0).intersects_viewport(800.0));
    }
}
