//! Axis-aligned rectangles for spawn placement and collision
//!
//! Screen space: origin top-left, y grows downward.

use glam::Vec2;

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Overlap test with strict inequalities: boxes that only share an edge
    /// do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point strictly inside (edges excluded)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left() && point.x < self.right() && point.y > self.top() && point.y < self.bottom()
    }

    /// Area of the intersection (0 when disjoint)
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.bottom().min(other.bottom()) - self.top().max(other.top());
        w.max(0.0) * h.max(0.0)
    }

    /// Shrink by `fraction` of the size on every side, keeping the center
    pub fn inset(&self, fraction: f32) -> Rect {
        let margin = self.size * fraction;
        Rect {
            pos: self.pos + margin,
            size: self.size - margin * 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_intersects() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(20.0, 0.0, 10.0, 10.0)));
        // Sharing an edge is not an overlap
        assert!(!a.intersects(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_inset() {
        let hitbox = rect(100.0, 200.0, 110.0, 150.0).inset(0.2);
        assert!((hitbox.left() - 122.0).abs() < 1e-4);
        assert!((hitbox.top() - 230.0).abs() < 1e-4);
        assert!((hitbox.size.x - 66.0).abs() < 1e-4);
        assert!((hitbox.size.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlap_area() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.overlap_area(&rect(5.0, 5.0, 10.0, 10.0)), 25.0);
        assert_eq!(a.overlap_area(&rect(50.0, 50.0, 1.0, 1.0)), 0.0);
    }
}
