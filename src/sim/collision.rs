//! Axis-aligned bounding box overlap tests
//!
//! Everything in the world is a rectangle: the player, enemies, and
//! projectiles all collide through the same half-open AABB test.

use glam::Vec2;

/// An axis-aligned bounding box (top-left anchored, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict-overlap intersection test (touching edges do not collide)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));

        // Separated only on the y axis
        let c = Aabb::new(Vec2::new(0.0, 30.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(40.0, 40.0), Vec2::new(5.0, 5.0));
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_center() {
        let b = Aabb::new(Vec2::new(40.0, 45.0), Vec2::new(20.0, 10.0));
        assert_eq!(b.center(), Vec2::new(50.0, 50.0));
    }
}
