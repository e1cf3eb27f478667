//! Axis-aligned rectangle geometry for platforms, hitboxes and projectiles
//!
//! World space has +y pointing down (screen convention): `top` is the smaller y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance for "standing exactly on top of" checks
pub const REST_EPSILON: f32 = 1e-3;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center of the bottom edge
    #[inline]
    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect,
    /// and degenerate rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not
    pub fn contains_point(&self, p: Vec2) -> bool {
        !self.is_degenerate()
            && p.x >= self.x
            && p.x < self.right()
            && p.y >= self.y
            && p.y < self.bottom()
    }

    /// True when this rectangle stands exactly on top of `platform`:
    /// bottom edge level with the platform top and the mid-bottom point over it.
    pub fn rests_on(&self, platform: &Rect) -> bool {
        (self.bottom() - platform.top()).abs() <= REST_EPSILON
            && platform.contains_point(Vec2::new(self.mid_bottom().x, platform.top()))
    }
}

/// Collision box anchored at an entity's position, independent of sprite size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub const fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
        }
    }

    /// World-space rectangle for an entity at `pos`
    #[inline]
    pub fn at(&self, pos: Vec2) -> Rect {
        Rect::new(
            pos.x + self.offset_x,
            pos.y + self.offset_y,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    }

    #[test]
    fn test_degenerate_never_collides() {
        let platform = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!Rect::new(10.0, 10.0, 0.0, 20.0).intersects(&platform));
        assert!(!platform.intersects(&Rect::new(10.0, 10.0, 20.0, -5.0)));
        assert!(!Rect::new(0.0, 0.0, 0.0, 0.0).contains_point(Vec2::ZERO));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_rests_on() {
        let platform = Rect::new(100.0, 500.0, 200.0, 50.0);
        let standing = Rect::new(150.0, 440.0, 30.0, 60.0);
        assert!(standing.rests_on(&platform));
        assert!(!standing.intersects(&platform));

        // Mid-bottom off the platform's left edge
        let overhanging = Rect::new(60.0, 440.0, 30.0, 60.0);
        assert!(!overhanging.rests_on(&platform));

        // Hovering
        let hovering = Rect::new(150.0, 430.0, 30.0, 60.0);
        assert!(!hovering.rests_on(&platform));
    }

    #[test]
    fn test_hitbox_at() {
        let hb = Hitbox::new(49.0, 68.0, 30.0, 60.0);
        let r = hb.at(Vec2::new(100.0, 372.0));
        assert_eq!(r, Rect::new(149.0, 440.0, 30.0, 60.0));
        assert_eq!(r.bottom(), 500.0);
    }
}
