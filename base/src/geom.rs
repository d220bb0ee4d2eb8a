/*!
 * Geometric primitives.
 *
 * Paths and transforms are publicly imported from tiny-skia-path.
 *
 * Unlike device space, typeset math has Y growing upwards:
 * the baseline is at y = 0, ascent is above and descent below.
 */

use strict_num::{FiniteF32, PositiveF32};
pub use tiny_skia_path::{Path, PathBuilder, Point, Transform};

/// A rectangle in 2D space reprensented by x, y, width and height.
///
/// `x` and `y` are the coordinates of the corner with the lowest values,
/// which is the bottom-left corner in math space.
/// Negative extents are clamped to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: FiniteF32,
    y: FiniteF32,
    w: PositiveF32,
    h: PositiveF32,
}

impl Rect {
    /// An empty rectangle at the origin
    pub fn null() -> Self {
        Rect::from_xywh(0.0, 0.0, 0.0, 0.0)
    }

    /// Build a rectangle from x, y, width and height.
    /// Non-finite values are replaced by zero.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect {
            x: finite(x),
            y: finite(y),
            w: positive(w),
            h: positive(h),
        }
    }

    /// The smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x().min(other.x());
        let y = self.y().min(other.y());
        let r = self.right().max(other.right());
        let t = self.top().max(other.top());
        Rect::from_xywh(x, y, r - x, t - y)
    }

    /// The X coordinate of the left side
    pub const fn x(&self) -> f32 {
        self.x.get()
    }

    /// The Y coordinate of the bottom side
    pub const fn y(&self) -> f32 {
        self.y.get()
    }

    /// The width of the rectangle
    pub const fn width(&self) -> f32 {
        self.w.get()
    }

    /// The height of the rectangle
    pub const fn height(&self) -> f32 {
        self.h.get()
    }

    /// The right X coordinate
    pub const fn right(&self) -> f32 {
        self.x.get() + self.w.get()
    }

    /// The top Y coordinate
    pub const fn top(&self) -> f32 {
        self.y.get() + self.h.get()
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn finite(v: f32) -> FiniteF32 {
    FiniteF32::new(sanitize(v)).unwrap_or_default()
}

fn positive(v: f32) -> PositiveF32 {
    PositiveF32::new(sanitize(v).max(0.0)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_union() {
        let a = Rect::from_xywh(0.0, -2.0, 4.0, 6.0);
        let b = Rect::from_xywh(3.0, -5.0, 4.0, 2.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::from_xywh(0.0, -5.0, 7.0, 9.0));
    }

    #[test]
    fn rect_negative_extent_is_clamped() {
        let r = Rect::from_xywh(1.0, 1.0, -3.0, 2.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 2.0);
    }
}
