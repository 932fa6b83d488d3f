use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in 2D world space.
///
/// Invariant: min.x <= max.x and min.y <= max.y.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Create a rectangle from two corners. Automatically sorts
    /// components so that min <= max on both axes.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a rectangle from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        Self::new(center - half, center + half)
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns true if this rectangle overlaps with other
    /// (including touching edges).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Returns a new rectangle shrunk by `margin` on each side,
    /// per axis independently. An axis too small to shrink collapses
    /// to its center line instead of inverting.
    pub fn shrink(&self, margin: Vec2) -> Rect {
        let center = self.center();
        let half = (self.size() * 0.5 - margin).max(Vec2::ZERO);
        Rect {
            min: center - half,
            max: center + half,
        }
    }

    /// Clamp a point into the rectangle, each axis independently.
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Returns true if the rectangle has zero area
    /// (degenerate on at least one axis).
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    /// Returns true if all four components are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}
