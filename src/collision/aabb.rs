// Axis-aligned bounding boxes for the broad-phase reject test.

use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a box from two corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        AABB {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        AABB::new(center - half_extents, center + half_extents)
    }

    /// Inclusive overlap: boxes that merely touch still count, so the narrow
    /// phase gets the final say on borderline pairs.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}
