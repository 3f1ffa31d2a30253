use serde::{Deserialize, Serialize};

use crate::common::error::{check_dimension, PhysicsResult};
use crate::math::vec2::Vec2;

/// An oriented rectangle described by its half-extents in the body's local frame.
///
/// The orientation itself lives on the owning body (`RigidBody::rotation`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub half_extents: Vec2,
}

impl Rectangle {
    /// Creates a rectangle from its full width and height.
    pub fn new(width: f64, height: f64) -> PhysicsResult<Self> {
        let width = check_dimension("rectangle width", width)?;
        let height = check_dimension("rectangle height", height)?;
        Ok(Self { half_extents: Vec2::new(width / 2.0, height / 2.0) })
    }

    pub fn width(&self) -> f64 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f64 {
        self.half_extents.y * 2.0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Moment of inertia of a solid rectangle of `mass` about its centre: m (w² + h²) / 12.
    pub fn inertia(&self, mass: f64) -> f64 {
        let w = self.width();
        let h = self.height();
        mass * (w * w + h * h) / 12.0
    }

    /// Corners in the local frame, counter-clockwise starting bottom-left.
    pub fn local_vertices(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
    }
}
