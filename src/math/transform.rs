use super::vec2::Vec2;

/// A rigid transform: rotation about the origin followed by translation.
///
/// Used to move between a body's local frame (centred on its centre of mass,
/// axes aligned with its orientation) and world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64,
    cos: f64,
    sin: f64,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self { position, rotation, cos, sin }
    }

    /// Rotates a direction into world space without translating it.
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.cos - v.y * self.sin, v.x * self.sin + v.y * self.cos)
    }

    /// Rotates a world direction into the local frame.
    pub fn rotate_inverse(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.cos + v.y * self.sin, -v.x * self.sin + v.y * self.cos)
    }

    /// Maps a local point to world space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotate(point) + self.position
    }

    /// Maps a world point into the local frame.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        self.rotate_inverse(point - self.position)
    }

    /// World-space direction of the local x axis.
    pub fn axis_x(&self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// World-space direction of the local y axis.
    pub fn axis_y(&self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }
}
