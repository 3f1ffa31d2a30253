use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;
use crate::objects::RigidBody;

/// Standard gravitational acceleration used by [`ForceField::default_gravity`].
pub const DEFAULT_GRAVITY: f64 = 10.0;

/// A global force generator, evaluated once per body per step.
///
/// Every variant is a pure function of the body it is applied to and always
/// acts at the centre of mass, so fields never produce torque. Immovable bodies
/// receive no force from any field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForceField {
    /// Same acceleration for every body regardless of mass (force = mass × acceleration).
    UniformAcceleration { acceleration: Vec2 },
    /// Same force for every body; lighter bodies accelerate more.
    UniformForce { force: Vec2 },
    /// Velocity-proportional drag, force = −coefficient × velocity.
    LinearDrag { coefficient: f64 },
}

impl ForceField {
    /// Uniform downward field of strength `g`, pointing along −y.
    pub fn gravitational(g: f64) -> Self {
        ForceField::UniformAcceleration { acceleration: Vec2::new(0.0, -g) }
    }

    pub fn default_gravity() -> Self {
        Self::gravitational(DEFAULT_GRAVITY)
    }

    /// Force this field exerts on `body` in its current state.
    pub fn force_on(&self, body: &RigidBody) -> Vec2 {
        if body.is_static() {
            return Vec2::ZERO;
        }
        match *self {
            ForceField::UniformAcceleration { acceleration } => acceleration * body.mass,
            ForceField::UniformForce { force } => force,
            ForceField::LinearDrag { coefficient } => body.linear_velocity * -coefficient,
        }
    }

    /// Adds this field's contribution to the body's force accumulator.
    pub fn apply(&self, body: &mut RigidBody) {
        let force = self.force_on(body);
        body.apply_force(force);
    }
}
