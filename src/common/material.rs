//! Surface properties that govern contact response.

use serde::{Deserialize, Serialize};

use super::error::{PhysicsError, PhysicsResult};

/// Restitution and friction of a body's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution in [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient in [0, infinity).
    pub friction: f64,
}

impl Material {
    /// Creates a material, clamping the coefficients into their valid ranges.
    /// NaN becomes 0 and infinite friction becomes `f64::MAX`.
    pub fn new(restitution: f64, friction: f64) -> Self {
        let restitution = if restitution.is_nan() { 0.0 } else { restitution.clamp(0.0, 1.0) };
        let friction = if friction.is_nan() { 0.0 } else { friction.clamp(0.0, f64::MAX) };
        Material { restitution, friction }
    }

    /// Like [`Material::new`] but rejects out-of-range or NaN coefficients instead of clamping.
    pub fn try_new(restitution: f64, friction: f64) -> PhysicsResult<Self> {
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidMaterial { what: "restitution", value: restitution });
        }
        if !(friction >= 0.0 && friction.is_finite()) {
            return Err(PhysicsError::InvalidMaterial { what: "friction", value: friction });
        }
        Ok(Material { restitution, friction })
    }

    /// Checks coefficients written directly through the public fields.
    pub fn validate(&self) -> PhysicsResult<()> {
        Material::try_new(self.restitution, self.friction).map(|_| ())
    }

    /// Restitution used for a contact between `self` and `other`: the minimum of the two.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact between `self` and `other`: the minimum of the two.
    pub fn combined_friction(&self, other: &Material) -> f64 {
        self.friction.min(other.friction)
    }
}

impl Default for Material {
    /// Moderate restitution, moderate friction.
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.5,
        }
    }
}
