use log::trace;
use serde::{Deserialize, Serialize};

use crate::collision::Manifold;
use crate::common::{PhysicsError, PhysicsResult};
use crate::objects::RigidBody;

use super::impulse::body_pair_mut;

/// Linear projection that pushes overlapping bodies apart after the velocity pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionalCorrection {
    /// Fraction of the excess penetration removed per step, in `(0, 1]`.
    pub percent: f64,
    /// Penetration tolerated without correction.
    pub slop: f64,
}

impl Default for PositionalCorrection {
    fn default() -> Self {
        Self { percent: 0.2, slop: 0.01 }
    }
}

impl PositionalCorrection {
    pub fn validate(&self) -> PhysicsResult<()> {
        if !(self.percent > 0.0 && self.percent <= 1.0) {
            return Err(PhysicsError::InvalidConfig {
                what: "positional correction percent",
                value: self.percent,
            });
        }
        if !(self.slop >= 0.0 && self.slop.is_finite()) {
            return Err(PhysicsError::InvalidConfig {
                what: "positional correction slop",
                value: self.slop,
            });
        }
        Ok(())
    }

    /// Moves the two bodies of `manifold` apart along its normal, split by inverse mass.
    pub fn apply(&self, bodies: &mut [RigidBody], manifold: &Manifold) {
        let excess = (manifold.max_depth() - self.slop).max(0.0);
        if excess < 1e-9 {
            return;
        }
        let Some((a, b)) = body_pair_mut(bodies, manifold.first, manifold.second) else {
            return;
        };

        let total_inv_mass = a.inv_mass + b.inv_mass;
        if total_inv_mass <= 0.0 {
            return;
        }

        let correction = manifold.normal * (excess / total_inv_mass * self.percent);
        a.position -= correction * a.inv_mass;
        b.position += correction * b.inv_mass;
        trace!(
            "positional correction {}-{}: excess={:.4} shift={:?}",
            manifold.first,
            manifold.second,
            excess,
            correction
        );
    }
}

pub fn correct_positions(
    correction: &PositionalCorrection,
    bodies: &mut [RigidBody],
    manifolds: &[Manifold],
) {
    for manifold in manifolds {
        correction.apply(bodies, manifold);
    }
}
