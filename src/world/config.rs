use serde::{Deserialize, Serialize};

use crate::common::{PhysicsError, PhysicsResult};
use crate::solver::PositionalCorrection;

/// Tunables for [`PhysicsEngine`](super::PhysicsEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Passes over the manifold list per step.
    pub solver_iterations: usize,
    /// Upper bound applied to `dt` before integrating. `None` trusts the caller.
    pub max_time_step: Option<f64>,
    /// Position projection after velocity resolution. Off unless set.
    pub positional_correction: Option<PositionalCorrection>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver_iterations: 1,
            max_time_step: None,
            positional_correction: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        if self.solver_iterations == 0 {
            return Err(PhysicsError::InvalidConfig { what: "solver iterations", value: 0.0 });
        }
        if let Some(max_dt) = self.max_time_step {
            if !(max_dt > 0.0 && max_dt.is_finite()) {
                return Err(PhysicsError::InvalidConfig { what: "max time step", value: max_dt });
            }
        }
        if let Some(correction) = &self.positional_correction {
            correction.validate()?;
        }
        Ok(())
    }

    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_max_time_step(mut self, max_dt: f64) -> Self {
        self.max_time_step = Some(max_dt);
        self
    }

    pub fn with_positional_correction(mut self, correction: PositionalCorrection) -> Self {
        self.positional_correction = Some(correction);
        self
    }
}
