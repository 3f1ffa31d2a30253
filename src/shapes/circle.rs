use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::common::error::{check_dimension, PhysicsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> PhysicsResult<Self> {
        Ok(Self { radius: check_dimension("circle radius", radius)? })
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Moment of inertia of a solid disc of `mass` about its centre.
    pub fn inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}
