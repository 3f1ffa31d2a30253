pub mod force_field;

pub use force_field::{ForceField, DEFAULT_GRAVITY};

use crate::objects::RigidBody;

/// Adds the contribution of every field to every body's force accumulator.
pub fn accumulate_forces(fields: &[ForceField], bodies: &mut [RigidBody]) {
    for body in bodies.iter_mut() {
        for field in fields {
            field.apply(body);
        }
    }
}
