//! Sequential impulse contact solver.
//!
//! Contacts are handled one at a time in the order detection produced them.
//! Each contact gets a normal impulse (non-penetration with restitution)
//! followed by a friction impulse bounded by the Coulomb cone. Both bodies'
//! linear and angular velocities change; positions do not.

use log::trace;

use crate::collision::{ContactPoint, Manifold};
use crate::math::vec2::Vec2;
use crate::objects::RigidBody;

/// Tangential speeds below this are treated as no sliding.
const TANGENT_EPSILON: f64 = 1e-9;

/// Impulse magnitudes applied at one contact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactImpulse {
    pub normal: f64,
    pub tangent: f64,
}

/// Mutable references to two distinct bodies of the same slice.
/// `None` when the indices coincide or are out of range.
pub(crate) fn body_pair_mut(
    bodies: &mut [RigidBody],
    idx_a: usize,
    idx_b: usize,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }
    if idx_a < idx_b {
        let (head, tail) = bodies.split_at_mut(idx_b);
        Some((&mut head[idx_a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(idx_a);
        Some((&mut tail[0], &mut head[idx_b]))
    }
}

/// Velocity of `b` relative to `a` at the world point `point`.
pub fn relative_velocity(a: &RigidBody, b: &RigidBody, point: Vec2) -> Vec2 {
    b.velocity_at(point) - a.velocity_at(point)
}

/// Generalised inverse mass of the pair along `direction` at lever arms `r_a`, `r_b`:
/// `Σ inv_mass + (r × d)² inv_inertia`.
pub fn effective_inv_mass(
    a: &RigidBody,
    b: &RigidBody,
    r_a: Vec2,
    r_b: Vec2,
    direction: Vec2,
) -> f64 {
    let ra_cross = r_a.cross(direction);
    let rb_cross = r_b.cross(direction);
    a.inv_mass
        + b.inv_mass
        + ra_cross * ra_cross * a.inv_inertia
        + rb_cross * rb_cross * b.inv_inertia
}

/// Applies `impulse` to `b` and its opposite to `a`, both at `point`.
fn apply_impulse_pair(a: &mut RigidBody, b: &mut RigidBody, point: Vec2, impulse: Vec2) {
    let r_a = point - a.position;
    let r_b = point - b.position;
    a.apply_impulse(-impulse, r_a);
    b.apply_impulse(impulse, r_b);
}

/// Resolves a single contact between `a` (first) and `b` (second).
/// `normal` is the unit normal pointing from `a` to `b`.
pub fn resolve_contact(
    a: &mut RigidBody,
    b: &mut RigidBody,
    normal: Vec2,
    contact: &ContactPoint,
) -> ContactImpulse {
    if a.is_static() && b.is_static() {
        return ContactImpulse::default();
    }

    let point = contact.point;
    let r_a = point - a.position;
    let r_b = point - b.position;

    // Normal impulse
    let v_rel = relative_velocity(a, b, point);
    let v_normal = v_rel.dot(normal);
    let k_normal = effective_inv_mass(a, b, r_a, r_b, normal);
    if k_normal <= 0.0 {
        return ContactImpulse::default();
    }

    let restitution = a.material.combined_restitution(&b.material);
    let j = (-(1.0 + restitution) * v_normal / k_normal).max(0.0);
    if j <= 0.0 {
        // Separating or resting: the friction cone has zero width.
        return ContactImpulse::default();
    }
    apply_impulse_pair(a, b, point, normal * j);

    // Friction impulse, from the post-normal-impulse relative velocity
    let v_rel = relative_velocity(a, b, point);
    let tangential = v_rel - normal * v_rel.dot(normal);
    if tangential.magnitude_squared() < TANGENT_EPSILON * TANGENT_EPSILON {
        return ContactImpulse { normal: j, tangent: 0.0 };
    }
    let tangent = tangential.normalize();
    let k_tangent = effective_inv_mass(a, b, r_a, r_b, tangent);
    if k_tangent <= 0.0 {
        return ContactImpulse { normal: j, tangent: 0.0 };
    }

    let friction = a.material.combined_friction(&b.material);
    let max_friction = friction * j;
    if !(max_friction > 0.0) {
        return ContactImpulse { normal: j, tangent: 0.0 };
    }
    let mut jt = -v_rel.dot(tangent) / k_tangent;
    if max_friction.is_finite() {
        jt = jt.clamp(-max_friction, max_friction);
    }
    apply_impulse_pair(a, b, point, tangent * jt);

    ContactImpulse { normal: j, tangent: jt }
}

/// Resolves every contact of one manifold, in order.
pub fn resolve_manifold(bodies: &mut [RigidBody], manifold: &Manifold) -> Vec<ContactImpulse> {
    let Some((a, b)) = body_pair_mut(bodies, manifold.first, manifold.second) else {
        return Vec::new();
    };
    manifold
        .contacts
        .iter()
        .map(|contact| {
            let impulse = resolve_contact(a, b, manifold.normal, contact);
            trace!(
                "impulse {}-{} at {:?}: normal={:.4} tangent={:.4}",
                manifold.first,
                manifold.second,
                contact.point,
                impulse.normal,
                impulse.tangent
            );
            impulse
        })
        .collect()
}

/// Runs `iterations` passes over all manifolds, each in production order.
pub fn resolve_collisions(bodies: &mut [RigidBody], manifolds: &[Manifold], iterations: usize) {
    for _ in 0..iterations {
        for manifold in manifolds {
            resolve_manifold(bodies, manifold);
        }
    }
}
