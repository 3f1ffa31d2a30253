use crate::objects::RigidBody;

/// Advances one body by `dt` using semi-implicit (symplectic) Euler.
///
/// Velocity is updated from the accumulated force and torque first, then
/// position and orientation from the new velocity. Accumulators are cleared
/// afterwards. Immovable bodies never move; only their accumulators reset.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    if body.is_static() {
        body.clear_accumulators();
        return;
    }

    // v += F/m dt, then x += v dt
    body.linear_velocity += body.force * (body.inv_mass * dt);
    body.position += body.linear_velocity * dt;

    // w += T/I dt, then theta += w dt
    body.angular_velocity += body.torque * body.inv_inertia * dt;
    body.rotation = wrap_angle(body.rotation + body.angular_velocity * dt);

    body.clear_accumulators();
}

/// Integrates every body in the slice.
pub fn integrate_all(bodies: &mut [RigidBody], dt: f64) {
    for body in bodies.iter_mut() {
        integrate(body, dt);
    }
}

/// Wraps an angle in radians to [-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}
