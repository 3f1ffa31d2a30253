use serde::{Deserialize, Serialize};

use crate::collision::AABB;
use crate::common::{Material, PhysicsError, PhysicsResult};
use crate::math::{Transform, Vec2};
use crate::shapes::{Circle, Rectangle, Shape};

/// Caller-owned classification bits. The engine stores and reports it but never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyTag(pub u32);

impl BodyTag {
    pub fn contains(self, other: BodyTag) -> bool {
        self.0 & other.0 == other.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry
    pub shape: Shape,
    pub material: Material,
    pub tag: BodyTag,

    // Primary state
    pub position: Vec2, // World position of the centre of mass
    pub rotation: f64,  // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators, cleared after every integration
    pub force: Vec2,
    pub torque: f64,

    // Mass properties. Immovable bodies carry mass 0 and both inverses 0.
    pub mass: f64,
    pub inv_mass: f64,
    pub inertia: f64,
    pub inv_inertia: f64,
}

impl RigidBody {
    /// Creates a body of uniform `density` at `position` with orientation `rotation`.
    ///
    /// Mass is `density × area`; inertia follows from the shape. A density of
    /// `f64::INFINITY` produces an immovable body with inverse mass and inverse
    /// inertia of exactly zero.
    pub fn new(shape: Shape, position: Vec2, rotation: f64, density: f64) -> PhysicsResult<Self> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "position" });
        }
        if !rotation.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "rotation" });
        }

        let (mass, inv_mass, inertia, inv_inertia) = if density == f64::INFINITY {
            (0.0, 0.0, f64::INFINITY, 0.0)
        } else if density > 0.0 && density.is_finite() {
            let mass = shape.area() * density;
            let inertia = shape.inertia(mass);
            if !(mass > 0.0 && inertia > 0.0 && mass.is_finite() && inertia.is_finite()) {
                return Err(PhysicsError::InvalidDensity(density));
            }
            (mass, 1.0 / mass, inertia, 1.0 / inertia)
        } else {
            return Err(PhysicsError::InvalidDensity(density));
        };

        Ok(Self {
            shape,
            material: Material::default(),
            tag: BodyTag::default(),
            position,
            rotation,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
        })
    }

    pub fn circle(radius: f64, position: Vec2, density: f64) -> PhysicsResult<Self> {
        Self::new(Shape::Circle(Circle::new(radius)?), position, 0.0, density)
    }

    /// Rectangle of full `width` × `height`, rotated by `rotation` radians.
    pub fn rectangle(
        width: f64,
        height: f64,
        position: Vec2,
        rotation: f64,
        density: f64,
    ) -> PhysicsResult<Self> {
        Self::new(Shape::Rectangle(Rectangle::new(width, height)?), position, rotation, density)
    }

    /// Immovable body: takes part in detection but never moves.
    pub fn new_static(shape: Shape, position: Vec2, rotation: f64) -> PhysicsResult<Self> {
        Self::new(shape, position, rotation, f64::INFINITY)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_tag(mut self, tag: BodyTag) -> Self {
        self.tag = tag;
        self
    }

    /// Sets initial velocities. Ignored for immovable bodies, which never move.
    pub fn with_velocity(mut self, linear: Vec2, angular: f64) -> Self {
        if !self.is_static() {
            self.linear_velocity = linear;
            self.angular_velocity = angular;
        }
        self
    }

    /// Checks that every kinematic quantity is finite and the mass properties are consistent.
    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.position.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "position" });
        }
        if !self.rotation.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "rotation" });
        }
        if !self.linear_velocity.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "linear velocity" });
        }
        if !self.angular_velocity.is_finite() {
            return Err(PhysicsError::NonFiniteState { what: "angular velocity" });
        }
        if !(self.inv_mass >= 0.0 && self.inv_mass.is_finite()) {
            return Err(PhysicsError::NonFiniteState { what: "inverse mass" });
        }
        if !(self.inv_inertia >= 0.0 && self.inv_inertia.is_finite()) {
            return Err(PhysicsError::NonFiniteState { what: "inverse inertia" });
        }
        self.material.validate()
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// World-space corners of a rectangle body, counter-clockwise. `None` for circles.
    pub fn world_vertices(&self) -> Option<[Vec2; 4]> {
        match &self.shape {
            Shape::Rectangle(rect) => {
                let transform = self.transform();
                Some(rect.local_vertices().map(|v| transform.apply(v)))
            }
            Shape::Circle(_) => None,
        }
    }

    /// World-space axis-aligned bounding box.
    pub fn aabb(&self) -> AABB {
        match &self.shape {
            Shape::Circle(circle) => {
                AABB::from_center(self.position, Vec2::new(circle.radius, circle.radius))
            }
            Shape::Rectangle(rect) => {
                // Extent along each world axis of a rotated box.
                let t = self.transform();
                let (ax, ay) = (t.axis_x(), t.axis_y());
                let h = rect.half_extents;
                let extent = Vec2::new(
                    h.x * ax.x.abs() + h.y * ay.x.abs(),
                    h.x * ax.y.abs() + h.y * ay.y.abs(),
                );
                AABB::from_center(self.position, extent)
            }
        }
    }

    /// Applies a force at the centre of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a world point, producing torque about the centre of mass.
    pub fn apply_force_at_point(&mut self, force: Vec2, point_world: Vec2) {
        self.force += force;
        self.torque += (point_world - self.position).cross(force);
    }

    /// Instantaneous change of momentum at offset `r` from the centre of mass.
    /// Immovable bodies are left untouched.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static() {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Velocity of the material point currently at `point_world`.
    pub fn velocity_at(&self, point_world: Vec2) -> Vec2 {
        let r = point_world - self.position;
        self.linear_velocity + Vec2::cross_scalar(self.angular_velocity, r)
    }

    /// Translational plus rotational kinetic energy. Zero for immovable bodies.
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.linear_velocity.magnitude_squared()
            + 0.5 * self.inertia * self.angular_velocity * self.angular_velocity
    }

    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
