use crate::collision::Manifold;
use crate::common::{PhysicsError, PhysicsResult};
use crate::fields::ForceField;
use crate::math::vec2::Vec2;
use crate::objects::RigidBody;
use crate::shapes::Shape;

use super::config::EngineConfig;
use super::engine::PhysicsEngine;
use super::observer::{CollisionObserver, ObserverId};

/// Index-addressed body arena bundled with an engine.
///
/// Body indices are positions in the arena and appear as-is in manifolds.
/// Removing a body shifts every later index down by one.
#[derive(Default)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    engine: PhysicsEngine,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> PhysicsResult<Self> {
        Ok(Self { bodies: Vec::new(), engine: PhysicsEngine::with_config(config)? })
    }

    /// Adds a body and returns its index.
    pub fn add_body(&mut self, body: RigidBody) -> PhysicsResult<usize> {
        body.validate()?;
        let index = self.bodies.len();
        self.bodies.push(body);
        Ok(index)
    }

    /// Adds an immovable body built from `shape`.
    pub fn add_static_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        rotation: f64,
    ) -> PhysicsResult<usize> {
        let body = RigidBody::new_static(shape, position, rotation)?;
        self.add_body(body)
    }

    pub fn remove_body(&mut self, index: usize) -> PhysicsResult<RigidBody> {
        self.check_index(index)?;
        Ok(self.bodies.remove(index))
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Level teardown: drops every body, keeps fields and observers.
    pub fn clear_bodies(&mut self) {
        self.bodies.clear();
    }

    /// Drops bodies, fields and observers.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.engine.reset();
    }

    pub fn add_field(&mut self, field: ForceField) {
        self.engine.add_field(field);
    }

    pub fn register_collision_callback<O>(&mut self, observer: O) -> ObserverId
    where
        O: CollisionObserver + 'static,
    {
        self.engine.register_collision_callback(observer)
    }

    pub fn unregister_collision_callback(&mut self, id: ObserverId) -> bool {
        self.engine.unregister_collision_callback(id)
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.engine
    }

    /// Advances every body by `dt` seconds. See [`PhysicsEngine::step`].
    pub fn step(&mut self, dt: f64) -> Vec<Manifold> {
        self.engine.step(&mut self.bodies, dt)
    }

    fn check_index(&self, index: usize) -> PhysicsResult<()> {
        if index < self.bodies.len() {
            Ok(())
        } else {
            Err(PhysicsError::BodyIndexOutOfRange { index, len: self.bodies.len() })
        }
    }
}
