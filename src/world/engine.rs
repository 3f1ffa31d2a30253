use log::{debug, warn};

use crate::collision::{find_collisions, Manifold};
use crate::common::PhysicsResult;
use crate::fields::{accumulate_forces, ForceField};
use crate::integration::integrate_all;
use crate::objects::RigidBody;
use crate::solver::{correct_positions, resolve_collisions};

use super::config::EngineConfig;
use super::observer::{CollisionObserver, ObserverId, ObserverList};

/// Stateless-in-bodies simulation core.
///
/// The engine owns force fields, collision observers and tuning; the caller
/// owns the bodies and hands them in on every [`step`](Self::step).
#[derive(Default)]
pub struct PhysicsEngine {
    fields: Vec<ForceField>,
    observers: ObserverList,
    config: EngineConfig,
}

impl PhysicsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) -> PhysicsResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Registers a global force generator. Fields persist until [`reset`](Self::reset).
    pub fn add_field(&mut self, field: ForceField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[ForceField] {
        &self.fields
    }

    /// Registers an observer that receives the manifold list after every step.
    pub fn register_collision_callback<O>(&mut self, observer: O) -> ObserverId
    where
        O: CollisionObserver + 'static,
    {
        self.observers.register(Box::new(observer))
    }

    /// Returns `false` when `id` was not registered.
    pub fn unregister_collision_callback(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Drops every field and observer, e.g. on level change. Tuning is kept.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.observers.clear();
    }

    /// Runs one simulation tick over `bodies` and returns the contacts found.
    ///
    /// Forces from every field are accumulated, bodies are integrated over
    /// `dt`, contacts are detected and then resolved with impulses. The same
    /// manifolds are handed to every registered observer before returning.
    ///
    /// A `dt` of zero only detects: nothing moves and no impulse is applied.
    /// Negative or non-finite `dt` is treated the same way.
    pub fn step(&mut self, bodies: &mut [RigidBody], dt: f64) -> Vec<Manifold> {
        let dt = self.effective_dt(dt);

        if dt > 0.0 {
            accumulate_forces(&self.fields, bodies);
            integrate_all(bodies, dt);
        }

        let manifolds = find_collisions(bodies);

        if dt > 0.0 {
            resolve_collisions(bodies, &manifolds, self.config.solver_iterations);
            if let Some(correction) = &self.config.positional_correction {
                correct_positions(correction, bodies, &manifolds);
            }
        }

        debug!(
            "step dt={:.5}: {} bodies, {} fields, {} manifolds",
            dt,
            bodies.len(),
            self.fields.len(),
            manifolds.len()
        );

        self.observers.notify(&manifolds);
        manifolds
    }

    fn effective_dt(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt < 0.0 {
            warn!("ignoring invalid time step {}; detecting only", dt);
            return 0.0;
        }
        match self.config.max_time_step {
            Some(max_dt) if dt > max_dt => {
                warn!("time step {} clamped to {}", dt, max_dt);
                max_dt
            }
            _ => dt,
        }
    }
}
