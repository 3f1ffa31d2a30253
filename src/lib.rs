//! Discrete-time 2D rigid-body simulation for small arcade levels.
//!
//! Each [`PhysicsEngine::step`] accumulates field forces, integrates bodies,
//! detects pairwise contacts between circles and oriented rectangles, and
//! resolves them with restitution and friction impulses. The contacts found
//! are returned to the caller, who decides what they mean for the game.

pub mod collision;
pub mod common;
pub mod fields;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use collision::{ContactPoint, Manifold, AABB};
pub use common::{Material, PhysicsError, PhysicsResult};
pub use fields::ForceField;
pub use math::{Transform, Vec2};
pub use objects::{BodyTag, RigidBody};
pub use shapes::{Circle, Rectangle, Shape};
pub use solver::PositionalCorrection;
pub use world::{CollisionObserver, EngineConfig, ObserverId, PhysicsEngine, PhysicsWorld};
