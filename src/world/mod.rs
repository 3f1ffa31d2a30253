pub mod config;
pub mod engine;
pub mod observer;
pub mod physics_world;

pub use config::EngineConfig;
pub use engine::PhysicsEngine;
pub use observer::{CollisionObserver, ObserverId};
pub use physics_world::PhysicsWorld;
