pub mod aabb;
pub mod broad_phase;
pub mod detection;
pub mod manifold;

pub use aabb::AABB;
pub use broad_phase::candidate_pairs;
pub use detection::{check_collision, find_collisions};
pub use manifold::{ContactPoint, Manifold};
