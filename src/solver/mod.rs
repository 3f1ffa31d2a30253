pub mod impulse;
pub mod positional;

pub use impulse::{resolve_collisions, resolve_contact, resolve_manifold, ContactImpulse};
pub use positional::{correct_positions, PositionalCorrection};
