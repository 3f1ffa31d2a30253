pub mod error;
pub mod material;

pub use error::{PhysicsError, PhysicsResult};
pub use material::Material;
