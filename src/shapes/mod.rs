pub mod circle;
pub mod rectangle;

pub use circle::Circle;
pub use rectangle::Rectangle;

use serde::{Deserialize, Serialize};

/// Geometric shape of a rigid body. Collision dispatch matches on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.area(),
            Shape::Rectangle(r) => r.area(),
        }
    }

    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Shape::Circle(c) => c.inertia(mass),
            Shape::Rectangle(r) => r.inertia(mass),
        }
    }
}
