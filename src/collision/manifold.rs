use crate::math::vec2::Vec2;

/// One point of overlap between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoint {
    /// Minimum translation that pushes the second body out of the first,
    /// along the manifold normal. Its length is the penetration depth.
    pub overlap: Vec2,
    /// World-space location of the contact.
    pub point: Vec2,
}

impl ContactPoint {
    pub fn new(normal: Vec2, depth: f64, point: Vec2) -> Self {
        Self { overlap: normal * depth, point }
    }

    pub fn depth(&self) -> f64 {
        self.overlap.magnitude()
    }
}

/// Contact between exactly two bodies, found by the narrow phase.
///
/// `first` and `second` index the body slice that was stepped; the manifold
/// does not own or borrow the bodies and is only meaningful for the frame it
/// was produced in.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifold {
    pub first: usize,
    pub second: usize,
    /// Unit contact normal, pointing from `first` towards `second`.
    pub normal: Vec2,
    /// One contact for circle and vertex contacts, two for edge-on-edge rectangles.
    pub contacts: Vec<ContactPoint>,
}

impl Manifold {
    pub fn new(first: usize, second: usize, normal: Vec2, contacts: Vec<ContactPoint>) -> Self {
        Self { first, second, normal, contacts }
    }

    /// True when the manifold describes real contact between two distinct bodies.
    pub fn is_valid(&self) -> bool {
        self.first != self.second && !self.contacts.is_empty()
    }

    pub fn max_depth(&self) -> f64 {
        self.contacts.iter().map(ContactPoint::depth).fold(0.0, f64::max)
    }

    pub fn involves(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }

    /// The body on the other side of the contact from `index`, if `index` takes part.
    pub fn other(&self, index: usize) -> Option<usize> {
        if self.first == index {
            Some(self.second)
        } else if self.second == index {
            Some(self.first)
        } else {
            None
        }
    }

    /// Swaps the roles of the two bodies, flipping every direction.
    pub fn flipped(mut self) -> Self {
        std::mem::swap(&mut self.first, &mut self.second);
        self.normal = -self.normal;
        for contact in &mut self.contacts {
            contact.overlap = -contact.overlap;
        }
        self
    }
}
