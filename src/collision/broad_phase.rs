use crate::objects::RigidBody;

use super::aabb::AABB;

/// All-pairs broad phase.
///
/// Yields each unordered pair `(i, j)` with `i < j` at most once. Pairs where
/// both bodies are immovable are dropped, as are pairs whose bounding boxes do
/// not touch. Quadratic in the body count, which is fine for the tens of
/// bodies a level holds.
pub fn candidate_pairs(bodies: &[RigidBody]) -> Vec<(usize, usize)> {
    let boxes: Vec<AABB> = bodies.iter().map(RigidBody::aabb).collect();
    let mut pairs = Vec::new();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if bodies[i].is_static() && bodies[j].is_static() {
                continue;
            }
            if !boxes[i].overlaps(&boxes[j]) {
                continue;
            }
            pairs.push((i, j));
        }
    }
    pairs
}
