use log::trace;

use super::broad_phase::candidate_pairs;
use super::manifold::{ContactPoint, Manifold};
use crate::math::vec2::Vec2;
use crate::objects::RigidBody;
use crate::shapes::{Rectangle, Shape};

/// A rectangle axis only replaces the current best axis if it is shallower by
/// more than this. Keeps the choice stable when two axes tie.
const AXIS_TOLERANCE: f64 = 1e-9;

/// Finds every overlapping pair in `bodies`.
///
/// Each unordered pair is tested at most once, in `(i, j)` order with `i < j`;
/// pairs of two immovable bodies are never tested.
pub fn find_collisions(bodies: &[RigidBody]) -> Vec<Manifold> {
    candidate_pairs(bodies)
        .into_iter()
        .filter_map(|(i, j)| check_collision(&bodies[i], i, &bodies[j], j))
        .filter(Manifold::is_valid)
        .collect()
}

/// Narrow-phase test for one pair. The returned manifold's normal points from
/// `body_a` towards `body_b`.
pub fn check_collision(
    body_a: &RigidBody,
    body_a_idx: usize,
    body_b: &RigidBody,
    body_b_idx: usize,
) -> Option<Manifold> {
    if body_a_idx == body_b_idx {
        return None;
    }
    let manifold = match (&body_a.shape, &body_b.shape) {
        (Shape::Circle(_), Shape::Circle(_)) => {
            check_circle_circle(body_a, body_a_idx, body_b, body_b_idx)
        }
        (Shape::Circle(_), Shape::Rectangle(_)) => {
            check_circle_rectangle(body_a, body_a_idx, body_b, body_b_idx)
        }
        (Shape::Rectangle(_), Shape::Circle(_)) => {
            check_circle_rectangle(body_b, body_b_idx, body_a, body_a_idx).map(Manifold::flipped)
        }
        (Shape::Rectangle(_), Shape::Rectangle(_)) => {
            check_rectangle_rectangle(body_a, body_a_idx, body_b, body_b_idx)
        }
    };
    if let Some(m) = &manifold {
        trace!(
            "contact {}-{}: normal={:?} contacts={} depth={:.4}",
            m.first,
            m.second,
            m.normal,
            m.contacts.len(),
            m.max_depth()
        );
    }
    manifold
}

/// Checks for collision between two circles.
///
/// The single contact sits halfway between the two boundary points on the
/// centre-to-centre axis.
pub fn check_circle_circle(
    body_a: &RigidBody,
    body_a_idx: usize,
    body_b: &RigidBody,
    body_b_idx: usize,
) -> Option<Manifold> {
    let (circle_a, circle_b) = match (&body_a.shape, &body_b.shape) {
        (Shape::Circle(a), Shape::Circle(b)) => (a, b),
        _ => return None,
    };

    let dist_vec = body_b.position - body_a.position;
    let dist_sq = dist_vec.magnitude_squared();
    let radii_sum = circle_a.radius + circle_b.radius;

    if dist_sq >= radii_sum * radii_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let depth = radii_sum - distance;
    let normal = if distance > 1e-10 {
        dist_vec * (1.0 / distance)
    } else {
        // Concentric circles: any direction separates them.
        Vec2::UNIT_Y
    };

    let surface_a = body_a.position + normal * circle_a.radius;
    let surface_b = body_b.position - normal * circle_b.radius;
    let point = (surface_a + surface_b) * 0.5;

    Some(Manifold::new(
        body_a_idx,
        body_b_idx,
        normal,
        vec![ContactPoint::new(normal, depth, point)],
    ))
}

/// Checks for collision between a circle (first) and a rectangle (second).
///
/// The circle centre is moved into the rectangle's frame and clamped to its
/// half-extents; the clamped point is the nearest point of the rectangle and
/// becomes the contact point. A centre inside the rectangle is pushed out
/// through the nearest face.
pub fn check_circle_rectangle(
    circle_body: &RigidBody,
    circle_body_idx: usize,
    rect_body: &RigidBody,
    rect_body_idx: usize,
) -> Option<Manifold> {
    let (circle, rect) = match (&circle_body.shape, &rect_body.shape) {
        (Shape::Circle(c), Shape::Rectangle(r)) => (c, r),
        _ => return None,
    };

    let frame = rect_body.transform();
    let local_center = frame.apply_inverse(circle_body.position);
    let h = rect.half_extents;
    let closest = local_center.clamp(-h, h);

    // Normal in the rectangle frame, pointing from the rectangle towards the circle.
    let (local_normal, depth, local_contact) = if closest == local_center {
        let gap_x = h.x - local_center.x.abs();
        let gap_y = h.y - local_center.y.abs();
        if gap_x < gap_y {
            let sign = if local_center.x < 0.0 { -1.0 } else { 1.0 };
            (
                Vec2::new(sign, 0.0),
                circle.radius + gap_x,
                Vec2::new(sign * h.x, local_center.y),
            )
        } else {
            let sign = if local_center.y < 0.0 { -1.0 } else { 1.0 };
            (
                Vec2::new(0.0, sign),
                circle.radius + gap_y,
                Vec2::new(local_center.x, sign * h.y),
            )
        }
    } else {
        let offset = local_center - closest;
        let dist_sq = offset.magnitude_squared();
        if dist_sq >= circle.radius * circle.radius {
            return None;
        }
        let distance = dist_sq.sqrt();
        (offset * (1.0 / distance), circle.radius - distance, closest)
    };

    let normal = -frame.rotate(local_normal);
    let point = frame.apply(local_contact);

    Some(Manifold::new(
        circle_body_idx,
        rect_body_idx,
        normal,
        vec![ContactPoint::new(normal, depth, point)],
    ))
}

/// A rectangle body flattened into world-space centre, axes and half-extents.
#[derive(Debug, Clone, Copy)]
struct OrientedBox {
    center: Vec2,
    axes: [Vec2; 2],
    half: [f64; 2],
}

impl OrientedBox {
    fn new(body: &RigidBody, rect: &Rectangle) -> Self {
        let frame = body.transform();
        OrientedBox {
            center: body.position,
            axes: [frame.axis_x(), frame.axis_y()],
            half: [rect.half_extents.x, rect.half_extents.y],
        }
    }

    /// Half-length of the box's shadow on `axis`.
    fn projected_radius(&self, axis: Vec2) -> f64 {
        self.half[0] * self.axes[0].dot(axis).abs() + self.half[1] * self.axes[1].dot(axis).abs()
    }

    /// Index of the local axis most aligned (in either direction) with `direction`.
    fn dominant_axis(&self, direction: Vec2) -> usize {
        if self.axes[0].dot(direction).abs() >= self.axes[1].dot(direction).abs() {
            0
        } else {
            1
        }
    }

    fn vertices(&self) -> [Vec2; 4] {
        let ex = self.axes[0] * self.half[0];
        let ey = self.axes[1] * self.half[1];
        [
            self.center - ex - ey,
            self.center + ex - ey,
            self.center + ex + ey,
            self.center - ex + ey,
        ]
    }
}

/// Keeps the part of segment `points` with `normal · p <= offset`.
fn clip_segment(points: &[Vec2], normal: Vec2, offset: f64) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(2);
    if points.len() < 2 {
        out.extend(points.iter().copied().filter(|p| normal.dot(*p) - offset <= 0.0));
        return out;
    }

    let (p0, p1) = (points[0], points[1]);
    let d0 = normal.dot(p0) - offset;
    let d1 = normal.dot(p1) - offset;

    if d0 <= 0.0 {
        out.push(p0);
    }
    if d1 <= 0.0 {
        out.push(p1);
    }
    if d0 * d1 < 0.0 {
        let t = d0 / (d0 - d1);
        out.push(p0 + (p1 - p0) * t);
    }
    out
}

/// Checks for collision between two oriented rectangles.
///
/// Separating-axis test over the four face normals. The shallowest axis is the
/// contact normal; its owner provides the reference face, and the other box's
/// most anti-parallel face (the incident edge) is clipped against the
/// reference face's side planes. Clipped points behind the reference face are
/// the contacts, so edge-on-edge contact yields two points and a corner yields one.
pub fn check_rectangle_rectangle(
    body_a: &RigidBody,
    body_a_idx: usize,
    body_b: &RigidBody,
    body_b_idx: usize,
) -> Option<Manifold> {
    let (rect_a, rect_b) = match (&body_a.shape, &body_b.shape) {
        (Shape::Rectangle(a), Shape::Rectangle(b)) => (a, b),
        _ => return None,
    };
    let box_a = OrientedBox::new(body_a, rect_a);
    let box_b = OrientedBox::new(body_b, rect_b);
    let center_delta = box_b.center - box_a.center;

    // (overlap, axis, axis belongs to A)
    let mut best: Option<(f64, Vec2, bool)> = None;
    let candidates = box_a
        .axes
        .iter()
        .map(|&axis| (axis, true))
        .chain(box_b.axes.iter().map(|&axis| (axis, false)));
    for (axis, from_a) in candidates {
        let overlap = box_a.projected_radius(axis) + box_b.projected_radius(axis)
            - center_delta.dot(axis).abs();
        if overlap <= 0.0 {
            return None;
        }
        match best {
            Some((best_overlap, _, _)) if overlap >= best_overlap - AXIS_TOLERANCE => {}
            _ => best = Some((overlap, axis, from_a)),
        }
    }
    let (min_overlap, axis, from_a) = best?;
    let normal = if center_delta.dot(axis) < 0.0 { -axis } else { axis };

    // Reference face normal points out of the reference box towards the incident box.
    let (reference, incident, ref_normal) = if from_a {
        (&box_a, &box_b, normal)
    } else {
        (&box_b, &box_a, -normal)
    };

    let face_axis = reference.dominant_axis(ref_normal);
    let side_axis = 1 - face_axis;
    let side = reference.axes[side_axis];
    let side_extent = reference.half[side_axis];
    let front = ref_normal.dot(reference.center) + reference.half[face_axis];

    let inc_axis = incident.dominant_axis(ref_normal);
    let inc_normal = if incident.axes[inc_axis].dot(ref_normal) > 0.0 {
        -incident.axes[inc_axis]
    } else {
        incident.axes[inc_axis]
    };
    let inc_center = incident.center + inc_normal * incident.half[inc_axis];
    let inc_along = incident.axes[1 - inc_axis] * incident.half[1 - inc_axis];
    let incident_edge = [inc_center - inc_along, inc_center + inc_along];

    let side_center = side.dot(reference.center);
    let clipped = clip_segment(&incident_edge, -side, side_extent - side_center);
    let clipped = clip_segment(&clipped, side, side_extent + side_center);

    let mut contacts: Vec<ContactPoint> = clipped
        .into_iter()
        .filter_map(|p| {
            let separation = ref_normal.dot(p) - front;
            (separation <= 0.0).then(|| ContactPoint::new(normal, -separation, p))
        })
        .collect();

    if contacts.is_empty() {
        // Degenerate clip (nearly parallel edges at a corner): fall back to the
        // deepest incident vertex and the SAT depth.
        let deepest = incident
            .vertices()
            .into_iter()
            .min_by(|p, q| ref_normal.dot(*p).total_cmp(&ref_normal.dot(*q)))?;
        contacts.push(ContactPoint::new(normal, min_overlap, deepest));
    }

    Some(Manifold::new(body_a_idx, body_b_idx, normal, contacts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};
    const EPSILON: f64 = 1e-9;

    fn circle(radius: f64, x: f64, y: f64) -> RigidBody {
        RigidBody::circle(radius, Vec2::new(x, y), 1.0).unwrap()
    }

    fn rect(w: f64, h: f64, x: f64, y: f64, rotation: f64) -> RigidBody {
        RigidBody::rectangle(w, h, Vec2::new(x, y), rotation, 1.0).unwrap()
    }

    fn assert_vec(a: Vec2, b: Vec2) {
        assert!((a - b).magnitude() < EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_circle_circle_no_collision() {
        let a = circle(1.0, 0.0, 0.0);
        let b = circle(1.0, 2.5, 0.0);
        assert!(check_circle_circle(&a, 0, &b, 1).is_none());
    }

    #[test]
    fn test_circle_circle_touching_is_not_contact() {
        let a = circle(1.0, 0.0, 0.0);
        let b = circle(1.0, 2.0, 0.0);
        assert!(check_circle_circle(&a, 0, &b, 1).is_none());
    }

    #[test]
    fn test_circle_circle_colliding() {
        let a = circle(1.0, 0.0, 0.0);
        let b = circle(1.0, 1.5, 0.0);
        let m = check_circle_circle(&a, 0, &b, 1).unwrap();

        assert_eq!((m.first, m.second), (0, 1));
        assert_vec(m.normal, Vec2::UNIT_X);
        assert_eq!(m.contacts.len(), 1);
        assert!((m.contacts[0].depth() - 0.5).abs() < EPSILON);
        assert_vec(m.contacts[0].overlap, Vec2::new(0.5, 0.0));
        // Boundary points (1,0) and (0.5,0); contact halfway between.
        assert_vec(m.contacts[0].point, Vec2::new(0.75, 0.0));
    }

    #[test]
    fn test_circle_circle_concentric() {
        let a = circle(2.0, 0.0, 0.0);
        let b = circle(1.0, 0.0, 0.0);
        let m = check_circle_circle(&a, 0, &b, 1).unwrap();
        assert!((m.max_depth() - 3.0).abs() < EPSILON);
        assert_vec(m.normal, Vec2::UNIT_Y);
    }

    #[test]
    fn test_circle_rectangle_outside_face() {
        let c = circle(1.0, 0.0, 1.8);
        let r = rect(4.0, 2.0, 0.0, 0.0, 0.0);
        let m = check_circle_rectangle(&c, 0, &r, 1).unwrap();

        assert_eq!((m.first, m.second), (0, 1));
        // From the circle down into the rectangle.
        assert_vec(m.normal, Vec2::new(0.0, -1.0));
        assert!((m.max_depth() - 0.2).abs() < EPSILON);
        assert_vec(m.contacts[0].point, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_circle_rectangle_near_corner_misses() {
        // Within the AABB of the corner but farther than the radius from it.
        let c = circle(1.0, 2.8, 1.8);
        let r = rect(4.0, 2.0, 0.0, 0.0, 0.0);
        assert!(check_circle_rectangle(&c, 0, &r, 1).is_none());
    }

    #[test]
    fn test_circle_rectangle_rotated() {
        // Rectangle rotated 90 degrees: its long side is now vertical.
        let r = rect(4.0, 2.0, 0.0, 0.0, PI / 2.0);
        let c = circle(1.0, 1.5, 0.0);
        let m = check_circle_rectangle(&c, 0, &r, 1).unwrap();
        assert_vec(m.normal, Vec2::new(-1.0, 0.0));
        assert!((m.max_depth() - 0.5).abs() < EPSILON);
        assert_vec(m.contacts[0].point, Vec2::new(1.0, 0.0));

        let far = circle(1.0, 0.0, 2.8);
        assert!(check_circle_rectangle(&far, 0, &r, 1).is_some());
        let farther = circle(1.0, 0.0, 3.1);
        assert!(check_circle_rectangle(&farther, 0, &r, 1).is_none());
    }

    #[test]
    fn test_circle_centre_inside_rectangle() {
        let c = circle(0.5, 1.5, 0.2);
        let r = rect(4.0, 2.0, 0.0, 0.0, 0.0);
        let m = check_circle_rectangle(&c, 0, &r, 1).unwrap();
        // Nearest face is x = +2, 0.5 away.
        assert_vec(m.normal, Vec2::new(-1.0, 0.0));
        assert!((m.max_depth() - 1.0).abs() < EPSILON);
        assert_vec(m.contacts[0].point, Vec2::new(2.0, 0.2));
    }

    #[test]
    fn test_rectangle_circle_order_is_preserved() {
        let r = rect(4.0, 2.0, 0.0, 0.0, 0.0);
        let c = circle(1.0, 0.0, 1.8);
        let m = check_collision(&r, 0, &c, 1).unwrap();
        assert_eq!((m.first, m.second), (0, 1));
        // Points from the rectangle (first) to the circle (second).
        assert_vec(m.normal, Vec2::UNIT_Y);
        assert_vec(m.contacts[0].overlap, Vec2::new(0.0, 0.2));
    }

    #[test]
    fn test_rectangles_separated() {
        let a = rect(2.0, 2.0, 0.0, 0.0, 0.0);
        let b = rect(2.0, 2.0, 2.5, 0.0, 0.0);
        assert!(check_rectangle_rectangle(&a, 0, &b, 1).is_none());

        // AABBs overlap but a rotated box's face separates them.
        let diamond = rect(2.0, 2.0, 2.3, 2.3, PI / 4.0);
        assert!(check_rectangle_rectangle(&a, 0, &diamond, 1).is_none());
    }

    #[test]
    fn test_rectangles_edge_on_edge_gives_two_contacts() {
        let a = rect(2.0, 2.0, 0.0, 0.0, 0.0);
        let b = rect(2.0, 2.0, 1.5, 0.0, 0.0);
        let m = check_rectangle_rectangle(&a, 0, &b, 1).unwrap();

        assert_vec(m.normal, Vec2::UNIT_X);
        assert_eq!(m.contacts.len(), 2);
        for contact in &m.contacts {
            assert_vec(contact.overlap, Vec2::new(0.5, 0.0));
            assert!((contact.point.x - 0.5).abs() < EPSILON);
        }
        let ys: Vec<f64> = m.contacts.iter().map(|c| c.point.y).collect();
        assert!(ys.iter().any(|y| (y + 1.0).abs() < EPSILON));
        assert!(ys.iter().any(|y| (y - 1.0).abs() < EPSILON));
    }

    #[test]
    fn test_rectangles_partial_edge_overlap_is_clipped() {
        // Small box resting across the top-right corner of a wide one.
        let ground = rect(4.0, 1.0, 0.0, 0.0, 0.0);
        let block = rect(2.0, 1.0, 2.0, 0.9, 0.0);
        let m = check_rectangle_rectangle(&ground, 0, &block, 1).unwrap();

        assert_vec(m.normal, Vec2::UNIT_Y);
        assert_eq!(m.contacts.len(), 2);
        let mut xs: Vec<f64> = m.contacts.iter().map(|c| c.point.x).collect();
        xs.sort_by(f64::total_cmp);
        // Block spans x in [1, 3], clipped to the ground's [-2, 2].
        assert!((xs[0] - 1.0).abs() < EPSILON);
        assert!((xs[1] - 2.0).abs() < EPSILON);
        for contact in &m.contacts {
            assert!((contact.depth() - 0.1).abs() < EPSILON);
        }
    }

    #[test]
    fn test_rectangle_corner_gives_one_contact() {
        let a = rect(2.0, 2.0, 0.0, 0.0, 0.0);
        // Diamond balanced on its corner, 0.1 deep into A's top face.
        let b = rect(2.0, 2.0, 0.0, 1.0 + SQRT_2 - 0.1, PI / 4.0);
        let m = check_rectangle_rectangle(&a, 0, &b, 1).unwrap();

        assert_vec(m.normal, Vec2::UNIT_Y);
        assert_eq!(m.contacts.len(), 1);
        assert_vec(m.contacts[0].point, Vec2::new(0.0, 0.9));
        assert!((m.contacts[0].depth() - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_rectangle_reference_face_on_second_body() {
        // The diamond is first; the shallowest axis belongs to the second box.
        let diamond = rect(2.0, 2.0, 0.0, 1.0 + SQRT_2 - 0.1, PI / 4.0);
        let floor = rect(2.0, 2.0, 0.0, 0.0, 0.0);
        let m = check_rectangle_rectangle(&diamond, 0, &floor, 1).unwrap();

        // Still points from first (diamond) to second (floor).
        assert_vec(m.normal, Vec2::new(0.0, -1.0));
        assert_eq!(m.contacts.len(), 1);
        assert_vec(m.contacts[0].overlap, Vec2::new(0.0, -0.1));
        assert_vec(m.contacts[0].point, Vec2::new(0.0, 0.9));
    }

    #[test]
    fn test_clip_segment() {
        let seg = [Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0)];
        let clipped = clip_segment(&seg, Vec2::UNIT_X, 1.0);
        assert_eq!(clipped.len(), 2);
        assert_vec(clipped[0], Vec2::new(-2.0, 0.0));
        assert_vec(clipped[1], Vec2::new(1.0, 0.0));

        let gone = clip_segment(&seg, Vec2::UNIT_X, -3.0);
        assert!(gone.is_empty());
    }

    #[test]
    fn test_oriented_box_projection() {
        let body = rect(2.0, 4.0, 0.0, 0.0, PI / 4.0);
        let rect_shape = match body.shape {
            Shape::Rectangle(r) => r,
            _ => unreachable!(),
        };
        let obb = OrientedBox::new(&body, &rect_shape);
        // (1 + 2) / sqrt(2) on either world axis.
        assert!((obb.projected_radius(Vec2::UNIT_X) - 3.0 * FRAC_1_SQRT_2).abs() < EPSILON);
    }

    #[test]
    fn test_find_collisions_is_complete_and_ordered() {
        let bodies = vec![
            circle(1.0, 0.0, 0.0),
            circle(1.0, 1.5, 0.0),
            circle(1.0, 10.0, 0.0),
            rect(4.0, 1.0, 0.0, -1.2, 0.0),
        ];
        let manifolds = find_collisions(&bodies);
        let pairs: Vec<(usize, usize)> = manifolds.iter().map(|m| (m.first, m.second)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 3)]);
        assert!(manifolds.iter().all(Manifold::is_valid));
    }

    #[test]
    fn test_find_collisions_skips_static_pairs() {
        let bodies = vec![
            RigidBody::rectangle(4.0, 1.0, Vec2::ZERO, 0.0, f64::INFINITY).unwrap(),
            RigidBody::rectangle(4.0, 1.0, Vec2::new(0.5, 0.0), 0.0, f64::INFINITY).unwrap(),
        ];
        assert!(find_collisions(&bodies).is_empty());
    }
}
