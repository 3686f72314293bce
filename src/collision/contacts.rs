//! Contact-point extraction for pairs already known to overlap.
//!
//! Runs after the separating-axis pass and only reads its normal, to push
//! points from a shape's core out to its rounded surface. Normal and depth
//! are never written here.

use super::detection::PairKind;
use super::manifold::ContactManifold;
use super::sat::{closest_point_on_segment, WorldShape};
use crate::math::vec2::Vec2;
use crate::shapes::ShapeTag;

/// Keeps the closest candidate, plus a second one when another candidate
/// ties with it at a different location (face-to-face contact).
#[derive(Debug, Clone, Copy)]
struct ContactAccumulator {
    tolerance: f64,
    min_dist_sq: f64,
    points: [Vec2; 2],
    count: usize,
}

impl ContactAccumulator {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            min_dist_sq: f64::INFINITY,
            points: [Vec2::ZERO; 2],
            count: 0,
        }
    }

    fn offer(&mut self, point: Vec2, dist_sq: f64) {
        if (dist_sq - self.min_dist_sq).abs() < self.tolerance
            && !point.nearly_equal(self.points[0], self.tolerance)
        {
            self.points[1] = point;
            self.count = 2;
        } else if dist_sq < self.min_dist_sq {
            self.min_dist_sq = dist_sq;
            self.points[0] = point;
            self.count = 1;
        }
    }

    fn points(&self) -> &[Vec2] {
        &self.points[..self.count]
    }
}

/// Fills the contact points of an intersecting manifold.
///
/// Points are reported on the surfaces: circle and line-width cores are
/// offset by their skin along the manifold normal.
pub fn find_contact_points(
    a: &WorldShape,
    b: &WorldShape,
    manifold: &mut ContactManifold,
    tolerance: f64,
) {
    let normal = manifold.normal;
    let kind = PairKind::of(a.tag(), b.tag());
    if !kind.involves_circle() {
        let mut acc = ContactAccumulator::new(tolerance);
        vertex_edge_pass(a, b, -normal * b.skin(), &mut acc);
        vertex_edge_pass(b, a, normal * a.skin(), &mut acc);
        manifold.set_contacts(acc.points());
        return;
    }

    let contact = if kind == PairKind::CircleCircle {
        a.center() + normal * a.skin()
    } else if a.tag() == ShapeTag::Circle {
        circle_contact(a.center(), b, -normal)
    } else {
        circle_contact(b.center(), a, normal)
    };
    manifold.set_contacts(&[contact]);
}

/// Closest point on `other`'s surface to a circle center. `towards_circle`
/// is the unit direction from `other` to the circle.
fn circle_contact(center: Vec2, other: &WorldShape, towards_circle: Vec2) -> Vec2 {
    let mut closest = other.center();
    let mut min_dist_sq = f64::INFINITY;
    for (v1, v2) in other.edges() {
        let (point, dist_sq) = closest_point_on_segment(center, v1, v2);
        if dist_sq < min_dist_sq {
            min_dist_sq = dist_sq;
            closest = point;
        }
    }
    closest + towards_circle * other.skin()
}

/// Offers every core point of `from` against every edge of `to`. `offset`
/// moves the closest point from `to`'s core onto its surface.
fn vertex_edge_pass(from: &WorldShape, to: &WorldShape, offset: Vec2, acc: &mut ContactAccumulator) {
    for &p in from.core_points() {
        for (v1, v2) in to.edges() {
            let (point, dist_sq) = closest_point_on_segment(p, v1, v2);
            acc.offer(point + offset, dist_sq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::sat;
    const EPSILON: f64 = 1e-9;
    const TOLERANCE: f64 = 5e-4;

    fn square(center: Vec2, half: f64) -> Vec<Vec2> {
        vec![
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ]
    }

    fn collide(a: &WorldShape, b: &WorldShape) -> ContactManifold {
        let mut m = ContactManifold::new(0, 0, 1, 1);
        assert!(sat::intersect(a, b, &mut m));
        find_contact_points(a, b, &mut m, TOLERANCE);
        m
    }

    #[test]
    fn test_accumulator_keeps_ties_at_distinct_points() {
        let mut acc = ContactAccumulator::new(TOLERANCE);
        acc.offer(Vec2::new(1.0, 0.0), 4.0);
        acc.offer(Vec2::new(1.0, 0.0), 4.0);
        assert_eq!(acc.points().len(), 1);
        acc.offer(Vec2::new(2.0, 0.0), 4.0);
        assert_eq!(acc.points(), &[Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]);
        acc.offer(Vec2::new(3.0, 0.0), 1.0);
        assert_eq!(acc.points(), &[Vec2::new(3.0, 0.0)]);
        acc.offer(Vec2::new(9.0, 0.0), 2.0);
        assert_eq!(acc.points(), &[Vec2::new(3.0, 0.0)]);
    }

    #[test]
    fn test_offset_boxes_give_two_contacts() {
        let va = square(Vec2::ZERO, 5.0);
        let vb = square(Vec2::new(0.1, 0.1), 5.0);
        let a = WorldShape::Polygon { vertices: &va, center: Vec2::ZERO };
        let b = WorldShape::Polygon { vertices: &vb, center: Vec2::new(0.1, 0.1) };
        let m = collide(&a, &b);
        assert_eq!(m.contact_count(), 2);
        let (c1, c2) = (m.contact1().unwrap(), m.contact2().unwrap());
        assert!(!c1.nearly_equal(c2, TOLERANCE));
    }

    #[test]
    fn test_small_box_on_big_box_reports_both_corners() {
        let va = square(Vec2::ZERO, 1.0);
        let vb = square(Vec2::new(0.0, 1.4), 0.5);
        let a = WorldShape::Polygon { vertices: &va, center: Vec2::ZERO };
        let b = WorldShape::Polygon { vertices: &vb, center: Vec2::new(0.0, 1.4) };
        let m = collide(&a, &b);
        assert!((m.normal.y - 1.0).abs() < EPSILON);
        assert!((m.depth - 0.1).abs() < EPSILON);
        assert_eq!(m.contact_count(), 2);
        let (c1, c2) = (m.contact1().unwrap(), m.contact2().unwrap());
        assert!((c1.y - 1.0).abs() < EPSILON && (c2.y - 1.0).abs() < EPSILON);
        assert!((c1.x + 0.5).abs() < EPSILON);
        assert!((c2.x - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_circle_circle_contact_on_surface_of_a() {
        let a = WorldShape::Circle { center: Vec2::ZERO, radius: 5.0 };
        let b = WorldShape::Circle { center: Vec2::new(8.0, 0.0), radius: 4.0 };
        let m = collide(&a, &b);
        assert_eq!(m.contact_points(), &[Vec2::new(5.0, 0.0)]);
    }

    #[test]
    fn test_circle_line_contact_on_line_surface() {
        let line = WorldShape::LineWidth {
            endpoints: [Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)],
            half_width: 1.0,
        };
        let circle = WorldShape::Circle { center: Vec2::new(2.0, 3.0), radius: 3.0 };

        let m = collide(&line, &circle);
        assert_eq!(m.contact_count(), 1);
        let c = m.contact1().unwrap();
        assert!((c.x - 2.0).abs() < EPSILON);
        assert!((c.y - 1.0).abs() < EPSILON);

        // Same point with the circle as body A.
        let m = collide(&circle, &line);
        let c = m.contact1().unwrap();
        assert!((c.x - 2.0).abs() < EPSILON);
        assert!((c.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_polygon_contact_on_nearest_edge() {
        let verts = square(Vec2::ZERO, 1.0);
        let poly = WorldShape::Polygon { vertices: &verts, center: Vec2::ZERO };
        let circle = WorldShape::Circle { center: Vec2::new(1.5, 0.2), radius: 1.0 };
        let m = collide(&circle, &poly);
        assert_eq!(m.contact_count(), 1);
        let c = m.contact1().unwrap();
        assert!((c.x - 1.0).abs() < EPSILON);
        assert!((c.y - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_parallel_lines_report_both_ends_of_shorter_line() {
        let a = WorldShape::LineWidth {
            endpoints: [Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)],
            half_width: 0.5,
        };
        let b = WorldShape::LineWidth {
            endpoints: [Vec2::new(-3.0, 0.8), Vec2::new(3.0, 0.8)],
            half_width: 0.5,
        };
        let m = collide(&a, &b);
        assert!(m.normal.x.abs() < EPSILON);
        assert!((m.normal.y - 1.0).abs() < EPSILON);
        assert!((m.depth - 0.2).abs() < EPSILON);

        // B's endpoints dropped onto A's core, then out to A's upper surface.
        assert_eq!(m.contact_count(), 2);
        let (c1, c2) = (m.contact1().unwrap(), m.contact2().unwrap());
        assert!(c1.nearly_equal(Vec2::new(-3.0, 0.5), EPSILON));
        assert!(c2.nearly_equal(Vec2::new(3.0, 0.5), EPSILON));
    }

    #[test]
    fn test_contacts_do_not_touch_normal_or_depth() {
        let verts = square(Vec2::ZERO, 1.0);
        let poly = WorldShape::Polygon { vertices: &verts, center: Vec2::ZERO };
        let line = WorldShape::LineWidth {
            endpoints: [Vec2::new(-3.0, 1.25), Vec2::new(3.0, 1.25)],
            half_width: 0.5,
        };
        let mut m = ContactManifold::new(0, 0, 1, 1);
        assert!(sat::intersect(&poly, &line, &mut m));
        let (normal, depth) = (m.normal, m.depth);
        find_contact_points(&poly, &line, &mut m, TOLERANCE);
        assert_eq!((m.normal, m.depth), (normal, depth));
        // Polygon's top corners sit 0.25 below the line's core, on its
        // lower surface.
        assert_eq!(m.contact_count(), 2);
        for c in m.contact_points() {
            assert!((c.y - 0.75).abs() < EPSILON);
        }
    }
}
