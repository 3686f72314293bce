//! Narrow-phase separating-axis test.
//!
//! Every shape pair runs the same loop: enumerate candidate axes from both
//! shapes, project both shapes on each, bail out on the first gap, and keep
//! the axis with the smallest overlap as the minimum translation vector.
//! Circle pairs use the closed form instead.
//!
//! Candidate axes per shape:
//! - polygon: the outward normal of every non-degenerate edge;
//! - circle: from its center towards the closest core point of the other
//!   shape (other center, closest point on a segment, closest polygon vertex);
//! - line-width: the segment perpendicular, plus one axis per endpoint
//!   towards the other shape's closest core point (the rounded caps).

use super::detection::PairKind;
use super::manifold::ContactManifold;
use crate::math::vec2::Vec2;
use crate::shapes::ShapeTag;

/// World-space view of a body's shape, borrowed from its vertex cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape<'a> {
    Circle { center: Vec2, radius: f64 },
    /// Counter-clockwise vertices.
    Polygon { vertices: &'a [Vec2], center: Vec2 },
    LineWidth { endpoints: [Vec2; 2], half_width: f64 },
}

impl<'a> WorldShape<'a> {
    pub fn tag(&self) -> ShapeTag {
        match self {
            WorldShape::Circle { .. } => ShapeTag::Circle,
            WorldShape::Polygon { .. } => ShapeTag::Polygon,
            WorldShape::LineWidth { .. } => ShapeTag::LineWidth,
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            WorldShape::Circle { center, .. } | WorldShape::Polygon { center, .. } => *center,
            WorldShape::LineWidth { endpoints: [a, b], .. } => (*a + *b) / 2.0,
        }
    }

    /// Points of the shape's core: the circle center, polygon vertices or
    /// segment endpoints.
    pub fn core_points(&self) -> &[Vec2] {
        match self {
            WorldShape::Circle { center, .. } => std::slice::from_ref(center),
            WorldShape::Polygon { vertices, .. } => *vertices,
            WorldShape::LineWidth { endpoints, .. } => &endpoints[..],
        }
    }

    /// Round padding around the core: circle radius, line half-width, zero
    /// for polygons.
    pub fn skin(&self) -> f64 {
        match self {
            WorldShape::Circle { radius, .. } => *radius,
            WorldShape::Polygon { .. } => 0.0,
            WorldShape::LineWidth { half_width, .. } => *half_width,
        }
    }

    /// Core edges: every polygon edge (closing edge included), the single
    /// segment of a line, nothing for a circle.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let points = self.core_points();
        let count = match self {
            WorldShape::Circle { .. } => 0,
            WorldShape::Polygon { vertices, .. } => vertices.len(),
            WorldShape::LineWidth { .. } => 1,
        };
        (0..count).map(move |i| (points[i], points[(i + 1) % points.len()]))
    }

    /// The core point a round feature at `point` aims its axis at.
    fn axis_target(&self, point: Vec2) -> Vec2 {
        match self {
            WorldShape::Circle { center, .. } => *center,
            WorldShape::Polygon { vertices, .. } => vertices
                .iter()
                .copied()
                .min_by(|p, q| {
                    p.distance_squared(point)
                        .total_cmp(&q.distance_squared(point))
                })
                .unwrap_or(point),
            WorldShape::LineWidth { endpoints: [a, b], .. } => {
                closest_point_on_segment(point, *a, *b).0
            }
        }
    }
}

/// Interval covered by a shape projected on an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

/// Minimum translation vector: moving B by `normal * depth` separates the
/// pair. `normal` is a unit vector pointing from A towards B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    pub normal: Vec2,
    pub depth: f64,
}

/// Projects `shape` on a unit `axis`.
pub fn project(shape: &WorldShape, axis: Vec2) -> Projection {
    match shape {
        WorldShape::Circle { center, radius } => {
            let c = center.dot(axis);
            Projection {
                min: c - radius,
                max: c + radius,
            }
        }
        WorldShape::Polygon { vertices, .. } => {
            let mut proj = Projection {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            };
            for v in vertices.iter() {
                let d = v.dot(axis);
                proj.min = proj.min.min(d);
                proj.max = proj.max.max(d);
            }
            proj
        }
        WorldShape::LineWidth {
            endpoints: [a, b],
            half_width,
        } => {
            let (pa, pb) = (a.dot(axis), b.dot(axis));
            Projection {
                min: pa.min(pb) - half_width,
                max: pa.max(pb) + half_width,
            }
        }
    }
}

/// Closest point to `point` on segment `a`-`b`, with its squared distance.
/// A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> (Vec2, f64) {
    let ab = b - a;
    let length_sq = ab.magnitude_squared();
    let closest = if length_sq < 1e-12 {
        a
    } else {
        let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
        a + ab * t
    };
    (closest, closest.distance_squared(point))
}

/// Overlap of the two projections on `axis` (normalized here), in whichever
/// direction is smaller. Zero or negative means the axis separates them.
pub fn axis_overlap(a: &WorldShape, b: &WorldShape, axis: Vec2) -> f64 {
    let axis = axis.normalize();
    let (pa, pb) = (project(a, axis), project(b, axis));
    (pa.max - pb.min).min(pb.max - pa.min)
}

/// Runs the separating-axis test for the pair, returning the minimum
/// translation vector when the shapes overlap. Touching shapes do not
/// overlap.
pub fn find_mtv(a: &WorldShape, b: &WorldShape) -> Option<Mtv> {
    match PairKind::of(a.tag(), b.tag()) {
        PairKind::CircleCircle => circle_circle(a, b),
        _ => separating_axes(a, b),
    }
}

/// Narrow-phase entry point: on overlap writes `is_intersecting`, `normal`
/// and `depth` into the manifold and returns true. On a miss the manifold
/// is left untouched.
pub fn intersect(a: &WorldShape, b: &WorldShape, manifold: &mut ContactManifold) -> bool {
    match find_mtv(a, b) {
        Some(mtv) => {
            manifold.is_intersecting = true;
            manifold.normal = mtv.normal;
            manifold.depth = mtv.depth;
            true
        }
        None => false,
    }
}

fn circle_circle(a: &WorldShape, b: &WorldShape) -> Option<Mtv> {
    let (
        &WorldShape::Circle {
            center: center_a,
            radius: radius_a,
        },
        &WorldShape::Circle {
            center: center_b,
            radius: radius_b,
        },
    ) = (a, b)
    else {
        debug_assert!(false, "circle_circle dispatched for {:?}/{:?}", a.tag(), b.tag());
        return None;
    };

    let delta = center_b - center_a;
    let radii = radius_a + radius_b;
    let dist_sq = delta.magnitude_squared();
    if dist_sq >= radii * radii {
        return None;
    }
    // Concentric circles have no preferred direction.
    let normal = delta.try_normalize().unwrap_or(Vec2::UP);
    Some(Mtv {
        normal,
        depth: radii - dist_sq.sqrt(),
    })
}

fn separating_axes(a: &WorldShape, b: &WorldShape) -> Option<Mtv> {
    let mut best = None;
    if !test_axes_of(a, b, a, b, &mut best) || !test_axes_of(b, a, a, b, &mut best) {
        return None;
    }
    best
}

/// Tests every candidate axis contributed by `owner` against `other`.
/// Returns false as soon as one of them separates `a` and `b`.
fn test_axes_of(
    owner: &WorldShape,
    other: &WorldShape,
    a: &WorldShape,
    b: &WorldShape,
    best: &mut Option<Mtv>,
) -> bool {
    match owner {
        WorldShape::Polygon { .. } => owner
            .edges()
            .all(|(v1, v2)| test_axis(a, b, (v2 - v1).perpendicular_cw(), best)),
        WorldShape::Circle { center, .. } => {
            test_axis(a, b, other.axis_target(*center) - *center, best)
        }
        WorldShape::LineWidth {
            endpoints: [p, q], ..
        } => {
            test_axis(a, b, (*q - *p).perpendicular(), best)
                && [*p, *q]
                    .iter()
                    .all(|&e| test_axis(a, b, other.axis_target(e) - e, best))
        }
    }
}

/// Projects both shapes on `raw_axis`. Returns false on a gap; otherwise
/// records the axis in `best` if its overlap is the smallest so far.
/// Degenerate (zero-length) axes are skipped.
fn test_axis(a: &WorldShape, b: &WorldShape, raw_axis: Vec2, best: &mut Option<Mtv>) -> bool {
    let Some(axis) = raw_axis.try_normalize() else {
        return true;
    };
    let (pa, pb) = (project(a, axis), project(b, axis));

    // Overlap if B is pushed along +axis, and along -axis.
    let forward = pa.max - pb.min;
    let backward = pb.max - pa.min;
    if forward <= 0.0 || backward <= 0.0 {
        return false;
    }

    let (depth, normal) = if forward < backward {
        (forward, axis)
    } else if backward < forward {
        (backward, -axis)
    } else if (b.center() - a.center()).dot(axis) >= 0.0 {
        (forward, axis)
    } else {
        (backward, -axis)
    };

    if best.map_or(true, |m| depth < m.depth) {
        *best = Some(Mtv { normal, depth });
    }
    true
}
