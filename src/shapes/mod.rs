pub mod circle;
pub mod line_width;
pub mod polygon;

pub use circle::Circle;
pub use line_width::LineWidth;
pub use polygon::Polygon;

use crate::error::ShapeError;
use crate::math::{Transform, Vec2};

/// Geometric descriptor of a body, in local space.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    /// A 4-vertex polygon is a box.
    Polygon(Polygon),
    LineWidth(LineWidth),
}

/// Payload-free discriminant of `ShapeKind`, used for pair dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Circle,
    Polygon,
    LineWidth,
}

impl ShapeKind {
    pub fn circle(radius: f64) -> Result<Self, ShapeError> {
        Circle::new(radius).map(Self::Circle)
    }

    pub fn rect(width: f64, height: f64) -> Result<Self, ShapeError> {
        Polygon::rect(width, height).map(Self::Polygon)
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        Polygon::new(vertices).map(Self::Polygon)
    }

    pub fn line_width(half_length: f64, half_width: f64) -> Result<Self, ShapeError> {
        LineWidth::new(half_length, half_width).map(Self::LineWidth)
    }

    pub fn tag(&self) -> ShapeTag {
        match self {
            ShapeKind::Circle(_) => ShapeTag::Circle,
            ShapeKind::Polygon(_) => ShapeTag::Polygon,
            ShapeKind::LineWidth(_) => ShapeTag::LineWidth,
        }
    }

    /// Radius used for round projections: the circle radius, the line's
    /// half-width, and zero for polygons (their vertices carry the extent).
    pub fn radius(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.radius,
            ShapeKind::Polygon(_) => 0.0,
            ShapeKind::LineWidth(l) => l.half_width,
        }
    }

    /// Radius of a circle around the local origin enclosing the whole shape.
    pub fn bounding_radius(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.radius,
            ShapeKind::Polygon(p) => p.bounding_radius(),
            ShapeKind::LineWidth(l) => l.half_length + l.half_width,
        }
    }

    /// Writes this shape's world-space vertices for `transform` into `out`,
    /// replacing its contents.
    ///
    /// Circles yield their center, polygons their transformed vertices in
    /// stored (counter-clockwise) order, line-width shapes their two
    /// segment endpoints.
    pub fn world_vertices_into(&self, transform: &Transform, out: &mut Vec<Vec2>) {
        out.clear();
        match self {
            ShapeKind::Circle(_) => out.push(transform.position),
            ShapeKind::Polygon(p) => {
                out.extend(p.vertices().iter().map(|&v| transform.apply(v)));
            }
            ShapeKind::LineWidth(l) => {
                let (a, b) = l.local_endpoints();
                out.push(transform.apply(a));
                out.push(transform.apply(b));
            }
        }
    }

    pub fn world_vertices(&self, transform: &Transform) -> Vec<Vec2> {
        let mut out = Vec::new();
        self.world_vertices_into(transform, &mut out);
        out
    }
}
