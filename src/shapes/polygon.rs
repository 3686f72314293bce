use crate::error::ShapeError;
use crate::math::vec2::Vec2;

/// A convex polygon in local space.
///
/// Vertices are always stored counter-clockwise (positive signed area with
/// y pointing up); `new` reverses clockwise input. Every consumer of polygon
/// vertices, edge normals included, relies on that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    bounding_radius: f64,
}

impl Polygon {
    /// Creates a new convex polygon.
    ///
    /// # Arguments
    /// * `vertices` - Local-space vertices in either winding order; stored
    ///   counter-clockwise
    ///
    /// Coincident consecutive vertices are accepted; their zero-length edges
    /// are skipped by the narrow phase.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::NonFiniteVertex(i));
        }

        let area = signed_area(&vertices);
        if area.abs() < 1e-12 {
            return Err(ShapeError::DegeneratePolygon);
        }
        if area < 0.0 {
            vertices.reverse();
        }
        check_convex(&vertices)?;

        let bounding_radius = vertices
            .iter()
            .map(|v| v.magnitude())
            .fold(0.0, f64::max);

        Ok(Self {
            vertices,
            bounding_radius,
        })
    }

    /// Creates an axis-aligned box centered on the local origin.
    ///
    /// # Arguments
    /// * `width` - Full extent along x
    /// * `height` - Full extent along y
    pub fn rect(width: f64, height: f64) -> Result<Self, ShapeError> {
        for extent in [width, height] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(ShapeError::InvalidExtent(extent));
            }
        }
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// Creates a regular polygon.
    ///
    /// # Arguments
    /// * `sides` - Number of vertices, at least 3
    /// * `radius` - Distance from the center to every vertex
    pub fn regular(sides: usize, radius: f64) -> Result<Self, ShapeError> {
        if sides < 3 {
            return Err(ShapeError::TooFewVertices(sides));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        let step = std::f64::consts::TAU / sides as f64;
        let vertices = (0..sides)
            .map(|i| Vec2::new(radius, 0.0).rotate(step * i as f64))
            .collect();
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Largest distance from the local origin to a vertex.
    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Area centroid, by fanning triangles out of the first vertex.
    pub fn centroid(&self) -> Vec2 {
        let origin = self.vertices[0];
        let mut centroid = Vec2::ZERO;
        let mut area_sum = 0.0;
        for pair in self.vertices[1..].windows(2) {
            let tri_area = (pair[0] - origin).cross(pair[1] - origin) / 2.0;
            area_sum += tri_area;
            centroid += (origin + pair[0] + pair[1]) / 3.0 * tri_area;
        }
        centroid / area_sum
    }

    /// Outward unit normal of every non-degenerate edge, in edge order.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        let n = self.vertices.len();
        (0..n)
            .filter_map(|i| {
                let edge = self.vertices[(i + 1) % n] - self.vertices[i];
                edge.perpendicular_cw().try_normalize()
            })
            .collect()
    }
}

/// Shoelace signed area; positive for counter-clockwise loops.
pub fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum();
    twice / 2.0
}

fn check_convex(ccw_vertices: &[Vec2]) -> Result<(), ShapeError> {
    let n = ccw_vertices.len();
    for i in 0..n {
        let prev = ccw_vertices[(i + n - 1) % n];
        let curr = ccw_vertices[i];
        let next = ccw_vertices[(i + 1) % n];
        let e1 = curr - prev;
        let e2 = next - curr;
        let turn = e1.cross(e2);
        if turn < -1e-9 * e1.magnitude() * e2.magnitude() {
            return Err(ShapeError::NotConvex(i));
        }
    }
    Ok(())
}
