use crate::error::ShapeError;
use crate::math::vec2::Vec2;

/// A segment with perpendicular thickness ("fat line"). Locally it runs
/// along the x axis from `-half_length` to `half_length`; every point within
/// `half_width` of that segment is inside the shape, so it collides like a
/// capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidth {
    pub half_length: f64,
    pub half_width: f64,
}

impl LineWidth {
    /// Creates a new line-width shape.
    ///
    /// # Arguments
    /// * `half_length` - Half the length of the core segment
    /// * `half_width` - Distance from the core segment to the surface
    pub fn new(half_length: f64, half_width: f64) -> Result<Self, ShapeError> {
        for extent in [half_length, half_width] {
            if !extent.is_finite() || extent < 0.0 {
                return Err(ShapeError::InvalidExtent(extent));
            }
        }
        Ok(Self {
            half_length,
            half_width,
        })
    }

    /// Local-space endpoints `(a, b)`.
    pub fn local_endpoints(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(-self.half_length, 0.0),
            Vec2::new(self.half_length, 0.0),
        )
    }

    pub fn length(&self) -> f64 {
        2.0 * self.half_length
    }
}
