use crate::error::ShapeError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Creates a new circle shape.
    ///
    /// # Arguments
    /// * `radius` - Radius of the circle
    ///
    /// A zero radius is allowed (a point); negative or non-finite is not.
    pub fn new(radius: f64) -> Result<Self, ShapeError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }
}
