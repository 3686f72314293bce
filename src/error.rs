//! Error types for shape construction and collision configuration.
//!
//! Detection itself never fails; these only come out of constructors and
//! config validation.

/// Invalid shape geometry passed to a shape constructor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Radius is negative or not finite
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// A length or width is negative or not finite
    #[error("invalid extent: {0}")]
    InvalidExtent(f64),

    /// Polygons need at least three vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// A vertex coordinate is NaN or infinite
    #[error("vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// All vertices are collinear or coincident
    #[error("polygon has zero area")]
    DegeneratePolygon,

    /// The vertex loop turns both ways
    #[error("polygon is not convex (reflex turn at vertex {0})")]
    NotConvex(usize),
}

/// Invalid collision configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cell size must be positive and finite
    #[error("invalid cell size: {0}")]
    InvalidCellSize(f64),

    /// Bounds must be finite with positive width and height
    #[error("invalid grid bounds: {0}")]
    InvalidBounds(String),

    /// Contact tolerance must be positive and finite
    #[error("invalid contact tolerance: {0}")]
    InvalidTolerance(f64),

    /// Bounds over cell size give more cells than the grid will allocate
    #[error("grid of {cols}x{rows} cells is too large")]
    GridTooLarge { cols: usize, rows: usize },
}
