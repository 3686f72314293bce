//! Collision detection core for a 2D rigid-body engine.
//!
//! Bodies are circles, convex polygons and line-width segments (capsules).
//! A step runs a uniform-grid broad phase, a separating-axis narrow phase
//! and a contact-point pass, and hands the resulting manifolds to an
//! external solver. Nothing here moves bodies.

pub mod collision;
pub mod config;
pub mod error;
pub mod math;
pub mod objects;
pub mod shapes;

// Re-export key types for easier use
pub use collision::{BroadPhaseGrid, CollisionPipeline, ContactManifold, AABB};
pub use config::CollisionConfig;
pub use error::{ConfigError, ShapeError};
pub use math::{Transform, Vec2};
pub use objects::{BodyId, MotionKind, RigidBody};
pub use shapes::{Circle, LineWidth, Polygon, ShapeKind};
