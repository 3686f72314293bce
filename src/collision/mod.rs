pub mod aabb;
pub mod contacts;
pub mod detection;
pub mod manifold;
pub mod pipeline;
pub mod sat;
pub mod spatial_grid;

// Re-export key types
pub use aabb::AABB;
pub use detection::{check_collision, PairKind};
pub use manifold::{ContactManifold, ManifoldPool};
pub use pipeline::CollisionPipeline;
pub use sat::{find_mtv, intersect, Mtv, WorldShape};
pub use spatial_grid::{BroadPhaseGrid, CellKey, MAX_GRID_CELLS};
