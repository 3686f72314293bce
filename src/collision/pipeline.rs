use log::debug;

use super::detection;
use super::manifold::{ContactManifold, ManifoldPool};
use super::spatial_grid::BroadPhaseGrid;
use crate::config::CollisionConfig;
use crate::error::ConfigError;
use crate::objects::RigidBody;

/// Per-step collision detection driver.
///
/// Owns the broad-phase grid and the manifold storage, and reuses both
/// across steps. Each `step` runs the broad phase, then the narrow phase on
/// every candidate pair, and returns the manifolds of the pairs that
/// intersect.
#[derive(Debug)]
pub struct CollisionPipeline {
    config: CollisionConfig,
    grid: BroadPhaseGrid,
    pool: ManifoldPool,
}

impl CollisionPipeline {
    /// Creates a new collision pipeline.
    ///
    /// # Arguments
    /// * `config` - Grid layout and contact tunables, validated here
    ///
    /// Fails when the config is invalid or describes a grid too large to
    /// allocate.
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: BroadPhaseGrid::from_config(&config)?,
            pool: ManifoldPool::new(),
            config,
        })
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn grid(&self) -> &BroadPhaseGrid {
        &self.grid
    }

    /// Manifolds produced by the last step.
    pub fn manifolds(&self) -> &[ContactManifold] {
        self.pool.active()
    }

    /// Runs one detection pass over `bodies`.
    ///
    /// Stale world vertices are refreshed first. Manifolds refer to bodies
    /// by slice index (A always the lower one) and uid, and come out in
    /// ascending pair order.
    pub fn step(&mut self, bodies: &mut [RigidBody]) -> &[ContactManifold] {
        for body in bodies.iter_mut() {
            body.refresh_world_vertices();
        }
        let bodies = &*bodies;

        self.grid.rebuild(bodies);
        self.pool.begin_step();

        let mut tested = 0;
        for (i, j) in self.grid.candidate_pairs() {
            let (body_a, body_b) = (&bodies[i], &bodies[j]);
            if self.config.skip_static_pairs && !body_a.is_dynamic() && !body_b.is_dynamic() {
                continue;
            }
            tested += 1;
            let manifold = self.pool.acquire(i, body_a.uid, j, body_b.uid);
            if !detection::check_collision(
                body_a,
                body_b,
                manifold,
                self.config.contact_tolerance,
            ) {
                self.pool.discard_last();
            }
        }

        debug!(
            "collision step: {} bodies, {} candidate pairs, {} tested, {} manifolds",
            bodies.len(),
            self.grid.candidate_pairs().len(),
            tested,
            self.pool.active().len()
        );
        self.pool.active()
    }
}
