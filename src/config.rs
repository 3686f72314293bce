//! Collision configuration

use serde::{Deserialize, Serialize};

use crate::collision::AABB;
use crate::error::ConfigError;
use crate::math::Vec2;

/// Tunables of the detection core.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial config file only needs the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Area covered by the broad-phase grid. Bodies outside it are never
    /// tested.
    pub bounds: AABB,
    /// Side length of a grid cell
    pub cell_size: f64,
    /// Distances (squared) and positions closer than this are considered
    /// equal when picking contact points
    pub contact_tolerance: f64,
    /// Skip pairs where neither body is dynamic
    pub skip_static_pairs: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            bounds: AABB::new(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
            cell_size: 64.0,
            contact_tolerance: 5e-4,
            skip_static_pairs: true,
        }
    }
}

impl CollisionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        let b = &self.bounds;
        if !(b.min.is_finite() && b.max.is_finite()) || b.width() <= 0.0 || b.height() <= 0.0 {
            return Err(ConfigError::InvalidBounds(format!("{:?}", b)));
        }
        if !(self.contact_tolerance.is_finite() && self.contact_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.contact_tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CollisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bounds.width(), 1280.0);
        assert_eq!(config.bounds.height(), 720.0);
    }

    #[test]
    fn test_validate_rejects_each_field() {
        let mut config = CollisionConfig {
            cell_size: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCellSize(-1.0)));

        config.cell_size = 32.0;
        config.contact_tolerance = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTolerance(0.0)));

        config.contact_tolerance = 1e-3;
        config.bounds = AABB::new(Vec2::ZERO, Vec2::new(f64::INFINITY, 10.0));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CollisionConfig = toml::from_str(
            r#"
            cell_size = 32.0

            [bounds]
            min = { x = -100.0, y = -100.0 }
            max = { x = 100.0, y = 100.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.cell_size, 32.0);
        assert_eq!(config.bounds.min, Vec2::new(-100.0, -100.0));
        assert_eq!(config.contact_tolerance, 5e-4);
        assert!(config.skip_static_pairs);
        assert!(config.validate().is_ok());
    }
}
