use serde::{Deserialize, Serialize};

use crate::math::vec2::Vec2;

/// An axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Orders the corners so that `min <= max` on both axes.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB::new(*first, *first);
        for p in rest {
            aabb.min.x = aabb.min.x.min(p.x);
            aabb.min.y = aabb.min.y.min(p.y);
            aabb.max.x = aabb.max.x.max(p.x);
            aabb.max.y = aabb.max.y.max(p.y);
        }
        Some(aabb)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Strict overlap; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grows this box to contain `other`.
    pub fn merge(&mut self, other: &AABB) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
    }

    pub fn inflate(&self, amount: f64) -> AABB {
        let pad = Vec2::new(amount, amount);
        AABB::new(self.min - pad, self.max + pad)
    }

    /// The shared region, or `None` when the boxes are disjoint. Touching
    /// boxes yield a zero-area intersection.
    pub fn intersection(&self, other: &AABB) -> Option<AABB> {
        let min = Vec2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Vec2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x > max.x || min.y > max.y {
            None
        } else {
            Some(AABB { min, max })
        }
    }
}
