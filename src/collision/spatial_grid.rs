// Uniform spatial grid used as the broad phase.

use log::{debug, trace};

use crate::collision::AABB;
use crate::config::CollisionConfig;
use crate::error::ConfigError;
use crate::math::Vec2;
use crate::objects::RigidBody;

/// Flattened cell index: `col + row * num_tiles_wide`.
pub type CellKey = usize;

/// Upper limit on the number of cells a grid may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Represents a cell in the spatial grid.
#[derive(Debug, Default, Clone)]
struct GridCell {
    body_indices: Vec<usize>,
}

/// A bounded uniform grid that buckets bodies by their world AABB.
///
/// A body is registered in every cell its AABB overlaps, so candidate pairs
/// are deduplicated across cells. Bodies lying wholly outside the bounds are
/// not registered and never show up in a candidate pair.
#[derive(Debug)]
pub struct BroadPhaseGrid {
    bounds: AABB,
    cell_size: f64,
    inv_cell_size: f64, // cached for performance
    num_cols: usize,
    num_rows: usize,
    cells: Vec<GridCell>, // flattened 1D vector representing the 2D grid

    // Keys of non-empty cells, so clear and pair generation skip empty ones.
    occupied: Vec<CellKey>,
    // Sorted, unique (lower, higher) index pairs from the last rebuild.
    pairs: Vec<(usize, usize)>,
}

impl BroadPhaseGrid {
    /// Creates a new broad-phase grid.
    ///
    /// # Arguments
    /// * `bounds` - World-space area covered by the grid
    /// * `cell_size` - Side length of each square cell
    ///
    /// The last row and column are cut short when the bounds are not a
    /// whole number of cells. Fails when either argument is invalid or the
    /// grid would need more than `MAX_GRID_CELLS` cells.
    pub fn new(bounds: AABB, cell_size: f64) -> Result<Self, ConfigError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }
        if !(bounds.min.is_finite() && bounds.max.is_finite())
            || bounds.width() <= 0.0
            || bounds.height() <= 0.0
        {
            return Err(ConfigError::InvalidBounds(format!("{:?}", bounds)));
        }

        let inv_cell_size = 1.0 / cell_size;
        // At least one cell in each direction
        let cols = (bounds.width() * inv_cell_size).ceil().max(1.0);
        let rows = (bounds.height() * inv_cell_size).ceil().max(1.0);
        // Float-to-int casts saturate, so the product is checked as well.
        let (num_cols, num_rows) = (cols as usize, rows as usize);
        let total_cells = num_cols
            .checked_mul(num_rows)
            .filter(|&total| cols * rows <= MAX_GRID_CELLS as f64 && total <= MAX_GRID_CELLS)
            .ok_or(ConfigError::GridTooLarge {
                cols: num_cols,
                rows: num_rows,
            })?;
        debug!(
            "creating broad-phase grid: bounds={:?}, cell_size={}, dims={}x{}, total_cells={}",
            bounds, cell_size, num_cols, num_rows, total_cells
        );

        Ok(BroadPhaseGrid {
            bounds,
            cell_size,
            inv_cell_size,
            num_cols,
            num_rows,
            cells: vec![GridCell::default(); total_cells],
            occupied: Vec::new(),
            pairs: Vec::new(),
        })
    }

    /// Creates a grid from the bounds and cell size of a config.
    pub fn from_config(config: &CollisionConfig) -> Result<Self, ConfigError> {
        Self::new(config.bounds, config.cell_size)
    }

    // --- Helper Methods ---

    /// Column of `x`, clamped into the grid.
    #[inline]
    fn col_of(&self, x: f64) -> usize {
        let col = ((x - self.bounds.min.x) * self.inv_cell_size).floor().max(0.0) as usize;
        col.min(self.num_cols - 1)
    }

    /// Row of `y`, clamped into the grid.
    #[inline]
    fn row_of(&self, y: f64) -> usize {
        let row = ((y - self.bounds.min.y) * self.inv_cell_size).floor().max(0.0) as usize;
        row.min(self.num_rows - 1)
    }

    #[inline]
    fn key(&self, col: usize, row: usize) -> CellKey {
        col + row * self.num_cols
    }

    // --- Introspection ---

    /// Key of the cell containing a world position, or `None` outside the
    /// bounds. Points on the upper boundary belong to the last row/column.
    pub fn cell_key_from_world_position(&self, x: f64, y: f64) -> Option<CellKey> {
        let inside = x >= self.bounds.min.x
            && x <= self.bounds.max.x
            && y >= self.bounds.min.y
            && y <= self.bounds.max.y;
        inside.then(|| self.key(self.col_of(x), self.row_of(y)))
    }

    /// Body indices registered in a cell. Unknown keys have no occupants.
    pub fn cell_occupants(&self, key: CellKey) -> &[usize] {
        self.cells
            .get(key)
            .map_or(&[][..], |cell| cell.body_indices.as_slice())
    }

    /// World-space area of a cell, clipped to the grid bounds.
    pub fn cell_bounds(&self, key: CellKey) -> Option<AABB> {
        if key >= self.cells.len() {
            return None;
        }
        let (col, row) = (key % self.num_cols, key / self.num_cols);
        let min_x = self.bounds.min.x + col as f64 * self.cell_size;
        let min_y = self.bounds.min.y + row as f64 * self.cell_size;
        Some(AABB::new(
            Vec2::new(min_x, min_y),
            Vec2::new(
                (min_x + self.cell_size).min(self.bounds.max.x),
                (min_y + self.cell_size).min(self.bounds.max.y),
            ),
        ))
    }

    /// Keys of the cells holding at least one body, in first-touched order.
    pub fn occupied_cells(&self) -> &[CellKey] {
        &self.occupied
    }

    pub fn num_tiles_wide(&self) -> usize {
        self.num_cols
    }

    pub fn num_tiles_high(&self) -> usize {
        self.num_rows
    }

    pub fn boundary_width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn boundary_height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    // --- Population ---

    /// Removes every body and candidate pair.
    pub fn clear(&mut self) {
        for &key in &self.occupied {
            self.cells[key].body_indices.clear();
        }
        self.occupied.clear();
        self.pairs.clear();
    }

    /// Registers a body in every cell its AABB overlaps.
    ///
    /// # Arguments
    /// * `body_index` - Index of the body in the caller's body slice
    /// * `aabb` - World-space bounds of the body
    ///
    /// Returns false when the AABB lies wholly outside the grid.
    ///
    /// Candidate pairs are only regathered by `collect_pairs` (which the
    /// rebuild methods call).
    pub fn insert(&mut self, body_index: usize, aabb: &AABB) -> bool {
        let Some(clipped) = aabb.intersection(&self.bounds) else {
            trace!("body {} outside grid bounds: {:?}", body_index, aabb);
            return false;
        };

        let (min_col, min_row) = (self.col_of(clipped.min.x), self.row_of(clipped.min.y));
        let (max_col, max_row) = (self.col_of(clipped.max.x), self.row_of(clipped.max.y));
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let key = self.key(col, row);
                let cell = &mut self.cells[key];
                if cell.body_indices.is_empty() {
                    self.occupied.push(key);
                }
                cell.body_indices.push(body_index);
            }
        }
        true
    }

    /// Gathers the unique candidate pairs from the current occupancy.
    pub fn collect_pairs(&mut self) {
        self.pairs.clear();
        for &key in &self.occupied {
            let indices = &self.cells[key].body_indices;
            for (i, &a) in indices.iter().enumerate() {
                for &b in &indices[i + 1..] {
                    if a != b {
                        self.pairs.push((a.min(b), a.max(b)));
                    }
                }
            }
        }
        // Bodies sharing several cells produce the same pair more than once.
        self.pairs.sort_unstable();
        self.pairs.dedup();
    }

    /// Clears the grid and re-registers every body by its slice index.
    /// World vertices must be fresh.
    pub fn rebuild(&mut self, bodies: &[RigidBody]) {
        self.rebuild_from_aabbs(bodies.iter().map(RigidBody::aabb));
    }

    /// Same as `rebuild`, for callers that already have the bounds. Indices
    /// follow iteration order.
    pub fn rebuild_from_aabbs<I>(&mut self, aabbs: I)
    where
        I: IntoIterator<Item = AABB>,
    {
        self.clear();
        let mut outside = 0;
        for (index, aabb) in aabbs.into_iter().enumerate() {
            if !self.insert(index, &aabb) {
                outside += 1;
            }
        }
        self.collect_pairs();
        trace!(
            "grid rebuilt: {} occupied cells, {} bodies outside, {} candidate pairs",
            self.occupied.len(),
            outside,
            self.pairs.len()
        );
    }

    /// Unique `(lower, higher)` index pairs sharing at least one cell, in
    /// ascending order.
    pub fn candidate_pairs(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }
}
