// Uniform spatial grid used as the broad phase.

use std::collections::{BTreeSet, HashMap};

use tracing::{trace, warn};

use crate::collision::BoundingArea;
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;
use crate::objects::ColliderHandle;

/// Area and resolution of the broad-phase grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSettings {
    pub bounds: BoundingArea,
    pub cell_size: f64,
}

/// Largest number of cells a grid may allocate.
///
/// Grid settings whose bounds and cell size would need more cells are
/// rejected with [`PhysicsError::InvalidCellSize`].
pub const MAX_GRID_CELLS: usize = 1 << 20;

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            bounds: BoundingArea::new(Vec2::new(-512.0, -512.0), Vec2::new(512.0, 512.0)),
            cell_size: 8.0,
        }
    }
}

impl GridSettings {
    /// Bounds the grid actually covers. Empty bounds fall back to a single
    /// cell at the origin.
    fn effective_bounds(&self) -> BoundingArea {
        if self.bounds.is_empty() {
            BoundingArea::new(Vec2::ZERO, Vec2::new(self.cell_size, self.cell_size))
        } else {
            self.bounds
        }
    }

    /// Checks the settings and returns the `(columns, rows)` of the grid they describe.
    ///
    /// # Errors
    /// `InvalidCellSize` when the cell size is not positive and finite, or
    /// when the grid would need more than [`MAX_GRID_CELLS`] cells.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        let cell_size = self.cell_size;
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(PhysicsError::InvalidCellSize(cell_size));
        }

        let bounds = self.effective_bounds();
        let inv_cell_size = 1.0 / cell_size;
        let count = |extent: f64| -> Option<usize> {
            let cells = (extent * inv_cell_size).ceil().max(1.0);
            (cells.is_finite() && cells <= MAX_GRID_CELLS as f64).then(|| cells as usize)
        };
        match (count(bounds.width()), count(bounds.height())) {
            (Some(cols), Some(rows)) if cols.checked_mul(rows).map_or(false, |n| n <= MAX_GRID_CELLS) => {
                Ok((cols, rows))
            }
            _ => Err(PhysicsError::InvalidCellSize(cell_size)),
        }
    }
}

/// Represents a cell in the spatial grid.
#[derive(Debug, Default, Clone)]
struct GridCell {
    handles: Vec<ColliderHandle>,
}

/// Inclusive cell range `(min_col, min_row, max_col, max_row)`.
type CellRange = (usize, usize, usize, usize);

#[derive(Debug, Clone, Copy)]
struct Entry {
    bounds: BoundingArea,
    range: CellRange,
}

/// A uniform spatial grid indexing colliders by bounding area.
///
/// Areas outside the grid bounds are clamped onto the border cells, so
/// queries never miss an overlapping entry; they only get less selective.
#[derive(Debug)]
pub struct SpatialGrid {
    bounds: BoundingArea,
    inv_cell_size: f64,
    num_cols: usize,
    num_rows: usize,
    cells: Vec<GridCell>,
    entries: HashMap<ColliderHandle, Entry>,
}

impl SpatialGrid {
    /// Creates a new SpatialGrid covering `settings.bounds`.
    ///
    /// # Arguments
    /// * `settings` - The area to cover and the side length of each cell.
    ///
    /// # Errors
    /// `InvalidCellSize` for a non-positive cell size, or one so small that
    /// the grid would exceed [`MAX_GRID_CELLS`].
    pub fn new(settings: GridSettings) -> Result<Self> {
        let (num_cols, num_rows) = settings.dimensions()?;
        if settings.bounds.is_empty() {
            warn!(bounds = ?settings.bounds, "spatial grid bounds are empty; using a single cell at the origin");
        }
        let cell_count = num_cols
            .checked_mul(num_rows)
            .ok_or(PhysicsError::InvalidCellSize(settings.cell_size))?;
        trace!(num_cols, num_rows, cell_size = settings.cell_size, "creating spatial grid");

        Ok(SpatialGrid {
            bounds: settings.effective_bounds(),
            inv_cell_size: 1.0 / settings.cell_size,
            num_cols,
            num_rows,
            cells: vec![GridCell::default(); cell_count],
            entries: HashMap::new(),
        })
    }

    /// Number of indexed colliders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `handle` is currently indexed.
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Stored bounding area of an entry.
    pub fn bounds_of(&self, handle: ColliderHandle) -> Option<BoundingArea> {
        self.entries.get(&handle).map(|entry| entry.bounds)
    }

    /// Converts a world coordinate to a clamped (col, row) cell.
    fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let clamp = |value: f64, count: usize| -> usize {
            let cell = value.floor();
            if cell <= 0.0 {
                0
            } else {
                (cell as usize).min(count - 1)
            }
        };
        let col = clamp((point.x - self.bounds.min.x) * self.inv_cell_size, self.num_cols);
        let row = clamp((point.y - self.bounds.min.y) * self.inv_cell_size, self.num_rows);
        (col, row)
    }

    /// Determines the range of grid cells overlapped by an area.
    fn cell_range(&self, area: &BoundingArea) -> CellRange {
        let (min_col, min_row) = self.cell_of(area.min);
        let (max_col, max_row) = self.cell_of(area.max);
        (min_col, min_row, max_col, max_row)
    }

    fn cell_indices(&self, range: CellRange) -> impl Iterator<Item = usize> {
        let (min_col, min_row, max_col, max_row) = range;
        let num_cols = self.num_cols;
        (min_row..=max_row).flat_map(move |row| (min_col..=max_col).map(move |col| col + row * num_cols))
    }

    /// Inserts (or re-inserts) a collider. Empty areas are not indexed.
    ///
    /// # Arguments
    /// * `handle` - The collider's handle in the owning world.
    /// * `bounds` - The world-space bounding area of the collider.
    pub fn insert(&mut self, handle: ColliderHandle, bounds: BoundingArea) {
        self.remove(handle);
        if bounds.is_empty() {
            trace!(%handle, "skipping collider with empty bounds");
            return;
        }
        let range = self.cell_range(&bounds);
        for index in self.cell_indices(range).collect::<Vec<_>>() {
            self.cells[index].handles.push(handle);
        }
        self.entries.insert(handle, Entry { bounds, range });
    }

    /// Refreshes a collider's bounds after it moved. Cells are only rewritten
    /// when the covered cell range changes.
    ///
    /// # Arguments
    /// * `handle` - The collider's handle in the owning world.
    /// * `bounds` - The new world-space bounding area.
    pub fn update(&mut self, handle: ColliderHandle, bounds: BoundingArea) {
        let range = self.cell_range(&bounds);
        match self.entries.get_mut(&handle) {
            Some(entry) if !bounds.is_empty() && entry.range == range => entry.bounds = bounds,
            _ => self.insert(handle, bounds),
        }
    }

    /// Removes a collider. Returns whether it was indexed.
    pub fn remove(&mut self, handle: ColliderHandle) -> bool {
        let Some(entry) = self.entries.remove(&handle) else {
            return false;
        };
        for index in self.cell_indices(entry.range).collect::<Vec<_>>() {
            self.cells[index].handles.retain(|&h| h != handle);
        }
        true
    }

    /// Every indexed collider whose stored area overlaps `area`, ascending and
    /// without duplicates.
    pub fn query(&self, area: &BoundingArea) -> Vec<ColliderHandle> {
        if area.is_empty() {
            return Vec::new();
        }
        let mut found = BTreeSet::new();
        for index in self.cell_indices(self.cell_range(area)) {
            for handle in &self.cells[index].handles {
                if self.entries.get(handle).map_or(false, |e| e.bounds.overlaps(area)) {
                    found.insert(*handle);
                }
            }
        }
        found.into_iter().collect()
    }

    /// Candidates that may collide with an indexed collider (excluding itself).
    pub fn retrieve_potential_collisions(&self, handle: ColliderHandle) -> Vec<ColliderHandle> {
        let Some(entry) = self.entries.get(&handle) else {
            return Vec::new();
        };
        let mut candidates = self.query(&entry.bounds);
        candidates.retain(|&h| h != handle);
        trace!(%handle, candidates = candidates.len(), "broad phase");
        candidates
    }
}
