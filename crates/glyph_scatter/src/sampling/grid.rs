//! Background acceleration grid for minimum-distance queries.
//!
//! The cell size is `min_distance / sqrt(2)`, so a cell's diagonal equals the minimum
//! distance and a cell can hold at most one accepted sample. Any sample closer than the
//! minimum distance to a query point lies in the 5x5 block of cells around it.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::geometry::Bounds;

/// Grid cell coordinates `(column, row)`.
pub type Cell = (usize, usize);

/// Uniform grid mapping each cell to the index of the sample occupying it.
#[derive(Clone, Debug)]
pub struct BackgroundGrid {
    origin: Vec2,
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Option<usize>>,
}

impl BackgroundGrid {
    /// Creates an empty grid covering `bounds` for samples at least `min_distance` apart.
    ///
    /// Fails with [`Error::InvalidConfig`] when the cell count cannot be allocated.
    pub fn new(bounds: &Bounds, min_distance: f32) -> Result<Self> {
        debug_assert!(min_distance > 0.0);
        let cell_size = min_distance / std::f32::consts::SQRT_2;
        let cols = cells_along(bounds.width(), cell_size)?;
        let rows = cells_along(bounds.height(), cell_size)?;

        let too_many = || {
            Error::InvalidConfig(format!(
                "grid of {cols}x{rows} cells is too large for min_distance {min_distance}"
            ))
        };
        let len = cols.checked_mul(rows).ok_or_else(too_many)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_many())?;
        cells.resize(len, None);

        Ok(Self {
            origin: bounds.min,
            cell_size,
            cols,
            rows,
            cells,
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as `(cols, rows)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    fn index(&self, (x, y): Cell) -> usize {
        y * self.cols + x
    }

    /// Cell containing `p`, clamped to the grid for points on the far edges.
    #[inline]
    pub fn cell_of(&self, p: Vec2) -> Cell {
        let rel = (p - self.origin) / self.cell_size;
        let x = (rel.x.floor() as isize).clamp(0, self.cols as isize - 1) as usize;
        let y = (rel.y.floor() as isize).clamp(0, self.rows as isize - 1) as usize;
        (x, y)
    }

    /// Sample index stored in `cell`, if any.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.cells[self.index(cell)]
    }

    /// Records sample `index` at position `p`.
    pub fn insert(&mut self, p: Vec2, index: usize) {
        let idx = self.index(self.cell_of(p));
        debug_assert!(self.cells[idx].is_none(), "grid cell already occupied");
        self.cells[idx] = Some(index);
    }

    /// Sample indices stored in the 5x5 block of cells centered on `p`'s cell.
    pub fn neighbors(&self, p: Vec2) -> impl Iterator<Item = usize> + '_ {
        let (gx, gy) = self.cell_of(p);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.cols);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.rows);

        (start_y..end_y)
            .flat_map(move |y| (start_x..end_x).map(move |x| (x, y)))
            .filter_map(move |cell| self.get(cell))
    }

    /// Iterates occupied cells with the sample index they hold.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|index| ((i % self.cols, i / self.cols), index))
        })
    }
}

fn cells_along(extent: f32, cell_size: f32) -> Result<usize> {
    let n = (extent / cell_size).ceil();
    if !n.is_finite() || n >= usize::MAX as f32 {
        return Err(Error::InvalidConfig(format!(
            "extent {extent} spans too many cells of size {cell_size}"
        )));
    }
    Ok((n as usize).max(1))
}
