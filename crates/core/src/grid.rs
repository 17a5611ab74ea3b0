//! Grid module - the set of locked cells
//!
//! The grid is `cols` x `rows` slots, each empty or holding the kind of the piece
//! that locked there. Uses a flat row-major vector sized once at construction.
//! Coordinates: (col, row) with col in 0..cols (left to right), row in 0..rows
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, Slot};

/// Locked-cell storage for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    /// Flat array of slots, row-major order (row * cols + col)
    slots: Vec<Slot>,
    /// Number of occupied slots
    filled: usize,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            slots: vec![None; rows as usize * cols as usize],
            filled: 0,
        }
    }

    #[inline(always)]
    fn index(&self, col: i16, row: i16) -> Option<usize> {
        if self.is_out_of_bounds(col, row) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Number of locked cells
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Get slot at (col, row). Returns None if out of bounds
    pub fn get(&self, col: i16, row: i16) -> Option<Slot> {
        self.index(col, row).map(|idx| self.slots[idx])
    }

    /// Set slot at (col, row). Returns false if out of bounds
    pub fn set(&mut self, col: i16, row: i16, slot: Slot) -> bool {
        let Some(idx) = self.index(col, row) else {
            return false;
        };
        match (self.slots[idx].is_some(), slot.is_some()) {
            (false, true) => self.filled += 1,
            (true, false) => self.filled -= 1,
            _ => {}
        }
        self.slots[idx] = slot;
        true
    }

    /// Whether a locked cell sits at (col, row). Color is ignored.
    pub fn is_occupied(&self, col: i16, row: i16) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, col: i16, row: i16) -> bool {
        col < 0 || col >= self.cols as i16 || row < 0 || row >= self.rows as i16
    }

    /// Whether any of `cells` coincides with a locked cell
    pub fn overlaps(&self, cells: &[Cell]) -> bool {
        cells.iter().any(|c| self.is_occupied(c.col, c.row))
    }

    /// Number of locked cells in `row`
    pub fn row_count(&self, row: usize) -> usize {
        if row >= self.rows as usize {
            return 0;
        }
        let width = self.cols as usize;
        let start = row * width;
        self.slots[start..start + width]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// A row is full when it holds exactly `cols` locked cells
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows as usize && self.row_count(row) == self.cols as usize
    }

    /// Merge cells into the grid.
    ///
    /// Cells outside the grid are skipped; the returned count says how many were
    /// stored, so callers can detect a lock above the top row.
    pub fn lock_cells(&mut self, cells: &[Cell]) -> usize {
        cells
            .iter()
            .filter(|c| self.set(c.col, c.row, Some(c.kind)))
            .count()
    }

    /// Clear all full rows and return their indices (sorted bottom to top).
    ///
    /// Full rows are identified against the pre-shift layout: the scan reads
    /// bottom-up and compacts surviving rows downward, so a row is moved only
    /// after every row below it has been classified. Only rows touched by the
    /// last lock can be full, so at most four indices are reported; more full
    /// rows than that is a broken grid and trips a debug assertion (release
    /// builds still compact every full row).
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = self.cols as usize;
        let mut write_row = self.rows as usize;

        for read_row in (0..self.rows as usize).rev() {
            if self.is_row_full(read_row) {
                let reported = cleared_rows.try_push(read_row).is_ok();
                debug_assert!(reported, "more than four full rows in one pass");
                self.filled -= width;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.slots.copy_within(src..src + width, write_row * width);
                }
            }
        }

        // Rows freed at the top.
        self.slots[..write_row * width].fill(None);

        cleared_rows
    }

    /// Every locked cell, top to bottom, left to right
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.cols as usize;
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|kind| Cell::new((i % width) as i16, (i / width) as i16, kind))
        })
    }

    /// Empty the grid
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.filled = 0;
    }
}
