//! Render feed: a read-only copy of what the renderer draws.

use crate::types::{Cell, DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Every locked cell, row-major
    pub locked: Vec<Cell>,
    /// The falling piece. Once topped out it may overlap `locked`.
    pub active: [Cell; 4],
    pub topped_out: bool,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
}

impl BoardSnapshot {
    /// A snapshot of an empty default-sized grid around `active`.
    pub fn empty(active: [Cell; 4]) -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            locked: Vec::new(),
            active,
            topped_out: false,
            pieces_locked: 0,
            lines_cleared: 0,
        }
    }

    /// Whether (col, row) is inside the grid.
    pub fn contains(&self, col: i16, row: i16) -> bool {
        col >= 0 && col < self.cols as i16 && row >= 0 && row < self.rows as i16
    }

    /// Active cells that fall inside the grid (a piece may poke above the top).
    pub fn visible_active(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.active
            .iter()
            .filter(move |c| self.contains(c.col, c.row))
    }
}
