//! Grid line geometry.
//!
//! A board cell is `2 * tile_size` terminal columns wide and `tile_size` rows
//! tall (terminal glyphs are roughly twice as tall as they are wide). Lines sit
//! on the boundary between neighbouring cells, in board-local coordinates.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    /// Row `y`, from column 0 for `len` columns
    Horizontal { y: u16, len: u16 },
    /// Column `x`, from row 0 for `len` rows
    Vertical { x: u16, len: u16 },
}

/// Terminal size of one board cell, `(width, height)`.
pub fn cell_size(tile_size: u16) -> (u16, u16) {
    (tile_size.saturating_mul(2), tile_size)
}

/// Terminal size of the whole board area, `(width, height)`.
pub fn board_size(rows: u16, cols: u16, tile_size: u16) -> (u16, u16) {
    let (cw, ch) = cell_size(tile_size);
    (cols.saturating_mul(cw), rows.saturating_mul(ch))
}

/// The interior lines of a `rows` x `cols` grid.
///
/// Horizontal lines come first (one per boundary between rows), then vertical.
pub fn grid_lines(rows: u16, cols: u16, tile_size: u16) -> impl Iterator<Item = GridLine> {
    let (cw, ch) = cell_size(tile_size);
    let (width, height) = board_size(rows, cols, tile_size);
    let horizontal = (1..rows).map(move |row| GridLine::Horizontal {
        y: row * ch,
        len: width,
    });
    let vertical = (1..cols).map(move |col| GridLine::Vertical {
        x: col * cw,
        len: height,
    });
    horizontal.chain(vertical)
}
