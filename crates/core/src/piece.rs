//! Piece module - tetromino shapes, the falling piece and its input bindings
//!
//! Shapes are fixed rotation tables: four orientations per kind, each listing
//! four (dx, dy) offsets from the piece anchor inside a 4x4 box.
//! Transforms are pure state updates; bounds and collisions belong to the board.

use crate::types::{Cell, InputSymbol, PieceKind, Rotation, SHAPE_BOX};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i16, i16);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, right of center
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, left of center
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Spawn anchor for a grid `cols` wide: the shape box centered on row 0.
pub fn spawn_anchor(cols: u16) -> (i16, i16) {
    ((cols as i16 - SHAPE_BOX) / 2, 0)
}

/// A single piece transform, as bound to an input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Translate the anchor by (dx, dy)
    Move { dx: i16, dy: i16 },
    /// Turn by this many quarter turns
    Rotate(i32),
}

impl Transform {
    /// The transform that undoes `self`.
    pub fn inverse(self) -> Self {
        match self {
            Transform::Move { dx, dy } => Transform::Move { dx: -dx, dy: -dy },
            Transform::Rotate(delta) => Transform::Rotate(-delta),
        }
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i16,
    pub y: i16,
    /// Set when the board has merged this piece into the locked grid.
    pub locked: bool,
}

impl Piece {
    /// Create a piece in spawn orientation at the given anchor
    pub fn new(kind: PieceKind, x: i16, y: i16) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
            locked: false,
        }
    }

    /// Create a piece at the top-center of a grid `cols` wide
    pub fn spawn(kind: PieceKind, cols: u16) -> Self {
        let (x, y) = spawn_anchor(cols);
        Self::new(kind, x, y)
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// The four occupied cells, tagged with this piece's kind.
    pub fn cells(&self) -> [Cell; 4] {
        let cells = self
            .shape()
            .map(|(dx, dy)| Cell::new(self.x + dx, self.y + dy, self.kind));
        debug_assert!(
            (0..4).all(|i| (i + 1..4).all(|j| cells[i].pos() != cells[j].pos())),
            "piece cells must be distinct: {:?}",
            cells
        );
        cells
    }

    /// Translate the anchor. No bounds checking.
    pub fn move_by(&mut self, dx: i16, dy: i16) {
        self.x += dx;
        self.y += dy;
    }

    /// Turn by `delta` quarter turns, wrapping in both directions. No legality check.
    pub fn rotate(&mut self, delta: i32) {
        self.rotation = self.rotation.rotate_by(delta);
    }

    pub fn apply(&mut self, transform: Transform) {
        match transform {
            Transform::Move { dx, dy } => self.move_by(dx, dy),
            Transform::Rotate(delta) => self.rotate(delta),
        }
    }

    /// Input binding table: which transform a movement symbol triggers.
    ///
    /// Control symbols (new piece, pause, restart, quit) have no binding.
    pub fn binding(symbol: InputSymbol) -> Option<Transform> {
        match symbol {
            InputSymbol::MoveLeft => Some(Transform::Move { dx: -1, dy: 0 }),
            InputSymbol::MoveRight => Some(Transform::Move { dx: 1, dy: 0 }),
            InputSymbol::SoftDrop => Some(Transform::Move { dx: 0, dy: 1 }),
            InputSymbol::Rotate => Some(Transform::Rotate(-1)),
            _ => None,
        }
    }

    /// Column span `(min, max)` of the occupied cells.
    pub fn col_span(&self) -> (i16, i16) {
        let shape = self.shape();
        let min = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let max = shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
        (self.x + min, self.x + max)
    }

    /// Lowest occupied row (largest row index).
    pub fn max_row(&self) -> i16 {
        self.y + self.shape().iter().map(|&(_, dy)| dy).max().unwrap_or(0)
    }

    /// Highest occupied row (smallest row index).
    pub fn min_row(&self) -> i16 {
        self.y + self.shape().iter().map(|&(_, dy)| dy).min().unwrap_or(0)
    }
}
