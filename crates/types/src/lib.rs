//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, input mapping).
//!
//! # Grid Coordinates
//!
//! - **Columns**: `0..cols`, left to right
//! - **Rows**: `0..rows`, top to bottom (gravity increases the row index)
//!
//! A falling piece may transiently sit outside that range before the board
//! corrects it, so coordinates are signed.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 20 | Grid height in cells |
//! | `DEFAULT_COLS` | 15 | Grid width in cells (also the full-row count) |
//! | `DEFAULT_TILE_SIZE` | 1 | Terminal rows per cell |
//! | `DEFAULT_FALL_INTERVAL_MS` | 500 | Gravity interval |
//! | `DEFAULT_INPUT_REPEAT_THRESHOLD` | 3 | Ticks between repeats of one movement |
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tile_tetris_types::{Cell, InputSymbol, PieceKind, Rotation};
//!
//! let cell = Cell::new(3, 7, PieceKind::T);
//! assert_eq!(cell.pos(), (3, 7));
//!
//! assert_eq!(Rotation::North.rotate_by(-1), Rotation::West);
//! assert!(InputSymbol::Rotate.is_movement());
//! assert!(!InputSymbol::Pause.is_movement());
//! ```

/// Default grid height in cells.
pub const DEFAULT_ROWS: u16 = 20;

/// Default grid width in cells.
pub const DEFAULT_COLS: u16 = 15;

/// Default terminal rows per board cell (columns are doubled for aspect ratio).
pub const DEFAULT_TILE_SIZE: u16 = 1;

/// Default gravity interval in milliseconds.
pub const DEFAULT_FALL_INTERVAL_MS: u64 = 500;

/// Default number of ticks before the same movement symbol is accepted again.
pub const DEFAULT_INPUT_REPEAT_THRESHOLD: u32 = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Every shape fits in a 4x4 box anchored at its top-left corner.
pub const SHAPE_BOX: i16 = 4;

/// The seven tetromino piece kinds
///
/// The kind doubles as the color tag of every cell it occupies:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in a stable order (used for uniform random selection).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Lowercase name, used as a log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, indexed 0..=3
///
/// The cycle goes: North (0) → East (1) → South (2) → West (3) → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate by `delta` quarter turns, wrapping in both directions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_by(-1), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_by(4), Rotation::East);
    /// assert_eq!(Rotation::South.rotate_by(-6), Rotation::North);
    /// ```
    pub fn rotate_by(&self, delta: i32) -> Self {
        Self::from_index((self.index() as i32 + delta).rem_euclid(4) as u8)
    }

    /// Rotation index in `0..4`.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from an index, taken modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Input symbols delivered to the simulation, at most one per tick
///
/// The first four are piece movements (see `Piece::binding` in the core crate);
/// the rest are session controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down; locks on contact
    SoftDrop,
    /// Rotate piece one quarter turn
    Rotate,
    /// Replace the falling piece with a fresh one
    NewPiece,
    /// Enter or leave the pause wait loop
    Pause,
    /// Start a new game on an empty grid
    Restart,
    /// Leave the game loop
    Quit,
}

impl InputSymbol {
    /// True for the four symbols that move or rotate the piece.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            InputSymbol::MoveLeft
                | InputSymbol::MoveRight
                | InputSymbol::SoftDrop
                | InputSymbol::Rotate
        )
    }
}

/// A grid coordinate plus the kind (color) of the piece that occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i16,
    pub row: i16,
    pub kind: PieceKind,
}

impl Cell {
    pub const fn new(col: i16, row: i16, kind: PieceKind) -> Self {
        Self { col, row, kind }
    }

    /// Coordinate without the color tag.
    pub fn pos(&self) -> (i16, i16) {
        (self.col, self.row)
    }
}

/// One slot of the locked grid.
///
/// - `None`: Empty
/// - `Some(PieceKind)`: Locked by a piece of that kind
pub type Slot = Option<PieceKind>;
