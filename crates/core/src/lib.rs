//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board simulation and the piece state machine. It has
//! **no dependencies** on terminals, keyboards or clocks, making it:
//!
//! - **Deterministic**: the same seed and input sequence give the same game
//! - **Testable**: every rule is checked headless
//! - **Portable**: the caller owns the timer and feeds elapsed time in
//!
//! # Module Structure
//!
//! - [`board`]: per-tick gravity, input dispatch, correction, locking
//! - [`config`]: startup configuration, loaded from JSON
//! - [`grid`]: locked-cell storage and line clearing
//! - [`piece`]: tetromino rotation tables, the falling piece, input bindings
//! - [`rng`]: seeded uniform piece selection
//! - [`snapshot`]: render feed
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tile_tetris_core::{Board, Config};
//! use tile_tetris_types::InputSymbol;
//!
//! let mut board = Board::new(Config::default(), 12345);
//! let x = board.piece().x;
//!
//! board.tick(Duration::from_millis(16), Some(InputSymbol::MoveLeft));
//! assert_eq!(board.piece().x, x - 1);
//!
//! // Nothing has landed yet.
//! assert_eq!(board.locked_cells().count(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`Board::tick`](board::Board::tick) once per frame with the elapsed
//! time since the previous call. The piece falls one row each time the
//! accumulated time exceeds `fall_interval_ms`.

pub mod board;
pub mod config;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use tile_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockEvent, TickOutcome};
pub use config::{Config, ConfigError};
pub use grid::Grid;
pub use piece::{get_shape, Piece, Transform};
pub use rng::SimpleRng;
pub use snapshot::BoardSnapshot;
