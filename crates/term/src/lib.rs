//! Terminal rendering layer.
//!
//! Renders the board's render feed into a simple framebuffer that is flushed
//! to the terminal through crossterm. Nothing here feeds back into the
//! simulation.
//!
//! - [`fb`]: framebuffer and glyph styles
//! - [`geometry`]: cell size and grid line layout for a given tile size
//! - [`game_view`]: snapshot → framebuffer (pure, testable)
//! - [`renderer`]: framebuffer → terminal

pub mod fb;
pub mod game_view;
pub mod geometry;
pub mod renderer;

pub use tile_tetris_core as core;
pub use tile_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use geometry::{board_size, cell_size, grid_lines, GridLine};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
