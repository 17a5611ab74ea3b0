//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::InputSymbol`] and reduces a
//! tick's worth of key events to at most one symbol.

pub mod map;
pub mod sampler;

pub use tile_tetris_types as types;

pub use map::{map_key_event, should_quit};
pub use sampler::InputSampler;
