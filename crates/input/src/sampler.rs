//! Per-tick input sampling.
//!
//! The game loop pushes every key event it reads and takes one symbol per
//! simulation tick:
//!
//! - the first recognized symbol of a tick wins; later ones are dropped
//! - a movement symbol equal to the last accepted one is dropped until
//!   `repeat_threshold` ticks have passed (terminal auto-repeat arrives as a
//!   stream of presses, so this paces held keys)
//! - quit is never dropped and stays set once seen

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key_event;
use crate::types::InputSymbol;

#[derive(Debug, Clone)]
pub struct InputSampler {
    pending: Option<InputSymbol>,
    quit: bool,
    last_accepted: Option<InputSymbol>,
    ticks_since_accept: u32,
    repeat_threshold: u32,
}

impl InputSampler {
    pub fn new(repeat_threshold: u32) -> Self {
        Self {
            pending: None,
            quit: false,
            last_accepted: None,
            ticks_since_accept: 0,
            repeat_threshold,
        }
    }

    /// Feed a raw terminal key event. Releases are ignored.
    pub fn push_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(symbol) = map_key_event(key) {
            self.push(symbol);
        }
    }

    /// Feed an already mapped symbol.
    pub fn push(&mut self, symbol: InputSymbol) {
        if symbol == InputSymbol::Quit {
            self.quit = true;
            return;
        }
        if self.pending.is_some() {
            return;
        }
        if symbol.is_movement()
            && self.last_accepted == Some(symbol)
            && self.ticks_since_accept < self.repeat_threshold
        {
            return;
        }
        self.pending = Some(symbol);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Take this tick's symbol. Call exactly once per simulation tick.
    pub fn take(&mut self) -> Option<InputSymbol> {
        self.ticks_since_accept = self.ticks_since_accept.saturating_add(1);
        if self.quit {
            return Some(InputSymbol::Quit);
        }

        let symbol = self.pending.take();
        if let Some(s) = symbol.filter(InputSymbol::is_movement) {
            self.last_accepted = Some(s);
            self.ticks_since_accept = 0;
        }
        symbol
    }

    /// Drop anything queued (used when leaving pause).
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_accepted = None;
        self.ticks_since_accept = 0;
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_INPUT_REPEAT_THRESHOLD)
    }
}
