//! Board module - the per-tick simulation
//!
//! The board owns the locked grid and the falling piece. Each tick runs the same
//! fixed sequence:
//!
//! 1. **Gravity**: the caller feeds elapsed time; once the accumulator exceeds
//!    the fall interval it resets and the piece moves one row down.
//! 2. **Input dispatch**: at most one symbol; movement symbols apply the piece's
//!    bound transform, control symbols act on the session.
//! 3. **Horizontal clamp**: after a movement, the piece is shifted back inside
//!    the side walls.
//! 4. **Overlap test** against the locked cells.
//! 5. **Resolution**: the tentative move has already been applied, so a bad
//!    position is undone according to the input that caused it, or the piece is
//!    lifted and locked.
//! 6. **Lock**: the four cells join the grid, full rows are cleared and a new
//!    piece spawns at the top-center.
//!
//! Nothing here fails: every illegal position is corrected in place.

use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::Config;
use crate::grid::Grid;
use crate::piece::{Piece, Transform};
use crate::rng::SimpleRng;
use crate::snapshot::BoardSnapshot;
use crate::types::{Cell, InputSymbol};

/// What happened when a piece locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// The four cells merged into the grid (pre-clear coordinates)
    pub cells: [Cell; 4],
    /// Rows removed by the lock, bottom to top, as indexed before shifting
    pub cleared_rows: ArrayVec<usize, 4>,
    /// Cells above the top row; they are not stored in the grid
    pub dropped_cells: usize,
    /// The lock ended the session: part of the piece sat above the top row,
    /// or the next piece spawned inside the stack
    pub topped_out: bool,
}

/// Result of one [`Board::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Gravity moved the piece this tick
    pub fell: bool,
    pub lock: Option<LockEvent>,
}

/// Session state: locked grid, falling piece and gravity accumulator
#[derive(Debug, Clone)]
pub struct Board {
    config: Config,
    grid: Grid,
    piece: Piece,
    rng: SimpleRng,
    fall_timer: Duration,
    topped_out: bool,
    pieces_locked: u32,
    lines_cleared: u32,
}

impl Board {
    /// Create a board for an already validated config and spawn the first piece
    pub fn new(config: Config, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let piece = Piece::spawn(rng.next_kind(), config.cols);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "spawned piece");
        Self {
            grid: Grid::new(config.rows, config.cols),
            config,
            piece,
            rng,
            fall_timer: Duration::ZERO,
            topped_out: false,
            pieces_locked: 0,
            lines_cleared: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rows(&self) -> u16 {
        self.config.rows
    }

    pub fn cols(&self) -> u16 {
        self.config.cols
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access to the locked cells, for scripted setups.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Replace the falling piece, for scripted setups.
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
    }

    pub fn fall_timer(&self) -> Duration {
        self.fall_timer
    }

    /// The session has ended. After a block-out the falling piece is left
    /// where it spawned, inside the stack.
    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Every locked cell, for rendering
    pub fn locked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid.cells()
    }

    /// The falling piece's cells, for rendering
    pub fn piece_cells(&self) -> [Cell; 4] {
        self.piece.cells()
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.rows = self.config.rows;
        out.cols = self.config.cols;
        out.locked.clear();
        out.locked.extend(self.grid.cells());
        out.active = self.piece.cells();
        out.topped_out = self.topped_out;
        out.pieces_locked = self.pieces_locked;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::empty(self.piece.cells());
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, elapsed: Duration, input: Option<InputSymbol>) -> TickOutcome {
        if input == Some(InputSymbol::Restart) {
            self.restart();
            return TickOutcome::default();
        }
        if self.topped_out {
            return TickOutcome::default();
        }

        let fell = self.apply_gravity(elapsed);

        let pressed = match input {
            Some(InputSymbol::NewPiece) => {
                self.spawn_piece();
                None
            }
            Some(symbol) => Piece::binding(symbol),
            None => None,
        };
        let before = self.piece;
        if let Some(transform) = pressed {
            self.piece.apply(transform);
        }

        let lock = self.resolve(pressed, before);
        TickOutcome { fell, lock }
    }

    /// Clear the grid and start over; the piece sequence continues.
    pub fn restart(&mut self) {
        info!(
            pieces = self.pieces_locked,
            lines = self.lines_cleared,
            "new game"
        );
        self.grid.clear();
        self.fall_timer = Duration::ZERO;
        self.topped_out = false;
        self.pieces_locked = 0;
        self.lines_cleared = 0;
        self.spawn_piece();
    }

    fn apply_gravity(&mut self, elapsed: Duration) -> bool {
        self.fall_timer += elapsed;
        if self.fall_timer > self.config.fall_interval() {
            self.fall_timer = Duration::ZERO;
            self.piece.move_by(0, 1);
            return true;
        }
        false
    }

    fn spawn_piece(&mut self) {
        self.piece = Piece::spawn(self.rng.next_kind(), self.config.cols);
        debug!(
            kind = self.piece.kind.as_str(),
            x = self.piece.x,
            y = self.piece.y,
            "spawned piece"
        );
    }

    fn overlaps(&self) -> bool {
        self.grid.overlaps(&self.piece.cells())
    }

    fn breaches_floor(&self) -> bool {
        self.piece.max_row() > self.config.rows as i16 - 1
    }

    /// Shift the piece back inside the side walls
    fn clamp_horizontal(&mut self) {
        let (x_min, x_max) = self.piece.col_span();
        let last_col = self.config.cols as i16 - 1;
        if x_max > last_col {
            self.piece.move_by(last_col - x_max, 0);
        } else if x_min < 0 {
            self.piece.move_by(-x_min, 0);
        }
    }

    /// Correct the piece after the tentative move, locking it when it has landed.
    ///
    /// `before` is the piece after gravity and before the input.
    fn resolve(&mut self, pressed: Option<Transform>, before: Piece) -> Option<LockEvent> {
        let Some(transform) = pressed else {
            if self.breaches_floor() || self.overlaps() {
                return Some(self.settle_and_lock());
            }
            return None;
        };

        self.clamp_horizontal();

        if self.overlaps() {
            match transform {
                Transform::Move { dy, .. } if dy > 0 => return Some(self.settle_and_lock()),
                Transform::Move { .. } => self.piece.apply(transform.inverse()),
                Transform::Rotate(_) => {
                    // Push back: undo the turn and lift one row, no lock.
                    self.piece.apply(transform.inverse());
                    self.piece.move_by(0, -1);
                    self.clamp_horizontal();
                    if self.overlaps() {
                        // Lifted into an overhang: keep the pre-input position.
                        self.piece = before;
                    }
                }
            }
        }

        // Only gravity can leave the piece here: it landed in the same tick as
        // the input.
        if self.breaches_floor() || self.overlaps() {
            return Some(self.settle_and_lock());
        }
        None
    }

    /// Lift the piece until it is clear of the floor and the stack, then lock it.
    ///
    /// After a single gravity or drop step this is exactly one row. Above row 0
    /// nothing can overlap, so the loop always ends.
    fn settle_and_lock(&mut self) -> LockEvent {
        self.piece.move_by(0, -1);
        while self.breaches_floor() || self.overlaps() {
            self.piece.move_by(0, -1);
        }
        self.lock_piece()
    }

    /// Merge the piece into the grid, clear full rows and spawn the next piece
    fn lock_piece(&mut self) -> LockEvent {
        self.piece.locked = true;
        let cells = self.piece.cells();
        let topped_out = self.piece.min_row() < 0;
        let stored = self.grid.lock_cells(&cells);
        let dropped_cells = cells.len() - stored;
        debug_assert!(topped_out || dropped_cells == 0);

        let cleared_rows = self.grid.clear_full_rows();

        self.pieces_locked += 1;
        self.lines_cleared += cleared_rows.len() as u32;
        debug!(
            kind = self.piece.kind.as_str(),
            x = self.piece.x,
            y = self.piece.y,
            cleared = cleared_rows.len(),
            "locked piece"
        );

        self.spawn_piece();

        // Lock-out (part of the piece above the grid) or block-out (the next
        // piece spawns inside the stack) ends the session.
        let topped_out = topped_out || self.overlaps();
        if topped_out {
            self.topped_out = true;
            info!(
                pieces = self.pieces_locked,
                lines = self.lines_cleared,
                dropped_cells,
                "topped out"
            );
        }

        LockEvent {
            cells,
            cleared_rows,
            dropped_cells,
            topped_out,
        }
    }
}
