//! Terminal runner (default binary).
//!
//! Owns everything the simulation does not: the clock, the keyboard, the
//! terminal and the pause/quit lifecycle. One loop iteration samples input,
//! steps the board once the tick interval has elapsed, and renders.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tile_tetris::core::{Board, BoardSnapshot, Config};
use tile_tetris::input::{map_key_event, InputSampler};
use tile_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_tetris::types::InputSymbol;

#[derive(Debug, Parser)]
#[command(name = "tile-tetris", version, about = "Falling-block puzzle in the terminal")]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid height, overriding the config file
    #[arg(long)]
    rows: Option<u16>,

    /// Grid width, overriding the config file
    #[arg(long)]
    cols: Option<u16>,

    /// Piece sequence seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(args.log_file.as_deref())?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, rows = config.rows, cols = config.cols, "starting session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    Ok(config.validate()?)
}

/// Install a file subscriber. Without a log file nothing is installed, so the
/// alternate screen is never written to.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

struct Screen<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    snap: BoardSnapshot,
    fb: FrameBuffer,
}

impl Screen<'_> {
    fn draw(&mut self, board: &Board, paused: bool) -> Result<()> {
        board.snapshot_into(&mut self.snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(&self.snap, paused, Viewport::new(w, h), &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

fn run(term: &mut TerminalRenderer, config: Config, seed: u32) -> Result<()> {
    let mut board = Board::new(config, seed);
    let mut input = InputSampler::new(config.input_repeat_threshold);
    let mut screen = Screen {
        term,
        view: GameView::new(config.tile_size),
        snap: board.snapshot(),
        fb: FrameBuffer::new(0, 0),
    };

    let tick = config.tick();
    let mut last_tick = Instant::now();

    loop {
        if input.quit_requested() {
            info!(pieces = board.pieces_locked(), lines = board.lines_cleared(), "quit");
            return Ok(());
        }

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input.push_key(key),
                Event::Resize(..) => screen.term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed < tick {
            continue;
        }
        last_tick = Instant::now();

        match input.take() {
            Some(InputSymbol::Quit) => continue,
            Some(InputSymbol::Pause) => {
                if !pause(&mut screen, &board)? {
                    return Ok(());
                }
                input.reset();
                last_tick = Instant::now();
            }
            symbol => {
                let outcome = board.tick(elapsed, symbol);
                if let Some(lock) = outcome.lock.filter(|l| !l.cleared_rows.is_empty()) {
                    debug!(rows = ?lock.cleared_rows.as_slice(), "cleared rows");
                }
            }
        }

        // Render.
        screen.draw(&board, false)?;
    }
}

/// Block until the player resumes (`true`) or quits (`false`).
///
/// Nothing else advances while paused; the gravity accumulator is untouched.
fn pause(screen: &mut Screen<'_>, board: &Board) -> Result<bool> {
    debug!("paused");
    loop {
        screen.draw(board, true)?;
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => match map_key_event(key) {
                Some(InputSymbol::Pause) => {
                    debug!("resumed");
                    return Ok(true);
                }
                Some(InputSymbol::Quit) => return Ok(false),
                _ => {}
            },
            Event::Resize(..) => screen.term.invalidate(),
            _ => {}
        }
    }
}
