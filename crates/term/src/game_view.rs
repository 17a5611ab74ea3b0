//! GameView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::geometry::{board_size, cell_size, grid_lines, GridLine};
use crate::types::{PieceKind, DEFAULT_TILE_SIZE};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    tile_size: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl GameView {
    pub fn new(tile_size: u16) -> Self {
        Self {
            tile_size: tile_size.max(1),
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        paused: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_glyph(' '));

        let (board_w, board_h) = board_size(snap.rows, snap.cols, self.tile_size);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin = (start_x + 1, start_y + 1);

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::default();

        fb.fill_rect(origin.0, origin.1, board_w, board_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        if self.tile_size >= 2 {
            self.draw_grid_lines(fb, snap, origin);
        } else {
            self.draw_grid_dots(fb, snap, origin);
        }

        for cell in snap.locked.iter().filter(|c| snap.contains(c.col, c.row)) {
            self.draw_board_cell(fb, origin, cell.col as u16, cell.row as u16, cell.kind);
        }

        for cell in snap.visible_active() {
            self.draw_board_cell(fb, origin, cell.col as u16, cell.row as u16, cell.kind);
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.topped_out {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "TOPPED OUT");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, paused: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, paused, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn grid_style() -> CellStyle {
        CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(100, 100, 100), PLAY_BG)
        }
    }

    fn draw_grid_lines(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, origin: (u16, u16)) {
        let style = Self::grid_style();
        for line in grid_lines(snap.rows, snap.cols, self.tile_size) {
            match line {
                GridLine::Horizontal { y, len } => {
                    for dx in 0..len {
                        let (x, y) = (origin.0 + dx, origin.1 + y);
                        let ch = match fb.get(x, y).map(|g| g.ch) {
                            Some('│') => '┼',
                            _ => '─',
                        };
                        fb.put_char(x, y, ch, style);
                    }
                }
                GridLine::Vertical { x, len } => {
                    for dy in 0..len {
                        let (x, y) = (origin.0 + x, origin.1 + dy);
                        let ch = match fb.get(x, y).map(|g| g.ch) {
                            Some('─') => '┼',
                            _ => '│',
                        };
                        fb.put_char(x, y, ch, style);
                    }
                }
            }
        }
    }

    fn draw_grid_dots(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, origin: (u16, u16)) {
        let style = Self::grid_style();
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                self.fill_cell_rect(fb, origin, col, row, '·', style);
            }
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        col: u16,
        row: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(piece_color(kind), PLAY_BG)
        };
        self.fill_cell_rect(fb, origin, col, row, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (cw, chh) = cell_size(self.tile_size);
        let px = origin.0 + col * cw;
        let py = origin.1 + row * chh;
        fb.fill_rect(px, py, cw, chh, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines_cleared, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces_locked, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for help in [
            "←→ move",
            "↑  rotate",
            "↓  drop",
            "n  new piece",
            "p  pause",
            "r  restart",
            "q  quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Display color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
