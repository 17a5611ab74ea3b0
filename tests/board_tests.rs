//! Board tests - gravity, correction, locking and line clearing

use std::time::Duration;

use tile_tetris::core::piece::spawn_anchor;
use tile_tetris::core::{Board, Config, Piece, SimpleRng};
use tile_tetris::types::{Cell, InputSymbol, PieceKind, Rotation};

fn board() -> Board {
    Board::new(Config::default(), 12345)
}

fn gravity_step(board: &Board) -> Duration {
    board.config().fall_interval() + Duration::from_millis(1)
}

fn fill_row_except(board: &mut Board, row: i16, skip: std::ops::Range<i16>) {
    for col in 0..board.cols() as i16 {
        if !skip.contains(&col) {
            board.grid_mut().set(col, row, Some(PieceKind::J));
        }
    }
}

#[test]
fn test_board_starts_empty_with_piece_at_spawn() {
    let b = board();
    assert_eq!(b.locked_cells().count(), 0);
    assert_eq!((b.piece().x, b.piece().y), spawn_anchor(b.cols()));
    assert_eq!(b.piece().rotation, Rotation::North);
    assert!(!b.piece().locked);
}

#[test]
fn test_left_clamp_keeps_piece_inside() {
    for kind in PieceKind::ALL {
        let mut b = board();
        let mut piece = Piece::new(kind, 0, 5);
        let (x_min, _) = piece.col_span();
        piece.move_by(-x_min, 0);
        b.set_piece(piece);

        for _ in 0..3 {
            b.tick(Duration::ZERO, Some(InputSymbol::MoveLeft));
            assert_eq!(b.piece().col_span().0, 0, "{:?} escaped the left wall", kind);
        }
        assert_eq!(b.pieces_locked(), 0);
    }
}

#[test]
fn test_rotation_at_right_wall_is_clamped() {
    let mut b = board();
    let cols = b.cols() as i16;
    // Vertical I hugging the right wall; turning it horizontal overflows.
    let mut piece = Piece::new(PieceKind::I, cols - 3, 5);
    piece.rotation = Rotation::East;
    b.set_piece(piece);

    b.tick(Duration::ZERO, Some(InputSymbol::Rotate));
    assert_eq!(b.piece().rotation, Rotation::North);
    assert_eq!(b.piece().col_span(), (cols - 4, cols - 1));
}

#[test]
fn test_move_right_into_locked_cell_is_rejected() {
    let mut b = board();
    // O occupies columns 5..=6 on rows 10..=11.
    b.set_piece(Piece::new(PieceKind::O, 4, 10));
    b.grid_mut().set(7, 10, Some(PieceKind::T));

    let out = b.tick(Duration::ZERO, Some(InputSymbol::MoveRight));
    assert!(out.lock.is_none());
    assert_eq!(b.piece().x, 4);
    assert_eq!(b.piece().y, 10);
    assert_eq!(b.grid().len(), 1);
}

#[test]
fn test_move_left_into_locked_cell_is_rejected() {
    let mut b = board();
    b.set_piece(Piece::new(PieceKind::O, 4, 10));
    b.grid_mut().set(4, 11, Some(PieceKind::T));

    b.tick(Duration::ZERO, Some(InputSymbol::MoveLeft));
    assert_eq!(b.piece().x, 4);
}

#[test]
fn test_soft_drop_onto_stack_locks_above_it() {
    let mut b = board();
    b.set_piece(Piece::new(PieceKind::O, 4, 10));
    b.grid_mut().set(5, 12, Some(PieceKind::T));

    let out = b.tick(Duration::ZERO, Some(InputSymbol::SoftDrop));
    let lock = out.lock.expect("drop into the stack should lock");
    assert_eq!(
        lock.cells.map(|c| c.pos()),
        [(5, 10), (6, 10), (5, 11), (6, 11)]
    );
    assert!(lock.cleared_rows.is_empty());
    assert_eq!(b.grid().len(), 5);
    assert_eq!((b.piece().x, b.piece().y), spawn_anchor(b.cols()));
}

#[test]
fn test_rotate_under_overhang_neither_locks_nor_overlaps() {
    let mut b = board();
    b.set_piece(Piece::new(PieceKind::T, 4, 10));
    // Turning to West hits (5, 12); lifting the undone turn hits (5, 9).
    b.grid_mut().set(5, 12, Some(PieceKind::O));
    b.grid_mut().set(5, 9, Some(PieceKind::O));

    let out = b.tick(Duration::ZERO, Some(InputSymbol::Rotate));
    assert!(out.lock.is_none());
    assert_eq!(b.pieces_locked(), 0);
    assert_eq!(b.grid().len(), 2);
    assert_eq!(b.piece().rotation, Rotation::North);
    assert_eq!((b.piece().x, b.piece().y), (4, 10));
    assert!(!b.grid().overlaps(&b.piece_cells()));
}

#[test]
fn test_rotate_push_back_lifts_when_clear() {
    let mut b = board();
    b.set_piece(Piece::new(PieceKind::T, 4, 10));
    b.grid_mut().set(5, 12, Some(PieceKind::O));

    let out = b.tick(Duration::ZERO, Some(InputSymbol::Rotate));
    assert!(out.lock.is_none());
    assert_eq!(b.piece().rotation, Rotation::North);
    assert_eq!(b.piece().y, 9);
    assert!(!b.grid().overlaps(&b.piece_cells()));
}

#[test]
fn test_block_out_leaves_spawn_inside_the_stack() {
    let mut b = board();
    let rows = b.rows() as i16;
    // Every spawn orientation covers row 1 somewhere in columns 5..=8.
    for col in 5..9 {
        b.grid_mut().set(col, 1, Some(PieceKind::Z));
    }
    b.set_piece(Piece::new(PieceKind::O, 0, rows - 2));

    let out = b.tick(Duration::ZERO, Some(InputSymbol::SoftDrop));
    let lock = out.lock.expect("drop past the floor should lock");
    assert!(lock.topped_out);
    assert_eq!(lock.dropped_cells, 0);
    assert_eq!(b.grid().len(), 8);
    assert!(b.topped_out());

    // The render feed shows the blocked piece on top of the stack.
    let snap = b.snapshot();
    assert!(snap.topped_out);
    assert!(snap
        .active
        .iter()
        .any(|a| snap.locked.iter().any(|l| l.pos() == a.pos())));

    // Inert until restart.
    let out = b.tick(Duration::from_secs(1), Some(InputSymbol::MoveLeft));
    assert_eq!(out, Default::default());
    assert_eq!(b.snapshot(), snap);
}

#[test]
fn test_lock_out_reports_cells_above_the_grid() {
    let mut b = board();
    b.grid_mut().set(5, 1, Some(PieceKind::Z));
    // O on rows 0..=1 overlaps (5, 1); settling lifts half of it above row 0.
    b.set_piece(Piece::new(PieceKind::O, 4, 0));

    let out = b.tick(Duration::ZERO, None);
    let lock = out.lock.expect("overlap without input should lock");
    assert!(lock.topped_out);
    assert_eq!(lock.dropped_cells, 2);
    assert_eq!(b.grid().len(), 3);
    assert!(b.grid().is_occupied(5, 0));
    assert!(b.grid().is_occupied(6, 0));
}

#[test]
fn test_gravity_at_floor_locks_and_spawns() {
    let mut b = board();
    let rows = b.rows() as i16;
    // O spans rows y..=y+1, so its lowest row is the floor row.
    b.set_piece(Piece::new(PieceKind::O, 2, rows - 2));
    assert_eq!(b.piece().max_row(), rows - 1);

    let step = gravity_step(&b);
    let out = b.tick(step, None);
    assert!(out.fell);
    let lock = out.lock.expect("floor breach should lock");
    assert!(!lock.topped_out);

    let locked: Vec<Cell> = b.locked_cells().collect();
    assert_eq!(locked.len(), 4);
    assert!(locked.iter().all(|c| c.kind == PieceKind::O));
    assert!(locked.iter().all(|c| c.row == rows - 2 || c.row == rows - 1));

    assert_eq!((b.piece().x, b.piece().y), spawn_anchor(b.cols()));
    assert_eq!(b.pieces_locked(), 1);
}

#[test]
fn test_gravity_onto_stack_locks_without_input() {
    let mut b = board();
    b.set_piece(Piece::new(PieceKind::O, 4, 10));
    b.grid_mut().set(6, 12, Some(PieceKind::S));

    let step = gravity_step(&b);
    let out = b.tick(step, None);
    assert!(out.lock.is_some());
    assert!(b.grid().is_occupied(5, 11));
    assert!(b.grid().is_occupied(6, 10));
}

#[test]
fn test_lock_clears_completed_row_and_shifts_above() {
    let mut b = board();
    let rows = b.rows() as i16;
    fill_row_except(&mut b, rows - 1, 5..9);
    b.grid_mut().set(2, rows - 2, Some(PieceKind::T));
    b.grid_mut().set(9, rows - 8, Some(PieceKind::Z));

    // Horizontal I (cells on anchor row + 1) hovering one row above the gap.
    b.set_piece(Piece::new(PieceKind::I, 5, rows - 3));
    let out = b.tick(Duration::ZERO, Some(InputSymbol::SoftDrop));
    assert!(out.lock.is_none());
    let out = b.tick(Duration::ZERO, Some(InputSymbol::SoftDrop));

    let lock = out.lock.expect("second drop should lock");
    assert_eq!(lock.cleared_rows.as_slice(), &[rows as usize - 1]);
    assert_eq!(b.lines_cleared(), 1);

    let locked: Vec<Cell> = b.locked_cells().collect();
    assert_eq!(
        locked,
        vec![
            Cell::new(9, rows - 7, PieceKind::Z),
            Cell::new(2, rows - 1, PieceKind::T),
        ]
    );
}

#[test]
fn test_single_clear_leaves_rows_below_untouched() {
    let mut b = board();
    fill_row_except(&mut b, 15, 0..0);
    b.grid_mut().set(3, 17, Some(PieceKind::L));
    b.grid_mut().set(1, 14, Some(PieceKind::S));
    b.grid_mut().set(0, 2, Some(PieceKind::I));

    let cleared = b.grid_mut().clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15]);
    assert_eq!(b.grid().row_count(15), 1);
    assert!(b.grid().is_occupied(3, 17));
    assert!(b.grid().is_occupied(1, 15));
    assert!(b.grid().is_occupied(0, 3));
    assert_eq!(b.grid().len(), 3);
}

#[test]
fn test_two_full_rows_clear_in_one_pass() {
    let mut b = board();
    fill_row_except(&mut b, 16, 0..0);
    fill_row_except(&mut b, 18, 0..0);
    b.grid_mut().set(4, 19, Some(PieceKind::T));
    b.grid_mut().set(0, 17, Some(PieceKind::O));
    b.grid_mut().set(1, 10, Some(PieceKind::Z));

    let cleared = b.grid_mut().clear_full_rows();
    assert_eq!(cleared.as_slice(), &[18, 16]);

    let locked: Vec<Cell> = b.locked_cells().collect();
    assert_eq!(
        locked,
        vec![
            Cell::new(1, 12, PieceKind::Z),
            Cell::new(0, 18, PieceKind::O),
            Cell::new(4, 19, PieceKind::T),
        ]
    );
}

#[test]
fn test_vertical_piece_clears_two_rows_on_lock() {
    let mut b = board();
    fill_row_except(&mut b, 18, 0..1);
    fill_row_except(&mut b, 19, 0..1);
    b.grid_mut().set(5, 16, Some(PieceKind::L));
    b.grid_mut().set(5, 17, Some(PieceKind::L));

    // East I sits in column x + 2.
    let mut piece = Piece::new(PieceKind::I, -2, 15);
    piece.rotation = Rotation::East;
    b.set_piece(piece);

    let out = b.tick(Duration::ZERO, Some(InputSymbol::SoftDrop));
    assert!(out.lock.is_none());
    assert_eq!(b.piece().y, 16);

    let step = gravity_step(&b);
    let out = b.tick(step, None);
    let lock = out.lock.expect("gravity past the floor should lock");
    assert_eq!(lock.cleared_rows.as_slice(), &[19, 18]);

    let locked: Vec<Cell> = b.locked_cells().collect();
    assert_eq!(
        locked,
        vec![
            Cell::new(0, 18, PieceKind::I),
            Cell::new(5, 18, PieceKind::L),
            Cell::new(0, 19, PieceKind::I),
            Cell::new(5, 19, PieceKind::L),
        ]
    );
}

#[test]
fn test_full_row_width_follows_config() {
    let config = Config {
        cols: 6,
        rows: 8,
        ..Config::default()
    };
    let mut b = Board::new(config, 3);
    for col in 0..5 {
        b.grid_mut().set(col, 7, Some(PieceKind::S));
    }
    assert!(!b.grid().is_row_full(7));
    b.grid_mut().set(5, 7, Some(PieceKind::S));
    assert!(b.grid().is_row_full(7));
    assert_eq!(b.grid_mut().clear_full_rows().len(), 1);
    assert!(b.grid().is_empty());
}

#[test]
fn test_no_overlap_after_any_tick() {
    let mut b = Board::new(Config::default(), 99);
    let mut rng = SimpleRng::new(2024);
    let symbols = [
        None,
        None,
        Some(InputSymbol::MoveLeft),
        Some(InputSymbol::MoveRight),
        Some(InputSymbol::SoftDrop),
        Some(InputSymbol::SoftDrop),
        Some(InputSymbol::Rotate),
        Some(InputSymbol::NewPiece),
    ];
    let cols = b.cols() as i16;
    let rows = b.rows() as i16;
    let mut locks = 0;

    for _ in 0..5000 {
        if b.topped_out() {
            b.tick(Duration::ZERO, Some(InputSymbol::Restart));
        }
        let input = symbols[rng.next_range(symbols.len() as u32) as usize];
        let elapsed = Duration::from_millis(rng.next_range(200) as u64);
        let before = b.grid().len();

        let out = b.tick(elapsed, input);

        for cell in b.locked_cells() {
            assert!(cell.col >= 0 && cell.col < cols && cell.row >= 0 && cell.row < rows);
        }
        if let Some(lock) = &out.lock {
            locks += 1;
            let cleared = lock.cleared_rows.len() * cols as usize;
            assert_eq!(b.grid().len(), before + 4 - lock.dropped_cells - cleared);
        }
        // A topped-out board keeps a blocked spawn inside the stack.
        if b.topped_out() {
            continue;
        }
        for cell in b.piece_cells() {
            assert!(
                !b.grid().is_occupied(cell.col, cell.row),
                "active cell {:?} overlaps the stack",
                cell
            );
            assert!(cell.col >= 0 && cell.col < cols);
            assert!(cell.row < rows);
        }
    }
    assert!(locks > 0, "random play should lock pieces");
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Some(InputSymbol::MoveLeft),
        None,
        Some(InputSymbol::Rotate),
        Some(InputSymbol::SoftDrop),
        None,
        Some(InputSymbol::MoveRight),
    ];
    let play = || {
        let mut b = Board::new(Config::default(), 7);
        for i in 0..600 {
            b.tick(Duration::from_millis(40), script[i % script.len()]);
        }
        b.snapshot()
    };
    assert_eq!(play(), play());
}
