use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_tetris::core::{Board, Config, Grid};
use tile_tetris::types::{InputSymbol, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut board = Board::new(Config::default(), 12345);

    c.bench_function("board_tick_16ms", |b| {
        b.iter(|| {
            if board.topped_out() {
                board.restart();
            }
            board.tick(black_box(Duration::from_millis(16)), None);
        })
    });
}

fn bench_soft_drop(c: &mut Criterion) {
    let mut board = Board::new(Config::default(), 12345);

    c.bench_function("soft_drop_until_lock", |b| {
        b.iter(|| {
            if board.topped_out() {
                board.restart();
            }
            while board
                .tick(Duration::ZERO, Some(InputSymbol::SoftDrop))
                .lock
                .is_none()
            {}
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(config.rows, config.cols);
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..config.cols as i16 {
                    grid.set(col, row, Some(PieceKind::I));
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_new_piece(c: &mut Criterion) {
    let mut board = Board::new(Config::default(), 12345);

    c.bench_function("new_piece", |b| {
        b.iter(|| {
            board.tick(Duration::ZERO, Some(InputSymbol::NewPiece));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::new(Config::default(), 12345);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            board.tick(Duration::ZERO, Some(InputSymbol::Rotate));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_soft_drop,
    bench_line_clear,
    bench_new_piece,
    bench_rotate
);
criterion_main!(benches);
