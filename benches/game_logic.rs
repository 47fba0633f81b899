use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simple_tetris::core::{Board, GameSession, GameSnapshot, PieceCatalog};
use simple_tetris::term::{FrameBuffer, GameView, Viewport};
use simple_tetris::types::{GameAction, GamePhase, PieceColor};
use simple_tetris::DEFAULT_PIECES;

fn catalog() -> Arc<PieceCatalog> {
    Arc::new(PieceCatalog::parse(DEFAULT_PIECES).unwrap())
}

fn bench_catalog_parse(c: &mut Criterion) {
    c.bench_function("parse_default_catalog", |b| {
        b.iter(|| PieceCatalog::parse(black_box(DEFAULT_PIECES)).unwrap())
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = GameSession::with_seed(catalog(), 12345);
    game.start();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if !game.tick() && game.phase() != GamePhase::Running {
                game.reset();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let gray = PieceColor::new("#808080");
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 0..4 {
                for x in 0..10 {
                    board.set(x, y, Some(gray.clone()));
                }
            }
            black_box(board.clear_full_lines())
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut game = GameSession::with_seed(catalog(), 12345);
    game.start();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            game.apply_action(GameAction::MoveRight);
            game.apply_action(GameAction::RotateCw);
            game.apply_action(GameAction::MoveLeft);
            game.apply_action(GameAction::RotateCcw);
        })
    });
}

fn bench_hard_drop_game(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut game = GameSession::with_seed(catalog(), 7);
            game.start();
            while game.phase() == GamePhase::Running {
                game.hard_drop();
            }
            black_box(game.score())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = GameSession::with_seed(catalog(), 12345);
    game.start();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_catalog_parse,
    bench_tick,
    bench_line_clear,
    bench_move_and_rotate,
    bench_hard_drop_game,
    bench_render
);
criterion_main!(benches);
