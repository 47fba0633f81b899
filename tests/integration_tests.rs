//! Integration tests for the game session, driven the way the shell drives it

use std::sync::Arc;

use simple_tetris::core::{GameSession, PieceCatalog, Randomizer};
use simple_tetris::types::{GameAction, GamePhase, PieceColor, PREVIEW_LEN, SPAWN_POSITION};
use simple_tetris::DEFAULT_PIECES;

const T_ONLY: &str = "---\nT:#A000F0:\n0100\n1100\n0100\n0000\n";
const O_ONLY: &str = "---\nO:#F0F000:\n11\n11\n";

/// Replays a fixed list of picks, cycling.
struct Script {
    picks: Vec<u32>,
    next: usize,
}

impl Script {
    fn new(picks: &[u32]) -> Self {
        Self {
            picks: picks.to_vec(),
            next: 0,
        }
    }
}

impl Randomizer for Script {
    fn next_range(&mut self, max: u32) -> u32 {
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick % max
    }
}

fn session(pieces: &str) -> GameSession<Script> {
    let catalog = Arc::new(PieceCatalog::parse(pieces).unwrap());
    GameSession::new(catalog, Script::new(&[0]))
}

#[test]
fn test_game_lifecycle() {
    let catalog = Arc::new(PieceCatalog::parse(DEFAULT_PIECES).unwrap());
    let mut game = GameSession::with_seed(catalog, 12345);
    assert_eq!(game.phase(), GamePhase::NotStarted);
    assert!(game.active().is_none());

    assert!(game.apply_action(GameAction::Start));
    assert_eq!(game.phase(), GamePhase::Running);
    let active = game.active().unwrap();
    assert_eq!((active.x(), active.y()), SPAWN_POSITION);
    assert_eq!(game.preview().len(), PREVIEW_LEN);

    // Start is only accepted from the start screen.
    assert!(!game.apply_action(GameAction::Start));
}

#[test]
fn test_preview_feeds_active_piece() {
    let catalog = Arc::new(PieceCatalog::parse(DEFAULT_PIECES).unwrap());
    // Picks I, O, T, S for the initial preview, then Z.
    let mut game = GameSession::new(catalog, Script::new(&[0, 1, 2, 3, 4]));
    let keys: Vec<String> = game.preview().keys().map(String::from).collect();
    assert_eq!(keys, ["I", "O", "T", "S"]);

    game.start();
    assert_eq!(game.active().unwrap().key(), "I");
    let keys: Vec<String> = game.preview().keys().map(String::from).collect();
    assert_eq!(keys, ["O", "T", "S", "Z"]);
}

#[test]
fn test_soft_drop_to_floor_then_lock() {
    let mut game = session(T_ONLY);
    game.start();

    let mut drops = 0;
    while game.soft_drop() {
        drops += 1;
    }
    // Anchor y0 = 18 and the lowest T offset is y = 0.
    assert_eq!(drops, 18);

    let purple = PieceColor::new("#A000F0");
    for (x, y) in [(4, 1), (5, 0), (5, 1), (6, 1)] {
        assert_eq!(game.board().get(x, y), Some(&Some(purple.clone())));
    }
    assert_eq!(game.board().filled_count(), 4);
    // Next piece is already at home.
    let active = game.active().unwrap();
    assert_eq!((active.x(), active.y()), SPAWN_POSITION);
}

#[test]
fn test_second_hold_without_lock_is_noop() {
    let mut game = session(T_ONLY);
    game.start();

    assert!(game.apply_action(GameAction::Hold));
    assert!(!game.can_hold());
    let before = game.snapshot();

    assert!(!game.apply_action(GameAction::Hold));
    assert_eq!(game.snapshot(), before);

    game.apply_action(GameAction::HardDrop);
    assert!(game.can_hold());
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut game = session(O_ONLY);
    game.start();
    game.move_left();
    game.move_left();

    // O spawns over (4..=5, 18..=19).
    game.board_mut().set(5, 19, Some(PieceColor::new("#808080")));
    assert_eq!(game.hard_drop(), 18);

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(game.active().is_none());
    let board = game.board().clone();

    assert!(!game.tick());
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
        GameAction::Start,
    ] {
        assert!(!game.apply_action(action), "{action:?}");
    }
    assert_eq!(game.board(), &board);
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn test_reset_from_game_over() {
    let mut game = session(O_ONLY);
    game.start();
    game.hold();
    game.board_mut().set(0, 0, Some(PieceColor::new("#808080")));
    game.board_mut().set(5, 19, Some(PieceColor::new("#808080")));
    game.hard_drop();
    assert_eq!(game.phase(), GamePhase::GameOver);

    assert!(game.apply_action(GameAction::Reset));
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert!(game.hold_slot().piece().is_none());
    assert!(game.can_hold());
    assert_eq!(game.preview().len(), PREVIEW_LEN);
    assert!(game.active().is_some());
}

#[test]
fn test_tetris_scores_1200() {
    let catalog = Arc::new(
        PieceCatalog::parse("---\nI:#00F0F0:\n0000\n1111\n0000\n0000\n").unwrap(),
    );
    let mut game = GameSession::new(catalog, Script::new(&[0]));
    game.start();
    // Vertical I covers column x + 1 = 5, rows y..=y+3.
    for y in 0..4 {
        for x in 0..10 {
            if x != 5 {
                game.board_mut().set(x, y, Some(PieceColor::new("#808080")));
            }
        }
    }
    game.hard_drop();
    assert_eq!(game.score(), 1200);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_gravity_over_many_ticks() {
    let mut game = session(O_ONLY);
    game.start();
    // 18 gravity drops land the O, the next gravity tick locks it.
    for _ in 0..19 * 10 {
        game.tick();
    }
    assert_eq!(game.board().filled_count(), 4);
    assert_eq!(game.phase(), GamePhase::Running);
}

#[test]
fn test_quit_leaves_state_alone() {
    let mut game = session(O_ONLY);
    game.start();
    let before = game.snapshot();
    assert!(game.apply_action(GameAction::Quit));
    assert!(game.quit_requested());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_same_seed_same_game() {
    let catalog = Arc::new(PieceCatalog::parse(DEFAULT_PIECES).unwrap());
    let script = [
        GameAction::Start,
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::RotateCcw,
        GameAction::HardDrop,
    ];

    let play = || {
        let mut game = GameSession::with_seed(Arc::clone(&catalog), 7);
        for &action in &script {
            game.apply_action(action);
            game.tick();
        }
        game.snapshot()
    };
    assert_eq!(play(), play());
}
