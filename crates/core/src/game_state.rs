//! Game state module - manages the complete game session
//!
//! This module ties together all core components: board, active piece,
//! preview queue, hold slot and scoring. It runs the session state machine:
//!
//! ```text
//! NotStarted --start--> Running --blocked spawn--> GameOver
//!      \                   ^                          |
//!       `------reset-------+----------reset-----------'
//! ```
//!
//! Gravity is driven from outside: the shell calls [`GameSession::tick`] on a
//! fixed cadence and the session drops the piece once every
//! [`GRAVITY_TICKS`] ticks. Everything runs synchronously, so tests can step
//! the session tick by tick without a timer.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::board::Board;
use crate::catalog::PieceCatalog;
use crate::pieces::PieceTemplate;
use crate::rng::{PreviewQueue, Randomizer, SimpleRng};
use crate::scoring::line_clear_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tetramino::Tetramino;
use crate::types::{GameAction, GamePhase, RotationDirection, GRAVITY_TICKS, SPAWN_POSITION};

/// Held piece plus the once-per-lock validity flag.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldSlot {
    piece: Option<Arc<PieceTemplate>>,
    valid: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            piece: None,
            valid: true,
        }
    }

    pub fn piece(&self) -> Option<&Arc<PieceTemplate>> {
        self.piece.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.piece.as_deref().map(PieceTemplate::key)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Store `piece` and return the previously held one.
    fn swap(&mut self, piece: Arc<PieceTemplate>) -> Option<Arc<PieceTemplate>> {
        self.valid = false;
        self.piece.replace(piece)
    }

    fn revalidate(&mut self) {
        self.valid = true;
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession<R: Randomizer = SimpleRng> {
    catalog: Arc<PieceCatalog>,
    rng: R,
    board: Board,
    active: Option<Tetramino>,
    preview: PreviewQueue,
    hold: HoldSlot,
    score: u32,
    phase: GamePhase,
    gravity_countdown: u32,
    home: (i8, i8),
    quit_requested: bool,
}

impl GameSession<SimpleRng> {
    /// Session driven by the built-in LCG
    pub fn with_seed(catalog: Arc<PieceCatalog>, seed: u32) -> Self {
        Self::new(catalog, SimpleRng::new(seed))
    }
}

impl<R: Randomizer> GameSession<R> {
    /// Create a not-started session. The preview queue is filled right away
    /// so it can be shown on the start screen.
    pub fn new(catalog: Arc<PieceCatalog>, mut rng: R) -> Self {
        let preview = PreviewQueue::new(&catalog, &mut rng);
        Self {
            catalog,
            rng,
            board: Board::new(),
            active: None,
            preview,
            hold: HoldSlot::new(),
            score: 0,
            phase: GamePhase::NotStarted,
            gravity_countdown: GRAVITY_TICKS,
            home: SPAWN_POSITION,
            quit_requested: false,
        }
    }

    /// Override the home anchor used for every spawn.
    pub fn with_spawn_position(mut self, x: i8, y: i8) -> Self {
        self.home = (x, y);
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted scenarios (tests, demos).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Tetramino> {
        self.active.as_ref()
    }

    pub fn preview(&self) -> &PreviewQueue {
        &self.preview
    }

    pub fn hold_slot(&self) -> &HoldSlot {
        &self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.hold.is_valid()
    }

    pub fn catalog(&self) -> &Arc<PieceCatalog> {
        &self.catalog
    }

    pub fn gravity_countdown(&self) -> u32 {
        self.gravity_countdown
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Leave the start screen and spawn the first piece.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        info!("game started");
        self.phase = GamePhase::Running;
        self.gravity_countdown = GRAVITY_TICKS;
        self.spawn_next();
        true
    }

    /// Clear board, score, hold and previews, then start a new game.
    ///
    /// Accepted in every phase.
    pub fn reset(&mut self) -> bool {
        info!("game reset (previous score {})", self.score);
        self.board.clear();
        self.score = 0;
        self.hold = HoldSlot::new();
        self.preview = PreviewQueue::new(&self.catalog, &mut self.rng);
        self.active = None;
        self.gravity_countdown = GRAVITY_TICKS;
        self.phase = GamePhase::Running;
        self.spawn_next();
        true
    }

    /// Ask the shell to exit. The session state itself is left untouched.
    pub fn quit(&mut self) -> bool {
        self.quit_requested = true;
        true
    }

    /// One gravity tick. Returns true when the gravity drop fired.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.gravity_countdown = self.gravity_countdown.saturating_sub(1);
        if self.gravity_countdown > 0 {
            return false;
        }
        self.gravity_countdown = GRAVITY_TICKS;
        if !self.drop_active() {
            self.lock_active();
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    fn move_horizontal(&mut self, delta: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let before = active.x();
        active.move_horizontal(delta, &self.board);
        active.x() != before
    }

    /// Drop one row; lock right away if the piece cannot move.
    ///
    /// Returns true if the piece moved down.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.drop_active() {
            return true;
        }
        self.lock_active();
        false
    }

    /// Drop as far as possible and lock immediately. Returns rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let mut distance = 0;
        while self.drop_active() {
            distance += 1;
        }
        self.lock_active();
        distance
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => active.rotate(direction, &self.board),
            None => false,
        }
    }

    /// Swap the active piece with the hold slot, at most once per lock.
    ///
    /// With an empty slot the next preview piece becomes active instead.
    pub fn hold(&mut self) -> bool {
        if !self.is_running() || !self.hold.is_valid() {
            return false;
        }
        let Some(current) = self.active.as_ref().map(|a| Arc::clone(a.template())) else {
            return false;
        };

        debug!("hold {}", current.key());
        let next = match self.hold.swap(current) {
            Some(held) => held,
            None => self.preview.pop(&self.catalog, &mut self.rng),
        };
        self.spawn(next);
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Reset => self.reset(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                let running = self.is_running();
                self.hard_drop();
                running
            }
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Quit => self.quit(),
        }
    }

    fn drop_active(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => active.soft_drop(&self.board),
            None => false,
        }
    }

    /// Commit the active piece, clear lines, score, and spawn the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.commit(&active.occupied_cells(), active.color());
        let cleared = self.board.clear_full_rows();
        let delta = line_clear_score(cleared.len());
        self.score = self.score.saturating_add(delta);
        debug!(
            "locked {} at ({}, {}), cleared {} rows (+{})",
            active.key(),
            active.x(),
            active.y(),
            cleared.len(),
            delta
        );

        self.active = Some(active);
        if self.spawn_next() {
            self.hold.revalidate();
            self.gravity_countdown = GRAVITY_TICKS;
        }
    }

    fn spawn_next(&mut self) -> bool {
        let next = self.preview.pop(&self.catalog, &mut self.rng);
        self.spawn(next)
    }

    /// Spawn `template` at home, reusing the current piece when there is one.
    /// A blocked spawn ends the game.
    fn spawn(&mut self, template: Arc<PieceTemplate>) -> bool {
        let mut piece = self
            .active
            .take()
            .unwrap_or_else(|| Tetramino::new(Arc::clone(&template), self.home));
        let spawned = Arc::clone(&template);
        if piece.spawn(template, &self.board) {
            debug!("spawned {}", spawned.key());
            self.active = Some(piece);
            return true;
        }

        warn!(
            "spawn of {} blocked, game over with score {}",
            spawned.key(),
            self.score
        );
        self.phase = GamePhase::GameOver;
        false
    }

    /// Copy the renderable state into an existing snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            row.clone_from_slice(self.board.row(y));
        }

        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.hold = self.hold.piece().cloned();
        out.can_hold = self.hold.is_valid();
        out.next_queue.clear();
        out.next_queue.extend(self.preview.iter().cloned());
        out.score = self.score;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
