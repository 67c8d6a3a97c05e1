//! Game engine - board, pieces, scoring, timing and the phase machine.
//!
//! One `update(dt)` call per frame is the only thing that advances the
//! simulation; everything is single-threaded and, for a fixed seed,
//! deterministic. Per tick the engine applies at most one queued action,
//! accumulates elapsed time and performs an automatic scored drop once the
//! current drop delay is exceeded.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::core::board::Board;
use crate::core::collision::would_collide;
use crate::core::piece::Piece;
use crate::core::queue::ActionQueue;
use crate::core::rng::SimpleRng;
use crate::core::shapes::{build_catalog, ShapeRef};
use crate::types::{GameAction, GamePhase};

/// Step directions for [`Game::move_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

/// Regions the presentation layer must refresh, set as side effects of
/// engine mutations and taken (cleared) once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidations {
    pub board: bool,
    pub upcoming: bool,
    pub score: bool,
    pub rows: bool,
    pub state: bool,
}

impl Invalidations {
    fn all() -> Self {
        Self {
            board: true,
            upcoming: true,
            score: true,
            rows: true,
            state: true,
        }
    }

    pub fn any(&self) -> bool {
        self.board || self.upcoming || self.score || self.rows || self.state
    }
}

/// One independent game: board, current and upcoming piece, score state
/// and the Cancelled/Paused/Playing machine.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    catalog: Vec<ShapeRef>,
    board: Board,
    queue: ActionQueue,
    current: Piece,
    next: Piece,
    phase: GamePhase,
    score: u32,
    rows: u32,
    /// Seconds a piece rests before the next automatic drop.
    delay: f64,
    /// Seconds accumulated since the last automatic drop.
    elapsed: f64,
    clutter_enabled: bool,
    /// Target fill ratio for pre-game seeding, 0.0..=1.0.
    clutter_level: f64,
    rng: SimpleRng,
    invalid: Invalidations,
}

impl Game {
    /// Build an engine from a resolved configuration. The seed fixes the
    /// whole piece sequence.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let catalog = build_catalog(&config);
        assert!(!catalog.is_empty(), "shape catalog is empty");

        let board = Board::new(config.game_size.x, config.game_size.y);
        let mut rng = SimpleRng::new(seed);
        let current = Piece::spawn(&catalog, board.width(), &mut rng);
        let next = Piece::spawn(&catalog, board.width(), &mut rng);

        Self {
            delay: config.delays.start,
            clutter_enabled: config.clutter.enabled_by_default,
            clutter_level: f64::from(config.clutter.default_percent) / 100.0,
            config,
            catalog,
            board,
            queue: ActionQueue::new(),
            current,
            next,
            phase: GamePhase::Cancelled,
            score: 0,
            rows: 0,
            elapsed: 0.0,
            rng,
            invalid: Invalidations::all(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Current automatic drop delay in seconds.
    pub fn drop_delay(&self) -> f64 {
        self.delay
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn upcoming(&self) -> &Piece {
        &self.next
    }

    pub fn clutter_enabled(&self) -> bool {
        self.clutter_enabled
    }

    pub fn clutter_level(&self) -> f64 {
        self.clutter_level
    }

    /// Buffer a player intent; it is applied on a future update tick.
    pub fn enqueue(&mut self, action: GameAction) {
        self.queue.push(action);
    }

    pub fn pending_actions(&self) -> usize {
        self.queue.len()
    }

    /// Take and clear the pending refresh signals.
    pub fn take_invalidations(&mut self) -> Invalidations {
        std::mem::take(&mut self.invalid)
    }

    // --- phase machine ---------------------------------------------------

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.invalid.state = true;
    }

    /// Start a fresh game from `Cancelled` (with optional clutter
    /// seeding), or resume from `Paused`.
    pub fn start_continue(&mut self) {
        if self.phase == GamePhase::Cancelled {
            self.reset();
            if self.clutter_enabled {
                self.seed_clutter();
            }
        }
        self.set_phase(GamePhase::Playing);
    }

    /// Suspend a running game. Resuming does not reset anything.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.set_phase(GamePhase::Paused);
        }
    }

    /// Abandon the game. Also the game-over transition.
    pub fn cancel(&mut self) {
        self.set_phase(GamePhase::Cancelled);
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.set_score(0);
        self.set_rows(0);
        self.board.clear();
        self.invalid.board = true;
        self.queue.clear();
        // The previewed piece becomes the first piece of the new game.
        self.current = self.next.clone();
        self.next = Piece::spawn(&self.catalog, self.board.width(), &mut self.rng);
        self.invalid.upcoming = true;
    }

    // --- per-tick update -------------------------------------------------

    /// Advance the simulation by `dt` seconds. Only effective while
    /// Playing: applies at most one queued action, then accumulates time
    /// towards the next automatic drop.
    pub fn update(&mut self, dt: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if let Some(action) = self.queue.take_next() {
            self.apply(action);
        }
        self.elapsed += dt;
        if self.elapsed > self.delay {
            // Keep the fractional overshoot instead of resetting to zero.
            self.elapsed -= self.delay;
            self.drop_current(true);
        }
    }

    fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => {
                self.move_current(MoveDirection::Left);
            }
            GameAction::MoveRight => {
                self.move_current(MoveDirection::Right);
            }
            GameAction::SoftDrop => self.drop_current(true),
            GameAction::RotateCw => {
                self.rotate_current(true);
            }
            GameAction::RotateCcw => {
                self.rotate_current(false);
            }
            GameAction::HardDrop => self.drop_to_bottom(true),
        }
    }

    // --- piece operations ------------------------------------------------

    /// Try to step the current piece. A rejected move is a normal `false`
    /// outcome, not an error.
    pub fn move_current(&mut self, direction: MoveDirection) -> bool {
        let (x, y) = match direction {
            MoveDirection::Left => (self.current.x() - 1, self.current.y()),
            MoveDirection::Right => (self.current.x() + 1, self.current.y()),
            MoveDirection::Down => (self.current.x(), self.current.y() + 1),
        };
        if would_collide(&self.board, &self.current, x, y, self.current.orientation()) {
            return false;
        }
        self.current.set_position(x, y);
        self.invalid.board = true;
        true
    }

    /// Rotate the current piece a quarter turn. The orientation wraps
    /// modulo 4; if the destination collides the rotation is rejected
    /// outright (no offset search).
    pub fn rotate_current(&mut self, clockwise: bool) -> bool {
        let orientation = if clockwise {
            (self.current.orientation() + 1) % 4
        } else {
            (self.current.orientation() + 3) % 4
        };
        if would_collide(
            &self.board,
            &self.current,
            self.current.x(),
            self.current.y(),
            orientation,
        ) {
            return false;
        }
        self.current.set_orientation(orientation);
        self.invalid.board = true;
        true
    }

    /// Advance the current piece one row. If it is resting: award the
    /// drop bonus (when `scored`), lock it into the board, remove
    /// completed lines, promote the upcoming piece and draw a new one,
    /// discard the queue, and cancel the game if the fresh piece collides
    /// at its spawn position.
    pub fn drop_current(&mut self, scored: bool) {
        if self.move_current(MoveDirection::Down) {
            return;
        }
        if scored {
            self.add_score((self.config.score_rules.on_drop)(self.rows, self.score));
        }
        self.lock_current();
        self.remove_lines();
        self.current = self.next.clone();
        self.next = Piece::spawn(&self.catalog, self.board.width(), &mut self.rng);
        self.invalid.board = true;
        self.invalid.upcoming = true;
        // Anything still queued was aimed at the piece that just locked.
        self.queue.clear();
        if would_collide(
            &self.board,
            &self.current,
            self.current.x(),
            self.current.y(),
            self.current.orientation(),
        ) {
            self.cancel();
        }
    }

    /// Drop the current piece until it rests, then lock it.
    pub fn drop_to_bottom(&mut self, scored: bool) {
        while self.move_current(MoveDirection::Down) {}
        self.drop_current(scored);
    }

    fn lock_current(&mut self) {
        let color = self.current.color();
        for (x, y) in self.current.cells() {
            self.board.set(x, y, Some(color));
        }
        self.invalid.board = true;
    }

    // --- line clearing ---------------------------------------------------

    /// Scan rows bottom-to-top and collapse every complete one. A
    /// collapsed index is scanned again before moving up, because the row
    /// above has just shifted into it; without the re-check, stacked
    /// simultaneous clears would be missed.
    ///
    /// Returns the collapsed row indices, at most one per row a piece can
    /// span.
    fn remove_lines(&mut self) -> ArrayVec<i32, 4> {
        let mut removed = ArrayVec::new();
        let mut y = self.board.height() - 1;
        while y >= 1 {
            if self.board.is_row_complete(y) {
                self.board.collapse_row(y);
                removed.push(y);
                self.invalid.board = true;
            } else {
                y -= 1;
            }
        }
        if !removed.is_empty() {
            self.add_rows(removed.len() as u32);
            self.add_score((self.config.score_rules.on_removed_lines)(
                removed.len() as u32,
                self.rows,
                self.score,
            ));
        }
        removed
    }

    // --- clutter seeding -------------------------------------------------

    /// Pre-fill the bottom of the field with unscored debris until the
    /// configured fill ratio is reached. Line clears that happen along the
    /// way still collapse (and score) as usual.
    fn seed_clutter(&mut self) {
        loop {
            let filled = self.board.height() - self.board.topmost_occupied_row() - 1;
            if f64::from(filled) / f64::from(self.board.height()) >= self.clutter_level {
                break;
            }
            self.drop_to_bottom(false);
        }
    }

    /// Clutter controls are only adjustable before a game starts, like
    /// the disabled selector while playing or paused.
    pub fn set_clutter_enabled(&mut self, enabled: bool) -> bool {
        if self.phase != GamePhase::Cancelled {
            return false;
        }
        self.clutter_enabled = enabled;
        true
    }

    /// Set the seeding target as a fraction of board height.
    pub fn set_clutter_level(&mut self, level: f64) -> bool {
        if self.phase != GamePhase::Cancelled {
            return false;
        }
        self.clutter_level = level.clamp(0.0, 1.0);
        true
    }

    // --- score state -----------------------------------------------------

    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.invalid.score = true;
    }

    fn add_score(&mut self, points: u32) {
        self.set_score(self.score + points);
    }

    /// Rows drive the drop delay: every change recomputes
    /// `max(min, start - decrement * rows)`.
    fn set_rows(&mut self, rows: u32) {
        self.rows = rows;
        let delays = &self.config.delays;
        self.delay = delays
            .min
            .max(delays.start - delays.decrement * f64::from(rows));
        self.invalid.rows = true;
    }

    fn add_rows(&mut self, rows: u32) {
        self.set_rows(self.rows + rows);
    }
}
