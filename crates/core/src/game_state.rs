//! Game state module - the session state machine
//!
//! [`GameSession`] owns everything a game needs: the settled board, the
//! active piece, the bag, hold slot, score and the injected random source.
//! Every command takes `&mut self`; nothing lives outside the session.
//!
//! Lifecycle of the active piece:
//!
//! ```text
//! Spawned -> Falling -> Locking -> (lock) -> Spawned (next piece)
//!                                   \-> GameOver (piece rests in rows 20..22)
//! ```
//!
//! Time is not tracked here. The frame controller decides when gravity runs
//! and when a resting piece locks; the session only enforces the lock-reset
//! cap through [`GameSession::try_reset_lock_delay`].

use crate::board::Board;
use crate::geometry::Shape;
use crate::kicks::try_rotate;
use crate::pieces::{spawn_column_choices, spawn_shape};
use crate::rng::{RandomSource, SevenBag, SimpleRng};
use crate::scoring::{calculate_drop_score, calculate_lock_score, is_t_spin, DropKind};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, Grid};
use crate::types::{
    Block, Intent, MoveDirection, PieceKind, Rotation, RotationDirection, BOARD_HEIGHT,
    BOARD_WIDTH, GAME_OVER_ROW, LOCK_RESET_LIMIT, SPAWN_ROW,
};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub rotation: Rotation,
    last_move_was_rotation: bool,
    pre_rotation_shape: Option<Shape>,
    descended: bool,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            rotation: Rotation::North,
            last_move_was_rotation: false,
            pre_rotation_shape: None,
            descended: false,
        }
    }

    /// True when the last successful action on this piece was a rotation.
    pub fn last_move_was_rotation(&self) -> bool {
        self.last_move_was_rotation
    }

    /// Shape before the most recent successful rotation.
    pub fn pre_rotation_shape(&self) -> Option<Shape> {
        self.pre_rotation_shape
    }

    /// Has this piece moved down at least once since it spawned.
    pub fn has_descended(&self) -> bool {
        self.descended
    }
}

/// Outcome of one lock, consumed once by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub kind: Option<PieceKind>,
    pub lines_cleared: u32,
    pub t_spin: bool,
    /// Score added by the lock itself (line clears and T-spin bonus).
    pub line_clear_score: u32,
    pub game_over: bool,
    /// Rows travelled when the lock came from a hard drop.
    pub hard_drop_rows: Option<u32>,
}

/// Where the active piece is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Just spawned, has not moved down yet
    Spawned,
    Falling,
    /// Resting on the floor or the stack
    Locking,
    GameOver,
}

/// Complete session state.
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    next: PieceKind,
    bag: SevenBag,
    rng: R,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    can_hold: bool,
    game_over: bool,
    lock_resets: u8,
    lock_reset_limit: u8,
    last_event: Option<LockEvent>,
}

impl GameSession<SimpleRng> {
    /// New game on an empty board, seeded for replay.
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_board(Board::new(), rng)
    }

    /// Start from a prepared board. The first piece spawns immediately.
    ///
    /// The spawn buffer (rows 20 and 21) should be clear where the first
    /// piece lands. If it is not, the session starts already over.
    pub fn with_board(board: Board, mut rng: R) -> Self {
        let mut bag = SevenBag::new();
        let next = bag.next(&mut rng);
        let mut session = Self {
            board,
            active: None,
            hold: None,
            next,
            bag,
            rng,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            can_hold: true,
            game_over: false,
            lock_resets: 0,
            lock_reset_limit: LOCK_RESET_LIMIT,
            last_event: None,
        };
        session.add_piece();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn lock_resets(&self) -> u8 {
        self.lock_resets
    }

    pub fn set_lock_reset_limit(&mut self, limit: u8) {
        self.lock_reset_limit = limit;
    }

    fn playing(&self) -> Option<ActivePiece> {
        if self.game_over {
            return None;
        }
        self.active
    }

    /// Spawn the queued "next" piece and draw a new one from the bag.
    pub fn add_piece(&mut self) {
        let kind = self.next;
        self.spawn(kind);
        self.next = self.bag.next(&mut self.rng);
    }

    /// Place `kind` in the spawn buffer at a random column, rotation 0.
    fn spawn(&mut self, kind: PieceKind) {
        let col = self.rng.next_below(spawn_column_choices(kind)) as i8;
        let shape = spawn_shape(kind).translated(SPAWN_ROW, col);
        self.active = Some(ActivePiece::new(kind, shape));
        self.lock_resets = 0;

        // Only reachable from a prepared board with a filled buffer.
        if self.board.check_collision(&shape) {
            self.game_over = true;
            self.last_event = Some(LockEvent {
                game_over: true,
                ..LockEvent::default()
            });
        }
    }

    /// Slide one column. Returns whether the piece moved.
    pub fn move_piece(&mut self, direction: MoveDirection) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };

        let moved = piece.shape.translated(0, direction.delta());
        if self.board.check_collision(&moved) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: moved,
            last_move_was_rotation: false,
            ..piece
        });
        true
    }

    /// Rotate with wall kicks. Always fails for O.
    pub fn rotate_piece(&mut self, direction: RotationDirection) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(piece.kind, piece.rotation, &piece.shape, direction, |s| {
            board.check_collision(s)
        });

        match result {
            Some((shape, rotation, _kick)) => {
                self.active = Some(ActivePiece {
                    shape,
                    rotation,
                    last_move_was_rotation: true,
                    pre_rotation_shape: Some(piece.shape),
                    ..piece
                });
                true
            }
            None => false,
        }
    }

    /// Try to move down one row. Returns true if the piece is blocked.
    ///
    /// No score is awarded here; see [`advance_gravity`](Self::advance_gravity).
    pub fn apply_gravity(&mut self) -> bool {
        let Some(piece) = self.playing() else {
            return true;
        };

        let dropped = piece.shape.translated(-1, 0);
        if self.board.check_collision(&dropped) {
            return true;
        }

        self.active = Some(ActivePiece {
            shape: dropped,
            last_move_was_rotation: false,
            descended: true,
            ..piece
        });
        false
    }

    /// One gravity step with the per-row bonus. Returns whether it descended.
    pub fn advance_gravity(&mut self) -> bool {
        if self.apply_gravity() {
            return false;
        }
        self.score += calculate_drop_score(1, DropKind::Gravity);
        true
    }

    /// Player-driven descent, scored the same as gravity.
    pub fn soft_drop_step(&mut self) -> bool {
        self.advance_gravity()
    }

    /// Drop until blocked, then lock. Returns rows fallen.
    pub fn instafall(&mut self) -> u32 {
        if self.playing().is_none() {
            return 0;
        }

        let mut rows = 0;
        while !self.apply_gravity() {
            rows += 1;
        }
        self.lock_piece();
        rows
    }

    /// Hard drop: [`instafall`](Self::instafall) plus the hard-drop bonus.
    pub fn hard_drop(&mut self) -> u32 {
        if self.playing().is_none() {
            return 0;
        }

        let rows = self.instafall();
        if let Some(event) = self.last_event.as_mut() {
            event.hard_drop_rows = Some(rows);
        }
        // A drop that ends the game leaves the final score untouched.
        if !self.game_over {
            self.score += calculate_drop_score(rows, DropKind::Hard);
        }
        rows
    }

    /// Stash or swap the active piece. Returns false when hold is spent.
    pub fn hold_piece(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(piece) = self.playing() else {
            return false;
        };

        match self.hold.replace(piece.kind) {
            None => self.add_piece(),
            Some(held) => self.spawn(held),
        }
        self.can_hold = false;
        true
    }

    /// Commit the active piece to the board.
    ///
    /// A piece resting with any cell in the spawn buffer ends the game and
    /// leaves the board as it was. Otherwise: paint, detect T-spin, clear
    /// rows, score, spawn the next piece and re-enable hold.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.playing() else {
            return;
        };

        if piece.shape.top_row() >= GAME_OVER_ROW {
            self.game_over = true;
            self.last_event = Some(LockEvent {
                kind: Some(piece.kind),
                game_over: true,
                ..LockEvent::default()
            });
            return;
        }

        self.board.fill_shape(&piece.shape, piece.kind.block());
        let t_spin = is_t_spin(
            &self.board,
            piece.kind,
            &piece.shape,
            piece.last_move_was_rotation,
        );
        let lines = self.check_row_completion(&piece.shape.rows());

        let line_clear_score = calculate_lock_score(lines, t_spin);
        self.score += line_clear_score;
        self.lines += lines;
        self.pieces_locked += 1;

        self.last_event = Some(LockEvent {
            kind: Some(piece.kind),
            lines_cleared: lines,
            t_spin,
            line_clear_score,
            game_over: false,
            hard_drop_rows: None,
        });

        self.add_piece();
        self.can_hold = true;
    }

    /// Clear full rows among those the locked piece touched.
    pub fn check_row_completion(&mut self, rows: &[i8]) -> u32 {
        self.board.clear_completed_rows(rows)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Something directly below the active piece.
    pub fn is_touching_floor(&self) -> bool {
        self.active
            .is_some_and(|p| self.board.check_collision(&p.shape.translated(-1, 0)))
    }

    /// Spend one lock-delay reset. Returns false once the cap is reached.
    pub fn try_reset_lock_delay(&mut self) -> bool {
        if self.lock_resets >= self.lock_reset_limit {
            return false;
        }
        self.lock_resets += 1;
        true
    }

    pub fn phase(&self) -> Phase {
        match self.playing() {
            None => Phase::GameOver,
            Some(_) if self.is_touching_floor() => Phase::Locking,
            Some(p) if !p.descended => Phase::Spawned,
            Some(_) => Phase::Falling,
        }
    }

    /// Where the active piece would land.
    pub fn ghost_shape(&self) -> Option<Shape> {
        let mut shape = self.active?.shape;
        loop {
            let below = shape.translated(-1, 0);
            if self.board.check_collision(&below) {
                return Some(shape);
            }
            shape = below;
        }
    }

    /// 22x10 grid with the active piece painted in.
    pub fn grid(&self) -> Grid {
        let mut grid = [[Block::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.write_grid(&mut grid);
        grid
    }

    fn write_grid(&self, grid: &mut Grid) {
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self
                    .board
                    .get(row as i8, col as i8)
                    .unwrap_or(Block::Empty);
            }
        }
        if let Some(piece) = self.active {
            for p in piece.shape.iter() {
                if Board::in_bounds(p.row, p.col) {
                    grid[p.row as usize][p.col as usize] = piece.kind.block();
                }
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.write_grid(&mut out.grid);
        out.active = self.active.map(|p| ActiveSnapshot {
            kind: p.kind,
            rotation: p.rotation,
            cells: *p.shape.cells(),
        });
        out.ghost = self.ghost_shape().map(|s| *s.cells());
        out.hold = self.hold;
        out.next = self.next;
        out.can_hold = self.can_hold;
        out.game_over = self.game_over;
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply one player intent. Returns whether it changed anything.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_piece(MoveDirection::Left),
            Intent::MoveRight => self.move_piece(MoveDirection::Right),
            Intent::SoftDrop => self.soft_drop_step(),
            Intent::HardDrop => {
                let playing = self.playing().is_some();
                self.hard_drop();
                playing
            }
            Intent::RotateCw => self.rotate_piece(RotationDirection::Clockwise),
            Intent::RotateCcw => self.rotate_piece(RotationDirection::CounterClockwise),
            Intent::Hold => self.hold_piece(),
        }
    }

    #[cfg(test)]
    fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }
}
