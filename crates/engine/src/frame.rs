//! Per-frame driver: intents, lock delay, gravity and speed-up.

use arrayvec::ArrayVec;

use crate::config::FrameConfig;
use crate::core::{GameSession, GameSnapshot, LockEvent, RandomSource, SimpleRng};
use crate::input::InputHandler;
use crate::types::Intent;

/// One-shot presses queued between ticks.
pub const MAX_PENDING_INTENTS: usize = 8;
/// Locks reported by a single tick: one per queued hard drop plus one from
/// lock delay. Repeats never lock.
pub const MAX_LOCKS_PER_TICK: usize = MAX_PENDING_INTENTS + 1;

/// What one [`FrameController::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Intents that changed the session (queued presses and repeats).
    pub intents_applied: u32,
    /// Rows descended by gravity.
    pub descended: u32,
    pub locks: ArrayVec<LockEvent, MAX_LOCKS_PER_TICK>,
    pub game_over: bool,
}

impl TickReport {
    fn record_lock<R: RandomSource>(&mut self, session: &mut GameSession<R>) {
        if let Some(event) = session.take_last_event() {
            let pushed = self.locks.try_push(event);
            debug_assert!(pushed.is_ok(), "more locks in one tick than queued intents");
        }
    }
}

/// Owns a session and decides when its commands run.
#[derive(Debug)]
pub struct FrameController<R = SimpleRng> {
    session: GameSession<R>,
    input: InputHandler,
    config: FrameConfig,
    pending: ArrayVec<Intent, MAX_PENDING_INTENTS>,
    gravity_ms: u32,
    gravity_acc_ms: u32,
    lock_timer_ms: u32,
    play_ms: u64,
}

impl FrameController<SimpleRng> {
    pub fn new(seed: u32, config: FrameConfig) -> Self {
        Self::with_session(GameSession::new(seed), config)
    }
}

impl<R: RandomSource> FrameController<R> {
    pub fn with_session(mut session: GameSession<R>, config: FrameConfig) -> Self {
        session.set_lock_reset_limit(config.lock_reset_limit);
        let input = InputHandler::with_config(config.das_ms, config.arr_ms)
            .with_soft_drop(config.soft_drop_das_ms, config.soft_drop_arr_ms)
            .with_key_release_timeout_ms(config.key_release_timeout_ms);

        Self {
            session,
            input,
            gravity_ms: config.gravity_for_level(0),
            config,
            pending: ArrayVec::new(),
            gravity_acc_ms: 0,
            lock_timer_ms: 0,
            play_ms: 0,
        }
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<R> {
        &mut self.session
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Speed-ups applied so far.
    pub fn level(&self) -> u32 {
        let interval = u64::from(self.config.speed_up_interval_ms.max(1));
        u32::try_from(self.play_ms / interval).unwrap_or(u32::MAX)
    }

    /// Current gravity interval.
    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn play_ms(&self) -> u64 {
        self.play_ms
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    /// Register a key press. The resulting intent runs on the next tick.
    ///
    /// Returns false when nothing was queued: the game is over, the key is
    /// already held, or the queue is full.
    pub fn press(&mut self, intent: Intent) -> bool {
        if self.session.game_over() {
            return false;
        }
        match self.input.handle_press(intent) {
            Some(intent) => self.pending.try_push(intent).is_ok(),
            None => false,
        }
    }

    pub fn release(&mut self, intent: Intent) {
        self.input.handle_release(intent);
    }

    /// Advance by `elapsed_ms`.
    ///
    /// Order: queued presses, then auto-repeats, then lock delay or gravity,
    /// then the speed-up level.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickReport {
        let mut report = TickReport::default();
        if self.session.game_over() {
            self.pending.clear();
            report.game_over = true;
            return report;
        }

        self.play_ms += u64::from(elapsed_ms);

        let pending = std::mem::take(&mut self.pending);
        let repeats = self.input.update(elapsed_ms);
        for intent in pending.into_iter().chain(repeats) {
            if self.session.game_over() {
                break;
            }
            if self.apply(intent, &mut report) {
                report.intents_applied += 1;
            }
        }

        if !self.session.game_over() {
            self.run_timers(elapsed_ms, &mut report);
        }

        self.gravity_ms = self.config.gravity_for_level(self.level());
        report.game_over = self.session.game_over();
        if report.game_over {
            self.input.reset();
        }
        report
    }

    fn apply(&mut self, intent: Intent, report: &mut TickReport) -> bool {
        let changed = self.session.apply_intent(intent);
        if !changed {
            return false;
        }

        match intent {
            Intent::MoveLeft | Intent::MoveRight | Intent::RotateCw | Intent::RotateCcw => {
                if self.session.is_touching_floor() && self.session.try_reset_lock_delay() {
                    self.lock_timer_ms = 0;
                }
            }
            Intent::SoftDrop => self.gravity_acc_ms = 0,
            Intent::HardDrop => {
                report.record_lock(&mut self.session);
                self.reset_timers();
            }
            Intent::Hold => self.reset_timers(),
        }
        true
    }

    fn run_timers(&mut self, elapsed_ms: u32, report: &mut TickReport) {
        if self.session.is_touching_floor() {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
            if self.lock_timer_ms >= self.config.lock_delay_ms {
                self.session.lock_piece();
                report.record_lock(&mut self.session);
                self.reset_timers();
            }
            return;
        }

        self.lock_timer_ms = 0;
        self.gravity_acc_ms = self.gravity_acc_ms.saturating_add(elapsed_ms);
        while self.gravity_acc_ms >= self.gravity_ms {
            self.gravity_acc_ms -= self.gravity_ms;
            if !self.session.advance_gravity() {
                self.gravity_acc_ms = 0;
                break;
            }
            report.descended += 1;
            if self.session.is_touching_floor() {
                // Lock delay starts on the next tick.
                self.gravity_acc_ms = 0;
                break;
            }
        }
    }

    fn reset_timers(&mut self) {
        self.lock_timer_ms = 0;
        self.gravity_acc_ms = 0;
    }
}
