//! DAS/ARR auto-repeat for held intents.
//!
//! A press of left, right or soft drop fires once immediately. While the
//! key stays held, nothing more happens until the delayed auto shift (DAS)
//! has elapsed; after that the intent repeats once per auto repeat rate (ARR)
//! interval. Soft drop has its own, usually shorter, timings.
//!
//! Terminals that never report key releases can enable a release timeout:
//! a held key with no fresh press for longer than the timeout is dropped.
//! The timeout is measured from the deltas passed to [`InputHandler::update`].

use arrayvec::ArrayVec;

use crate::types::{
    Intent, MoveDirection, DEFAULT_ARR_MS, DEFAULT_DAS_MS, KEY_RELEASE_TIMEOUT_MS,
    SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

/// Repeats emitted by one `update` call are capped at this many.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

/// DAS/ARR state for one repeating channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Repeat {
    das_ms: u32,
    arr_acc_ms: u32,
}

impl Repeat {
    /// Advance by `elapsed_ms` and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        let prev = self.das_ms;
        self.das_ms = self.das_ms.saturating_add(elapsed_ms);
        if self.das_ms < das {
            return 0;
        }

        // Only time past the DAS threshold feeds the repeat accumulator.
        let excess = if prev < das {
            self.das_ms - das
        } else {
            elapsed_ms
        };
        self.arr_acc_ms += excess;

        if arr == 0 {
            self.arr_acc_ms = 0;
            return u32::from(excess > 0);
        }
        let due = self.arr_acc_ms / arr;
        self.arr_acc_ms %= arr;
        due
    }
}

/// Tracks held intents and produces repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<MoveDirection>,
    down_held: bool,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    das_ms: u32,
    arr_ms: u32,
    soft_drop_das_ms: u32,
    soft_drop_arr_ms: u32,
    key_release_timeout_ms: Option<u32>,
    /// Time since the last directional press, for the release timeout.
    idle_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: None,
            down_held: false,
            horizontal_repeat: Repeat::default(),
            down_repeat: Repeat::default(),
            das_ms,
            arr_ms,
            soft_drop_das_ms: SOFT_DROP_DAS_MS,
            soft_drop_arr_ms: SOFT_DROP_ARR_MS,
            key_release_timeout_ms: Some(KEY_RELEASE_TIMEOUT_MS),
            idle_ms: 0,
        }
    }

    pub fn with_soft_drop(mut self, das_ms: u32, arr_ms: u32) -> Self {
        self.soft_drop_das_ms = das_ms;
        self.soft_drop_arr_ms = arr_ms;
        self
    }

    /// `None` disables the timeout; use it when releases are reported.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    pub fn das_ms(&self) -> u32 {
        self.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.arr_ms
    }

    pub fn held_direction(&self) -> Option<MoveDirection> {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Register a press. Returns the intent to apply now, if any.
    ///
    /// Repeated presses of an already-held direction (terminal key repeat)
    /// only refresh the release timeout. One-shot intents pass straight
    /// through.
    pub fn handle_press(&mut self, intent: Intent) -> Option<Intent> {
        match intent {
            Intent::MoveLeft | Intent::MoveRight => {
                self.idle_ms = 0;
                let direction = if intent == Intent::MoveLeft {
                    MoveDirection::Left
                } else {
                    MoveDirection::Right
                };
                if self.horizontal == Some(direction) {
                    return None;
                }
                // The newest direction wins.
                self.horizontal = Some(direction);
                self.horizontal_repeat = Repeat::default();
                Some(intent)
            }
            Intent::SoftDrop => {
                self.idle_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat = Repeat::default();
                Some(intent)
            }
            _ => Some(intent),
        }
    }

    pub fn handle_release(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft if self.horizontal == Some(MoveDirection::Left) => {
                self.release_horizontal()
            }
            Intent::MoveRight if self.horizontal == Some(MoveDirection::Right) => {
                self.release_horizontal()
            }
            Intent::SoftDrop => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat = Repeat::default();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat = Repeat::default();
    }

    /// Advance by `elapsed_ms` and collect the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, MAX_REPEATS_PER_UPDATE> {
        let mut intents = ArrayVec::new();

        if let Some(timeout) = self.key_release_timeout_ms {
            self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
            if self.idle_ms > timeout {
                self.release_horizontal();
                self.release_down();
            }
        }

        if let Some(direction) = self.horizontal {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_ms, self.arr_ms);
            let intent = match direction {
                MoveDirection::Left => Intent::MoveLeft,
                MoveDirection::Right => Intent::MoveRight,
            };
            for _ in 0..due {
                if intents.try_push(intent).is_err() {
                    break;
                }
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, self.soft_drop_das_ms, self.soft_drop_arr_ms);
            for _ in 0..due {
                if intents.try_push(Intent::SoftDrop).is_err() {
                    break;
                }
            }
        }

        intents
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
