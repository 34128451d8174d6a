//! Session player implementation.
//!
//! The player is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically (or `advance()` with explicit deltas under test).
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> Ready -> Running <-> Paused -> Completed
//! ```
//!
//! `Ready` may be skipped (`start()` is valid from `NotStarted`).
//! `Completed` is terminal except for an explicit `reset()`.
//!
//! Both clocks of a session hang off the same `advance()` path: the coarse
//! one-per-second countdown and the fine elapsed animation clock are never
//! two concurrent mutators, and both are frozen on every exit from
//! `Running` (pause, reset, exit, completion).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use crate::catalog::Exercise;
use crate::events::Event;
use crate::motion::{Frame, MotionTrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    /// Instructions shown, awaiting user confirmation.
    Ready,
    Running,
    Paused,
    Completed,
}

/// Session player for one exercise.
///
/// Operates on wall-clock deltas -- no internal thread. Serializable so the
/// CLI can persist an in-flight session in the kv store between
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    exercise_id: String,
    motion: MotionTrack,
    countdown: Countdown,
    status: SessionStatus,
    /// Elapsed animation time in milliseconds. Parameterizes motion only;
    /// frozen while paused, reset to zero on `start()` and `reset()`.
    elapsed_ms: u64,
    /// Timestamp (ms since epoch) of the last `tick()` while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl Player {
    /// Create a player for the given exercise, in `NotStarted`.
    pub fn new(exercise: &Exercise) -> Self {
        Self {
            exercise_id: exercise.id.to_string(),
            motion: MotionTrack::new(exercise.motion),
            countdown: Countdown::new(exercise.duration_secs),
            status: SessionStatus::NotStarted,
            elapsed_ms: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn duration_secs(&self) -> u32 {
        self.countdown.duration_secs()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        let total = self.countdown.duration_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.countdown.remaining_secs()) / f64::from(total)
    }

    /// Current motion frame for the elapsed animation time.
    pub fn frame(&self) -> Frame {
        self.motion.frame(self.elapsed_ms as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            exercise_id: self.exercise_id.clone(),
            remaining_secs: self.countdown.remaining_secs(),
            duration_secs: self.countdown.duration_secs(),
            elapsed_ms: self.elapsed_ms,
            progress: self.progress(),
            frame: self.frame(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Show instructions: `NotStarted -> Ready`.
    pub fn ready(&mut self) -> Option<Event> {
        match self.status {
            SessionStatus::NotStarted => {
                self.status = SessionStatus::Ready;
                Some(Event::SessionReady {
                    exercise_id: self.exercise_id.clone(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Begin the session: `NotStarted | Ready -> Running`.
    ///
    /// Both clocks start from zero and the random waypoint sequence (if
    /// any) is regenerated, so each start is a fresh session.
    pub fn start(&mut self) -> Option<Event> {
        match self.status {
            SessionStatus::NotStarted | SessionStatus::Ready => {
                self.motion = MotionTrack::new(self.motion.motion());
                self.countdown.reset();
                self.elapsed_ms = 0;
                self.status = SessionStatus::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::SessionStarted {
                    exercise_id: self.exercise_id.clone(),
                    duration_secs: self.countdown.duration_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Flip between `Running` and `Paused` without resetting either clock.
    ///
    /// Pausing flushes wall-clock time first; if that flush completes the
    /// countdown, the completion event is returned instead of a pause.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        match self.status {
            SessionStatus::Running => {
                if let Some(done) = self.tick() {
                    return Some(done);
                }
                self.status = SessionStatus::Paused;
                self.last_tick_epoch_ms = None;
                Some(Event::SessionPaused {
                    remaining_secs: self.countdown.remaining_secs(),
                    at: Utc::now(),
                })
            }
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                Some(Event::SessionResumed {
                    remaining_secs: self.countdown.remaining_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Discard the session: any state -> `NotStarted`.
    ///
    /// Clears both clocks and re-arms the completion latch.
    pub fn reset(&mut self) -> Option<Event> {
        self.status = SessionStatus::NotStarted;
        self.countdown.reset();
        self.elapsed_ms = 0;
        self.last_tick_epoch_ms = None;
        Some(Event::SessionReset {
            exercise_id: self.exercise_id.clone(),
            at: Utc::now(),
        })
    }

    /// Abandon the session: valid from any state.
    ///
    /// Tears down the tick clock. No history record follows unless
    /// `Completed` was already reached; the returned event says which.
    pub fn exit(&mut self) -> Option<Event> {
        let completed = self.status == SessionStatus::Completed;
        self.last_tick_epoch_ms = None;
        Some(Event::SessionExited {
            exercise_id: self.exercise_id.clone(),
            completed,
            at: Utc::now(),
        })
    }

    /// Advance both clocks by an explicit delta. Running only.
    ///
    /// Returns `Some(Event::SessionCompleted)` on the advance that takes
    /// the countdown to zero; the countdown's latch guarantees that happens
    /// at most once per session regardless of extra ticks.
    pub fn advance(&mut self, delta_ms: u64) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.countdown.advance(delta_ms) {
            self.status = SessionStatus::Completed;
            self.last_tick_epoch_ms = None;
            return Some(Event::SessionCompleted {
                exercise_id: self.exercise_id.clone(),
                duration_secs: self.countdown.duration_secs(),
                at: Utc::now(),
            });
        }
        None
    }

    /// Wall-clock tick: advance by the time elapsed since the last tick.
    /// No-op outside `Running`.
    pub fn tick(&mut self) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        let now = now_ms();
        let delta = self
            .last_tick_epoch_ms
            .map(|last| now.saturating_sub(last))
            .unwrap_or(0);
        self.last_tick_epoch_ms = Some(now);
        self.advance(delta)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
