use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::motion::Frame;
use crate::session::SessionStatus;

/// Every session state change produces an Event.
///
/// Commands on the player return the event they caused (or `None` for an
/// invalid transition); the CLI prints them and hangs side effects such as
/// history recording off `SessionCompleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Instructions shown, awaiting user confirmation.
    SessionReady {
        exercise_id: String,
        at: DateTime<Utc>,
    },
    SessionStarted {
        exercise_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Emitted exactly once per session, when the countdown reaches zero.
    SessionCompleted {
        exercise_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        exercise_id: String,
        at: DateTime<Utc>,
    },
    /// Session abandoned. `completed` tells whether the countdown had
    /// already finished before the exit.
    SessionExited {
        exercise_id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: SessionStatus,
        exercise_id: String,
        remaining_secs: u32,
        duration_secs: u32,
        elapsed_ms: u64,
        progress: f64,
        frame: Frame,
        at: DateTime<Utc>,
    },
}
