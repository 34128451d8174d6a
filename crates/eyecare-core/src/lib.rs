//! # EyeCare Core Library
//!
//! Core business logic for the EyeCare guided eye-exercise trainer. It
//! implements a CLI-first philosophy where all operations are available via
//! a standalone CLI binary, with any GUI shell being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Session Player**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates
//! - **Motion Generator**: pure time-to-position formulas, one per exercise
//!   motion type
//! - **Storage**: SQLite-based history storage and TOML-based configuration
//! - **Advisor**: a single request/response wrapper around the Gemini API
//!   for eye-health questions
//!
//! ## Key Components
//!
//! - [`Player`]: session state machine driving countdown and motion clock
//! - [`MotionTrack`]: per-exercise motion formula evaluator
//! - [`Database`]: local key-value persistence
//! - [`Config`]: application configuration management
//! - [`Advisor`]: eye-health advice client

pub mod advisor;
pub mod catalog;
pub mod error;
pub mod events;
pub mod motion;
pub mod session;
pub mod storage;

pub use advisor::{Advisor, ChatMessage, ChatRole, FALLBACK_MESSAGE};
pub use catalog::{Difficulty, Exercise};
pub use error::{AdvisorError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use motion::{Frame, MotionTrack, MotionType};
pub use session::{Countdown, Player, SessionStatus};
pub use storage::{Config, Database, HistoryRecord, HistoryStore};
