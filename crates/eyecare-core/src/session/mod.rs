mod countdown;
mod player;

pub use countdown::Countdown;
pub use player::{Player, SessionStatus};
