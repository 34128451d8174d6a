//! Whole-second countdown with a one-shot completion latch.

use serde::{Deserialize, Serialize};

/// Counts down from a fixed duration in whole seconds.
///
/// Sub-second deltas accumulate in a carry; one second of accumulated time
/// produces exactly one decrement. There is no drift correction beyond that
/// accounting. Completion is reported exactly once per run: further
/// advances after the latch has fired are no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    carry_ms: u64,
    finished: bool,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            carry_ms: 0,
            finished: false,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `delta_ms`. Returns `true` exactly once, on the advance
    /// that takes the remaining time to zero.
    pub fn advance(&mut self, delta_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        self.carry_ms = self.carry_ms.saturating_add(delta_ms);
        while self.carry_ms >= 1000 && self.remaining_secs > 0 {
            self.carry_ms -= 1000;
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.finished = true;
            self.carry_ms = 0;
            return true;
        }
        false
    }

    /// Restore the full duration and re-arm the completion latch.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.carry_ms = 0;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_decrement_per_second() {
        let mut c = Countdown::new(30);
        for expected in (1..30).rev() {
            assert!(!c.advance(1000));
            assert_eq!(c.remaining_secs(), expected);
        }
        assert!(c.advance(1000));
        assert_eq!(c.remaining_secs(), 0);
        assert!(c.is_finished());
    }

    #[test]
    fn sub_second_deltas_accumulate() {
        let mut c = Countdown::new(5);
        for _ in 0..3 {
            assert!(!c.advance(250));
        }
        assert_eq!(c.remaining_secs(), 5);
        assert!(!c.advance(250));
        assert_eq!(c.remaining_secs(), 4);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut c = Countdown::new(2);
        assert!(c.advance(2000));
        assert!(!c.advance(1000));
        assert!(!c.advance(1000));
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn large_delta_completes_in_one_advance() {
        let mut c = Countdown::new(30);
        assert!(c.advance(120_000));
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn reset_rearms_the_latch() {
        let mut c = Countdown::new(3);
        assert!(c.advance(3000));
        c.reset();
        assert_eq!(c.remaining_secs(), 3);
        assert!(!c.is_finished());
        assert!(c.advance(3000));
    }
}
