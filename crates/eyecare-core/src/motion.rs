//! Motion generator -- pure time-to-position formulas.
//!
//! Each exercise renders a single moving target. The position of that target
//! at any instant is a pure function of the motion type and the elapsed
//! animation time: identical `(track, t)` always yields identical output.
//! The only state a track carries is the waypoint list for random tracking,
//! fixed once at session start.
//!
//! Coordinates are offsets from a fixed screen center in arbitrary but
//! consistent units. All parametric patterns are periodic.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

/// The enumerated animation pattern driving an exercise visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    /// Lissajous figure-eight for smooth pursuit.
    FigureEight,
    /// Fast horizontal sine with a slow vertical wave.
    HorizontalTracking,
    /// Discrete jumps between fixed targets.
    Saccade,
    /// Pulsing focus circle (scale only, no translation).
    NearFar,
    /// Two-phase open/closed alternator.
    Blinking,
    /// Constant-speed rotation.
    Circle,
    /// Full-width horizontal sweep.
    LeftRight,
    /// Session-seeded random waypoint tracking.
    Random,
    /// Eyes covered, no target motion.
    Palming,
    /// Look-into-the-distance rest, no target motion.
    Rule202020,
}

/// One sampled animation frame.
///
/// `x`/`y` are offsets from center. `scale` is the rendered target size
/// factor (only near/far varies it). `eyes_open` is the blink phase (only
/// blinking toggles it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub eyes_open: bool,
}

impl Frame {
    /// Stationary frame at center.
    pub fn rest() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            eyes_open: true,
        }
    }

    fn at(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::rest() }
    }
}

// Angular rates are radians per millisecond; amplitudes match the
// original visual proportions.
const FIGURE_EIGHT_RATE: f64 = 0.0015;
const FIGURE_EIGHT_X_AMP: f64 = 35.0;
const FIGURE_EIGHT_Y_AMP: f64 = 25.0;

const WAVE_RATE: f64 = 0.002;
const WAVE_X_AMP: f64 = 40.0;
const WAVE_Y_AMP: f64 = 25.0;

const SACCADE_HOLD_MS: f64 = 1200.0;
const SACCADE_TARGETS: [(f64, f64); 5] = [
    (-100.0, -60.0),
    (100.0, 60.0),
    (100.0, -60.0),
    (-100.0, 60.0),
    (0.0, 0.0),
];

const NEAR_FAR_RATE: f64 = 0.0015;
const NEAR_FAR_BASE: f64 = 1.5;
const NEAR_FAR_SWING: f64 = 1.0;

const BLINK_PHASE_MS: f64 = 2500.0;

const CIRCLE_PERIOD_MS: f64 = 4000.0;
const CIRCLE_RADIUS: f64 = 100.0;

const LEFT_RIGHT_PERIOD_MS: f64 = 3000.0;
const LEFT_RIGHT_AMP: f64 = 120.0;

const RANDOM_WAYPOINTS: usize = 20;
const RANDOM_LEG_MS: f64 = 1000.0;
const RANDOM_X_RANGE: f64 = 100.0;
const RANDOM_Y_RANGE: f64 = 60.0;

/// Motion formula evaluator for one session.
///
/// Cheap to clone and serializable so the session player can be persisted
/// between CLI invocations without losing the random waypoint sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionTrack {
    motion: MotionType,
    /// Waypoints for [`MotionType::Random`], generated once per session
    /// start. Empty for every other motion type.
    #[serde(default)]
    waypoints: Vec<(f64, f64)>,
}

impl MotionTrack {
    /// Create a track with a fresh entropy seed (random tracking only).
    pub fn new(motion: MotionType) -> Self {
        Self::with_seed(motion, rand::random())
    }

    /// Create a track with an explicit seed. Two tracks built from the same
    /// seed produce identical random waypoint sequences.
    pub fn with_seed(motion: MotionType, seed: u64) -> Self {
        let waypoints = if motion == MotionType::Random {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            (0..RANDOM_WAYPOINTS)
                .map(|_| {
                    (
                        rng.gen_range(-RANDOM_X_RANGE..=RANDOM_X_RANGE),
                        rng.gen_range(-RANDOM_Y_RANGE..=RANDOM_Y_RANGE),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        Self { motion, waypoints }
    }

    pub fn motion(&self) -> MotionType {
        self.motion
    }

    /// Pattern period in milliseconds, `None` for the stationary rest
    /// frames (palming, 20-20-20).
    pub fn period_ms(&self) -> Option<f64> {
        match self.motion {
            MotionType::FigureEight => Some(2.0 * PI / FIGURE_EIGHT_RATE),
            // The slow vertical component runs at half rate, so the full
            // pattern repeats after two horizontal cycles.
            MotionType::HorizontalTracking => Some(4.0 * PI / WAVE_RATE),
            MotionType::Saccade => Some(SACCADE_HOLD_MS * SACCADE_TARGETS.len() as f64),
            MotionType::NearFar => Some(2.0 * PI / NEAR_FAR_RATE),
            MotionType::Blinking => Some(2.0 * BLINK_PHASE_MS),
            MotionType::Circle => Some(CIRCLE_PERIOD_MS),
            MotionType::LeftRight => Some(LEFT_RIGHT_PERIOD_MS),
            MotionType::Random => {
                (!self.waypoints.is_empty()).then(|| RANDOM_LEG_MS * self.waypoints.len() as f64)
            }
            MotionType::Palming | MotionType::Rule202020 => None,
        }
    }

    /// Sample the pattern at `t_ms` milliseconds of elapsed animation time.
    ///
    /// Defined and finite for every `t_ms >= 0`, including `t_ms == 0`.
    pub fn frame(&self, t_ms: f64) -> Frame {
        let t = t_ms.max(0.0);
        match self.motion {
            MotionType::FigureEight => {
                let theta = t * FIGURE_EIGHT_RATE;
                Frame::at(
                    FIGURE_EIGHT_X_AMP * theta.sin(),
                    FIGURE_EIGHT_Y_AMP * (2.0 * theta).sin(),
                )
            }
            MotionType::HorizontalTracking => {
                let theta = t * WAVE_RATE;
                Frame::at(WAVE_X_AMP * theta.sin(), WAVE_Y_AMP * (theta / 2.0).sin())
            }
            MotionType::Saccade => {
                let index = (t / SACCADE_HOLD_MS) as usize % SACCADE_TARGETS.len();
                let (x, y) = SACCADE_TARGETS[index];
                Frame::at(x, y)
            }
            MotionType::NearFar => Frame {
                scale: NEAR_FAR_BASE + NEAR_FAR_SWING * (t * NEAR_FAR_RATE).sin(),
                ..Frame::rest()
            },
            MotionType::Blinking => Frame {
                eyes_open: (t / BLINK_PHASE_MS) as u64 % 2 == 0,
                ..Frame::rest()
            },
            MotionType::Circle => {
                let theta = t * 2.0 * PI / CIRCLE_PERIOD_MS;
                Frame::at(CIRCLE_RADIUS * theta.cos(), CIRCLE_RADIUS * theta.sin())
            }
            MotionType::LeftRight => {
                let theta = t * 2.0 * PI / LEFT_RIGHT_PERIOD_MS;
                Frame::at(LEFT_RIGHT_AMP * theta.sin(), 0.0)
            }
            MotionType::Random => self.random_frame(t),
            MotionType::Palming | MotionType::Rule202020 => Frame::rest(),
        }
    }

    fn random_frame(&self, t: f64) -> Frame {
        let n = self.waypoints.len();
        if n < 2 {
            return Frame::rest();
        }
        let total = RANDOM_LEG_MS * n as f64;
        let tm = t % total;
        let index = (tm / RANDOM_LEG_MS) as usize % n;
        let frac = (tm % RANDOM_LEG_MS) / RANDOM_LEG_MS;
        let (x0, y0) = self.waypoints[index];
        let (x1, y1) = self.waypoints[(index + 1) % n];
        Frame::at(x0 + (x1 - x0) * frac, y0 + (y1 - y0) * frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_TYPES: [MotionType; 10] = [
        MotionType::FigureEight,
        MotionType::HorizontalTracking,
        MotionType::Saccade,
        MotionType::NearFar,
        MotionType::Blinking,
        MotionType::Circle,
        MotionType::LeftRight,
        MotionType::Random,
        MotionType::Palming,
        MotionType::Rule202020,
    ];

    #[test]
    fn frame_at_zero_is_finite_for_all_types() {
        for motion in ALL_TYPES {
            let track = MotionTrack::with_seed(motion, 7);
            let f = track.frame(0.0);
            assert!(f.x.is_finite() && f.y.is_finite() && f.scale.is_finite(), "{motion:?}");
        }
    }

    #[test]
    fn saccade_snaps_and_wraps() {
        let track = MotionTrack::new(MotionType::Saccade);
        let first = track.frame(0.0);
        assert_eq!((first.x, first.y), SACCADE_TARGETS[0]);
        // Mid-hold position is identical to hold start: no interpolation.
        assert_eq!(track.frame(600.0), first);
        // One full cycle later the first target is active again.
        let cycle = SACCADE_HOLD_MS * SACCADE_TARGETS.len() as f64;
        assert_eq!(track.frame(cycle), first);
        let second = track.frame(SACCADE_HOLD_MS);
        assert_eq!((second.x, second.y), SACCADE_TARGETS[1]);
    }

    #[test]
    fn blink_duty_cycle_is_half_open_half_closed() {
        let track = MotionTrack::new(MotionType::Blinking);
        assert!(track.frame(0.0).eyes_open);
        assert!(track.frame(2499.0).eyes_open);
        assert!(!track.frame(2500.0).eyes_open);
        assert!(!track.frame(4999.0).eyes_open);
        assert!(track.frame(5000.0).eyes_open);
    }

    #[test]
    fn near_far_only_varies_scale() {
        let track = MotionTrack::new(MotionType::NearFar);
        let f = track.frame(700.0);
        assert_eq!((f.x, f.y), (0.0, 0.0));
        assert!(f.scale > NEAR_FAR_BASE - NEAR_FAR_SWING - 1e-9);
        assert!(f.scale < NEAR_FAR_BASE + NEAR_FAR_SWING + 1e-9);
    }

    #[test]
    fn rest_types_never_move() {
        for motion in [MotionType::Palming, MotionType::Rule202020] {
            let track = MotionTrack::new(motion);
            assert_eq!(track.frame(0.0), Frame::rest());
            assert_eq!(track.frame(123_456.0), Frame::rest());
            assert_eq!(track.period_ms(), None);
        }
    }

    #[test]
    fn random_track_is_fixed_per_seed() {
        let a = MotionTrack::with_seed(MotionType::Random, 42);
        let b = MotionTrack::with_seed(MotionType::Random, 42);
        for t in [0.0, 333.0, 1500.0, 19_999.0] {
            assert_eq!(a.frame(t), b.frame(t));
        }
    }

    #[test]
    fn random_waypoints_stay_in_bounds() {
        let track = MotionTrack::with_seed(MotionType::Random, 99);
        let period = track.period_ms().unwrap();
        let mut t = 0.0;
        while t < period {
            let f = track.frame(t);
            assert!(f.x.abs() <= RANDOM_X_RANGE + 1e-9);
            assert!(f.y.abs() <= RANDOM_Y_RANGE + 1e-9);
            t += 137.0;
        }
    }

    #[test]
    fn random_interpolates_between_waypoints() {
        let track = MotionTrack::with_seed(MotionType::Random, 5);
        let start = track.frame(0.0);
        let end = track.frame(RANDOM_LEG_MS);
        let mid = track.frame(RANDOM_LEG_MS / 2.0);
        assert!((mid.x - (start.x + end.x) / 2.0).abs() < 1e-9);
        assert!((mid.y - (start.y + end.y) / 2.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn periodic_types_repeat(t in 0.0f64..60_000.0, seed in any::<u64>()) {
            for motion in ALL_TYPES {
                // Saccade and blinking step discontinuously; their exact
                // boundary behavior is pinned in the unit tests above.
                if matches!(motion, MotionType::Saccade | MotionType::Blinking) {
                    continue;
                }
                let track = MotionTrack::with_seed(motion, seed);
                let Some(period) = track.period_ms() else { continue };
                let a = track.frame(t);
                let b = track.frame(t + period);
                prop_assert!((a.x - b.x).abs() < 1e-6, "{motion:?} x");
                prop_assert!((a.y - b.y).abs() < 1e-6, "{motion:?} y");
                prop_assert!((a.scale - b.scale).abs() < 1e-6, "{motion:?} scale");
                prop_assert_eq!(a.eyes_open, b.eyes_open, "{:?} phase", motion);
            }
        }

        #[test]
        fn frames_always_finite(t in 0.0f64..1.0e7, seed in any::<u64>()) {
            for motion in ALL_TYPES {
                let track = MotionTrack::with_seed(motion, seed);
                let f = track.frame(t);
                prop_assert!(f.x.is_finite() && f.y.is_finite() && f.scale.is_finite());
            }
        }
    }
}
