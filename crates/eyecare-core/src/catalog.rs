//! Static exercise catalog.
//!
//! The catalog is compiled into the binary and never mutated at runtime.
//! Sessions reference entries by id only; an unknown id is a user-visible
//! not-found condition, not a panic.

use serde::Serialize;

use crate::motion::MotionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One guided exercise definition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub motion: MotionType,
    pub title: &'static str,
    pub description: &'static str,
    pub duration_secs: u32,
    pub difficulty: Difficulty,
    /// Ordered human-readable steps shown on the ready screen.
    pub instructions: &'static [&'static str],
}

pub const EXERCISES: &[Exercise] = &[
    Exercise {
        id: "rule-20-20-20",
        motion: MotionType::Rule202020,
        title: "20-20-20 Rule",
        description: "The most basic rest technique for reducing digital eye strain.",
        duration_secs: 20,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Every 20 minutes, look away from your screen.",
            "Focus on something about 20 feet (6 meters) away.",
            "Hold your gaze for 20 seconds to relax the eye muscles.",
        ],
    },
    Exercise {
        id: "figure-eight",
        motion: MotionType::FigureEight,
        title: "Figure Eight",
        description: "Trace a smooth figure-eight to build flexibility in the eye muscles.",
        duration_secs: 45,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Keep your head still and move only your eyes.",
            "Follow the ball along the figure-eight path.",
            "Move slowly and smoothly.",
        ],
    },
    Exercise {
        id: "circle-roll",
        motion: MotionType::Circle,
        title: "Circle Roll",
        description: "Roll your eyes along a wide circle to stretch every eye muscle evenly.",
        duration_secs: 30,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Follow the ball clockwise, slowly.",
            "Trace the largest circle you comfortably can.",
            "Repeat in the opposite direction afterwards.",
        ],
    },
    Exercise {
        id: "left-right",
        motion: MotionType::LeftRight,
        title: "Left-Right Sweep",
        description: "Sweep your eyes fully left and right to work the horizontal muscles.",
        duration_secs: 30,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Face forward and look as far right as you can.",
            "Hold briefly, then look as far left as you can.",
            "Stretch until you feel a gentle pull.",
        ],
    },
    Exercise {
        id: "random-tracking",
        motion: MotionType::Random,
        title: "Random Tracking",
        description: "Chase an unpredictably moving target to sharpen reaction and focus.",
        duration_secs: 45,
        difficulty: Difficulty::Hard,
        instructions: &[
            "Find the ball wherever it appears on screen.",
            "Shift your gaze quickly each time it moves.",
            "Keep your head still; move only your eyes.",
        ],
    },
    Exercise {
        id: "near-far",
        motion: MotionType::NearFar,
        title: "Near-Far Focus",
        description: "Alternate focus between near and far to train the lens.",
        duration_secs: 60,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Hold a thumb about 10 cm in front of your eyes.",
            "Focus on the thumb.",
            "Stretch your arm out while keeping focus on it.",
            "Bring it slowly back toward your eyes.",
        ],
    },
    Exercise {
        id: "palming",
        motion: MotionType::Palming,
        title: "Palming",
        description: "Warm palms over closed eyes to release tension.",
        duration_secs: 60,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Rub your palms together until warm.",
            "Cup the warm palms over your closed eyes.",
            "Relax into the darkness.",
            "Block out light without pressing on the eyes.",
        ],
    },
    Exercise {
        id: "blinking",
        motion: MotionType::Blinking,
        title: "Conscious Blinking",
        description: "Fully close and open the eyes to prevent dryness.",
        duration_secs: 30,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Close your eyes slowly.",
            "Pause, then open them wide.",
            "Repeat so the tear film spreads evenly.",
        ],
    },
    Exercise {
        id: "saccade-jumps",
        motion: MotionType::Saccade,
        title: "Saccade Jumps",
        description: "Snap your gaze between targets to train rapid refocusing.",
        duration_secs: 30,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Find the dot the moment it appears.",
            "Jump your gaze to it as fast as you can.",
            "Do not move your head.",
        ],
    },
    Exercise {
        id: "wave-tracking",
        motion: MotionType::HorizontalTracking,
        title: "Wave Tracking",
        description: "Follow a dot riding a slow wave to build tracking flexibility.",
        duration_secs: 30,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Keep your head still.",
            "Follow the dot as it rides the wave, without losing it.",
        ],
    },
];

/// All catalog entries, in display order.
pub fn all() -> &'static [Exercise] {
    EXERCISES
}

/// Look up an exercise by id.
pub fn find(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = EXERCISES.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), EXERCISES.len());
    }

    #[test]
    fn entries_are_well_formed() {
        for e in EXERCISES {
            assert!(e.duration_secs > 0, "{}", e.id);
            assert!(!e.instructions.is_empty(), "{}", e.id);
        }
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("figure-eight").unwrap().motion, MotionType::FigureEight);
        assert!(find("no-such-exercise").is_none());
    }
}
