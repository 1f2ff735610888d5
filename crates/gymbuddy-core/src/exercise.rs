//! Exercise kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoachError;

/// Supported bodyweight exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Squat,
    #[serde(rename = "pushup")]
    PushUp,
    Plank,
    #[serde(rename = "deadbug")]
    DeadBug,
    #[serde(rename = "wallsit")]
    WallSit,
}

impl ExerciseKind {
    pub fn all() -> &'static [ExerciseKind] {
        &[
            ExerciseKind::Squat,
            ExerciseKind::PushUp,
            ExerciseKind::Plank,
            ExerciseKind::DeadBug,
            ExerciseKind::WallSit,
        ]
    }

    /// Stable identifier, also the prefix of per-exercise config keys
    pub fn id(self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::PushUp => "pushup",
            ExerciseKind::Plank => "plank",
            ExerciseKind::DeadBug => "deadbug",
            ExerciseKind::WallSit => "wallsit",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ExerciseKind::all()
            .iter()
            .copied()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| CoachError::UnknownExercise(s.to_string()))
    }
}
