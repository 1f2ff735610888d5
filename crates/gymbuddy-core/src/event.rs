//! Verdicts and discrete events
//!
//! A verdict is produced every cycle. An event is produced at most once
//! per cycle, when a repetition completes or a held second is credited.

use serde::{Deserialize, Serialize};

use crate::SessionTime;

/// Per-frame form verdict
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub form_correct: bool,
    /// Coaching cue for the most severe violation, empty when all checks pass
    pub cue: String,
}

impl Verdict {
    pub fn new(form_correct: bool, cue: impl Into<String>) -> Self {
        Self {
            form_correct,
            cue: cue.into(),
        }
    }

    /// Verdict for a frame that cannot be judged
    pub fn fail_closed() -> Self {
        Self {
            form_correct: false,
            cue: String::new(),
        }
    }
}

/// Event kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// One completed repetition
    Rep,
    /// One credited second of a hold
    HoldSecond,
}

/// Discrete event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEvent {
    pub kind: EventKind,
    /// 1-based running index within the session
    pub index: u32,
    /// Whether form was acceptable for the counted rep or second
    pub was_correct: bool,
    pub at: SessionTime,
}

impl FormEvent {
    pub fn rep(index: u32, was_correct: bool, at: SessionTime) -> Self {
        Self {
            kind: EventKind::Rep,
            index,
            was_correct,
            at,
        }
    }

    pub fn hold_second(index: u32, at: SessionTime) -> Self {
        Self {
            kind: EventKind::HoldSecond,
            index,
            was_correct: true,
            at,
        }
    }
}
