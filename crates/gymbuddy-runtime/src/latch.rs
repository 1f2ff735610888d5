//! Status hysteresis latch
//!
//! The displayed status changes only after a run of agreeing verdicts, so
//! single noisy frames never flicker the indicator. Turning bad takes a
//! longer run than turning good.

use serde::{Deserialize, Serialize};

/// Latched form status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStatus {
    /// Not enough evidence yet
    #[default]
    Neutral,
    Good,
    Bad,
}

/// Asymmetric consecutive-frame latch
#[derive(Debug, Clone)]
pub struct StatusLatch {
    good_to_green: u32,
    bad_to_red: u32,
    good_streak: u32,
    bad_streak: u32,
    status: FormStatus,
}

impl StatusLatch {
    /// Zero thresholds behave as one
    pub fn new(good_frames_to_green: u32, bad_frames_to_red: u32) -> Self {
        Self {
            good_to_green: good_frames_to_green.max(1),
            bad_to_red: bad_frames_to_red.max(1),
            good_streak: 0,
            bad_streak: 0,
            status: FormStatus::Neutral,
        }
    }

    /// Feed one verdict, returning the latched status
    pub fn update(&mut self, form_correct: bool) -> FormStatus {
        if form_correct {
            self.good_streak = self.good_streak.saturating_add(1);
            self.bad_streak = 0;
            if self.good_streak >= self.good_to_green {
                self.set(FormStatus::Good);
            }
        } else {
            self.bad_streak = self.bad_streak.saturating_add(1);
            self.good_streak = 0;
            if self.bad_streak >= self.bad_to_red {
                self.set(FormStatus::Bad);
            }
        }
        self.status
    }

    fn set(&mut self, status: FormStatus) {
        if self.status != status {
            tracing::debug!(from = ?self.status, to = ?status, "status latched");
            self.status = status;
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }
}
