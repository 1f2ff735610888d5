//! Repetition state machine
//!
//! Runs over one scalar displacement signal per exercise, where larger
//! means further from the start position:
//!
//! ```text
//!   Idle ──(signal ≥ moved)──▶ Descending
//!   Descending ──(depth reached, signal stops growing)──▶ Ascending
//!   Ascending ──(signal ≤ near_top)──▶ Idle   (+1 rep unless debounced)
//! ```
//!
//! A descent that returns to the top without reaching depth is abandoned
//! without counting.

use std::time::Duration;

use gymbuddy_core::{FormEvent, SessionTime};

/// Phase of the current repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepPhase {
    Idle,
    Descending,
    Ascending,
}

/// Signal levels for one exercise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepRule {
    /// Leaving the top position
    pub moved: f32,
    /// Deep enough for the rep to count
    pub depth: f32,
    /// Back at the top
    pub near_top: f32,
    /// Minimum spacing between counted reps
    pub min_rep: Duration,
}

/// Counts repetitions and whether each was performed cleanly
#[derive(Debug, Clone)]
pub struct RepCounter {
    rule: RepRule,
    phase: RepPhase,
    prev_signal: Option<f32>,
    depth_reached: bool,
    /// Every frame of the current rep was acceptable
    clean: bool,
    count: u32,
    correct_count: u32,
    last_rep_at: Option<SessionTime>,
}

impl RepCounter {
    pub fn new(rule: RepRule) -> Self {
        Self {
            rule,
            phase: RepPhase::Idle,
            prev_signal: None,
            depth_reached: false,
            clean: true,
            count: 0,
            correct_count: 0,
            last_rep_at: None,
        }
    }

    /// Advance on one frame. `frame_ok` is the frame's form outcome with
    /// the depth check excluded; depth is tracked here.
    pub fn update(&mut self, signal: f32, frame_ok: bool, now: SessionTime) -> Option<FormEvent> {
        let prev = self.prev_signal.replace(signal);
        let mut event = None;

        match self.phase {
            RepPhase::Idle => {
                if signal >= self.rule.moved {
                    self.depth_reached = signal >= self.rule.depth;
                    self.clean = frame_ok;
                    self.transition(RepPhase::Descending, signal);
                }
            }
            RepPhase::Descending => {
                self.clean &= frame_ok;
                if signal >= self.rule.depth {
                    self.depth_reached = true;
                }

                let stopped_growing = prev.map_or(false, |p| signal <= p);
                if self.depth_reached && stopped_growing {
                    self.transition(RepPhase::Ascending, signal);
                } else if !self.depth_reached && signal <= self.rule.near_top {
                    tracing::debug!(signal, "shallow repetition abandoned");
                    self.transition(RepPhase::Idle, signal);
                }
            }
            RepPhase::Ascending => {
                self.clean &= frame_ok;
                if signal <= self.rule.near_top {
                    event = self.complete(now);
                    self.transition(RepPhase::Idle, signal);
                }
            }
        }

        event
    }

    /// Record a frame that could not be judged. Spoils a rep in progress.
    pub fn taint(&mut self) {
        if self.phase != RepPhase::Idle {
            self.clean = false;
        }
    }

    fn complete(&mut self, now: SessionTime) -> Option<FormEvent> {
        let debounced = self
            .last_rep_at
            .is_some_and(|last| now.since(last) < self.rule.min_rep);
        if debounced {
            tracing::debug!(?now, "repetition absorbed by debounce");
            return None;
        }

        let was_correct = self.clean && self.depth_reached;
        self.count += 1;
        if was_correct {
            self.correct_count += 1;
        }
        self.last_rep_at = Some(now);

        Some(FormEvent::rep(self.count, was_correct, now))
    }

    fn transition(&mut self, to: RepPhase, signal: f32) {
        tracing::debug!(from = ?self.phase, ?to, signal, "rep phase");
        self.phase = to;
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RepPhase::Idle
    }

    /// Reps counted so far
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Reps counted with acceptable form
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }
}
