//! Hold-time accumulation
//!
//! Frames are grouped into whole-second buckets of session time. When a
//! frame lands in a new bucket the previous one is judged: it is credited
//! if enough of its frames were correct. Credited seconds feed a total that
//! never decreases and a visible streak that a failed second or lost
//! tracking may close.

use gymbuddy_core::{FormEvent, SessionTime};

use crate::HoldBreakPolicy;

/// Frames seen in the current second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bucket {
    second: i64,
    good: u32,
    total: u32,
}

/// Per-second hold accumulator
#[derive(Debug, Clone)]
pub struct HoldAccumulator {
    green_frac: f32,
    policy: HoldBreakPolicy,
    bucket: Option<Bucket>,
    /// Credited seconds this session
    seconds: u32,
    /// Current unbroken streak
    current: u32,
    /// Longest streak closed so far
    best: u32,
}

impl HoldAccumulator {
    pub fn new(green_frac: f32, policy: HoldBreakPolicy) -> Self {
        Self {
            green_frac,
            policy,
            bucket: None,
            seconds: 0,
            current: 0,
            best: 0,
        }
    }

    /// Record one judged frame
    pub fn record(&mut self, correct: bool, now: SessionTime) -> Option<FormEvent> {
        let second = now.second_bucket();
        let mut event = None;

        let bucket = match self.bucket.take() {
            Some(bucket) if bucket.second == second => bucket,
            Some(finished) => {
                event = self.judge(finished, now);
                Bucket::empty(second)
            }
            None => Bucket::empty(second),
        };

        self.bucket = Some(Bucket {
            good: bucket.good + u32::from(correct),
            total: bucket.total + 1,
            ..bucket
        });

        event
    }

    fn judge(&mut self, bucket: Bucket, now: SessionTime) -> Option<FormEvent> {
        let credited =
            bucket.total > 0 && bucket.good as f32 / bucket.total as f32 >= self.green_frac;

        if credited {
            self.seconds += 1;
            self.current += 1;
            self.best = self.best.max(self.current);
            return Some(FormEvent::hold_second(self.seconds, now));
        }

        tracing::debug!(
            good = bucket.good,
            total = bucket.total,
            policy = ?self.policy,
            "hold second not credited"
        );
        if self.policy == HoldBreakPolicy::ResetStreak {
            self.close_streak();
        }
        None
    }

    /// Tracking was lost: the partial second is dropped and the streak closed
    pub fn lose_tracking(&mut self) {
        self.bucket = None;
        self.close_streak();
    }

    fn close_streak(&mut self) {
        self.best = self.best.max(self.current);
        self.current = 0;
    }

    /// Credited seconds this session
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn current_streak(&self) -> u32 {
        self.current
    }

    pub fn best_streak(&self) -> u32 {
        self.best.max(self.current)
    }
}

impl Bucket {
    fn empty(second: i64) -> Self {
        Self {
            second,
            good: 0,
            total: 0,
        }
    }
}
