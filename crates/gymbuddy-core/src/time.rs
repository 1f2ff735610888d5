//! Session time
//!
//! Every timestamp the engine sees is relative to the start of the
//! session. The driver derives it from a monotonic clock; tests construct
//! it directly so that replays are deterministic.

use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session time - microseconds since session start
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTime(pub i64);

impl SessionTime {
    pub const ZERO: SessionTime = SessionTime(0);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        SessionTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        SessionTime(millis * 1000)
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 / 1000
    }

    /// Index of the whole second this instant falls into
    #[inline]
    pub fn second_bucket(self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    #[inline]
    pub fn since(self, earlier: SessionTime) -> Duration {
        self - earlier
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        SessionTime(self.0.saturating_add(duration.as_micros() as i64))
    }
}

impl Add<Duration> for SessionTime {
    type Output = SessionTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        SessionTime(self.0 + rhs.as_micros() as i64)
    }
}

impl Sub<SessionTime> for SessionTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: SessionTime) -> Self::Output {
        let diff = self.0 - rhs.0;
        if diff >= 0 {
            Duration::from_micros(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl std::fmt::Debug for SessionTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({}ms)", self.as_millis())
    }
}
