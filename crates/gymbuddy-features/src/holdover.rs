//! Pose Holdover - continuity across brief tracking dropouts
//!
//! Pose estimators intermittently miss a frame. When that happens we keep
//! judging the last usable pose for a short window instead of flashing a
//! bad verdict and breaking hold timers. Once the window expires the
//! tracking is considered lost.

use std::time::Duration;

use gymbuddy_core::{Pose, PoseSample, SessionTime};

/// Holdover configuration
#[derive(Debug, Clone)]
pub struct HoldoverConfig {
    /// How long the last usable pose may stand in for missing ones
    pub window: Duration,

    /// A pose whose best keypoint scores below this is treated as missing
    pub weak_pose_score: f32,
}

impl Default for HoldoverConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(1200),
            weak_pose_score: 0.6,
        }
    }
}

/// Outcome of resolving one sample
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// The sample carried a usable pose
    Fresh(&'a Pose),
    /// The sample was empty; the last usable pose is substituted
    Held { pose: &'a Pose, age: Duration },
    /// No pose, and nothing recent enough to substitute
    Lost,
}

impl<'a> Resolution<'a> {
    pub fn pose(&self) -> Option<&'a Pose> {
        match *self {
            Resolution::Fresh(pose) | Resolution::Held { pose, .. } => Some(pose),
            Resolution::Lost => None,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Resolution::Lost)
    }
}

/// Retains the most recent usable pose and its timestamp
#[derive(Debug)]
pub struct PoseHoldover {
    config: HoldoverConfig,

    /// Last usable pose and when it was seen
    last: Option<(Pose, SessionTime)>,

    /// Consecutive samples served from the buffer
    held_count: u32,
}

impl PoseHoldover {
    pub fn new(config: HoldoverConfig) -> Self {
        Self {
            config,
            last: None,
            held_count: 0,
        }
    }

    /// Resolve a sample to the pose that should be judged this cycle
    pub fn resolve(&mut self, sample: PoseSample) -> Resolution<'_> {
        let usable = sample
            .pose
            .filter(|pose| !pose.is_weak(self.config.weak_pose_score));

        if let Some(pose) = usable {
            self.held_count = 0;
            let (pose, _) = self.last.insert((pose, sample.at));
            return Resolution::Fresh(pose);
        }

        match &self.last {
            Some((pose, seen_at)) => {
                let age = sample.at.since(*seen_at);
                if age < self.config.window {
                    self.held_count += 1;
                    tracing::trace!(?age, held = self.held_count, "pose held over");
                    Resolution::Held { pose, age }
                } else {
                    Resolution::Lost
                }
            }
            None => Resolution::Lost,
        }
    }

    /// Consecutive cycles served from the buffer
    pub fn held_count(&self) -> u32 {
        self.held_count
    }

    /// When the last usable pose was seen
    pub fn last_seen(&self) -> Option<SessionTime> {
        self.last.as_ref().map(|(_, at)| *at)
    }

    /// Swap window and weak-pose cutoff, keeping the stored pose
    pub fn reconfigure(&mut self, config: HoldoverConfig) {
        self.config = config;
    }
}

impl Default for PoseHoldover {
    fn default() -> Self {
        Self::new(HoldoverConfig::default())
    }
}
