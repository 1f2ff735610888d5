//! End-to-end Scenario Suite
//!
//! Drives a full session frame by frame with deterministic timestamps:
//! - Form verdicts and latched status
//! - Repetition and hold events
//! - Holdover across dropped frames
//! - Cue emission

use gymbuddy_core::{CoachResult, ExerciseKind, Pose, PoseSample, SessionTime};
use gymbuddy_runtime::{CycleOutput, RuntimeConfig, Session, SessionSummary};

use crate::synthetic::PoseGenerator;

// ============================================================================
// SCENARIO
// ============================================================================

/// A timed sequence of frames for one exercise
#[derive(Clone, Debug)]
pub struct Scenario {
    pub exercise: ExerciseKind,
    pub config: RuntimeConfig,
    pub frames: Vec<PoseSample>,
    /// Time of the next appended frame
    next_at: SessionTime,
}

impl Scenario {
    pub fn new(exercise: ExerciseKind) -> Self {
        Self {
            exercise,
            config: RuntimeConfig::default(),
            frames: Vec::new(),
            next_at: SessionTime::ZERO,
        }
    }

    /// Set one threshold for every exercise
    pub fn threshold(mut self, key: &str, value: f64) -> Self {
        self.config.thresholds.insert(key.to_string(), value);
        self
    }

    fn period(&self) -> std::time::Duration {
        self.config.cycle_period
    }

    /// Append `n` frames of the same pose, one cycle apart
    pub fn hold(mut self, pose: &Pose, n: usize) -> Self {
        for _ in 0..n {
            self.frames.push(PoseSample::present(pose.clone(), self.next_at));
            self.next_at = self.next_at + self.period();
        }
        self
    }

    /// Append `n` frames with no pose
    pub fn gap(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.frames.push(PoseSample::missing(self.next_at));
            self.next_at = self.next_at + self.period();
        }
        self
    }

    /// Append `n` frames of `pose` through a noise model
    pub fn noisy(mut self, pose: &Pose, n: usize, generator: &mut PoseGenerator) -> Self {
        for _ in 0..n {
            self.frames.push(generator.sample(pose, self.next_at));
            self.next_at = self.next_at + self.period();
        }
        self
    }

    /// Skip ahead without frames
    pub fn wait(mut self, duration: std::time::Duration) -> Self {
        self.next_at = self.next_at + duration;
        self
    }

    /// Run the scenario on a fresh session
    pub fn run(&self) -> CoachResult<ScenarioReport> {
        let mut session = Session::new(self.config.clone());
        session.start(self.exercise)?;

        let mut outputs = Vec::with_capacity(self.frames.len());
        let mut hold_seconds = Vec::with_capacity(self.frames.len());
        for sample in &self.frames {
            outputs.push(session.tick(sample.clone())?);
            hold_seconds.push(session.tally().hold_seconds);
        }

        let summary = session.stop().ok_or(gymbuddy_core::CoachError::SessionNotRunning)?;
        Ok(ScenarioReport {
            outputs,
            hold_seconds,
            summary,
        })
    }
}

/// What a scenario produced
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub outputs: Vec<CycleOutput>,
    /// Credited hold seconds after each frame
    pub hold_seconds: Vec<u32>,
    pub summary: SessionSummary,
}

impl ScenarioReport {
    pub fn events(&self) -> impl Iterator<Item = &gymbuddy_core::FormEvent> {
        self.outputs.iter().filter_map(|o| o.event.as_ref())
    }

    pub fn spoken(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter_map(|o| o.speak.as_deref())
            .collect()
    }
}
