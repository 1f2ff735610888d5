//! Session - owns all per-session state and runs one cycle per tick
//!
//! Every cycle goes through the same stages:
//! 1. resolve the pose (holdover bridges short dropouts)
//! 2. extract features
//! 3. evaluate form and detect events
//! 4. latch the status
//! 5. dispatch the cue
//!
//! The generation counter changes on every command, so a caller that
//! read it before awaiting a pose can tell whether its result is stale.

use serde::{Deserialize, Serialize};

use gymbuddy_core::{
    CoachError, CoachResult, ExerciseKind, FormEvent, PoseSample, SessionTime, Verdict,
};
use gymbuddy_features::{FeatureSet, HoldoverConfig, PoseHoldover, Resolution};
use gymbuddy_form::{FormEvaluator, Tally, ThresholdProfile};

use crate::{CueDispatcher, FormStatus, RuntimeConfig, StatusLatch};

/// Where this cycle's pose came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tracking {
    Fresh,
    Held,
    Lost,
}

/// Output of one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutput {
    pub at: SessionTime,
    pub verdict: Verdict,
    pub status: FormStatus,
    pub event: Option<FormEvent>,
    /// Text to speak now, already deduplicated
    pub speak: Option<String>,
    pub tracking: Tracking,
}

/// Final account of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub exercise: ExerciseKind,
    pub reps: u32,
    pub correct_reps: u32,
    pub hold_seconds: u32,
    pub best_hold_streak: u32,
    pub cycles_evaluated: u64,
    /// Cycles judged on a held-over pose
    pub cycles_held: u64,
    pub cycles_without_pose: u64,
    pub cues_spoken: u64,
}

/// Per-session counters
#[derive(Clone, Debug, Default)]
struct SessionStats {
    cycles: u64,
    cycles_held: u64,
    cycles_without_pose: u64,
    cues_spoken: u64,
}

/// State of a running session
#[derive(Debug)]
struct Active {
    profile: ThresholdProfile,
    evaluator: FormEvaluator,
    holdover: PoseHoldover,
    latch: StatusLatch,
    cues: CueDispatcher,
    stats: SessionStats,
}

impl Active {
    fn new(profile: ThresholdProfile) -> Self {
        let holdover = PoseHoldover::new(holdover_config(&profile));

        Self {
            evaluator: FormEvaluator::new(&profile),
            latch: StatusLatch::new(profile.good_frames_to_green, profile.bad_frames_to_red),
            cues: CueDispatcher::new(profile.cue_hold),
            holdover,
            profile,
            stats: SessionStats::default(),
        }
    }

    /// Swap the exercise; the holdover pose carries over under the new window
    fn switch_to(&mut self, profile: ThresholdProfile) {
        self.holdover.reconfigure(holdover_config(&profile));
        self.evaluator = FormEvaluator::new(&profile);
        self.latch = StatusLatch::new(profile.good_frames_to_green, profile.bad_frames_to_red);
        self.cues = CueDispatcher::new(profile.cue_hold);
        self.profile = profile;
    }

    fn summary(&self) -> SessionSummary {
        let tally = self.evaluator.tally();
        SessionSummary {
            exercise: self.profile.exercise,
            reps: tally.reps,
            correct_reps: tally.correct_reps,
            hold_seconds: tally.hold_seconds,
            best_hold_streak: tally.best_streak,
            cycles_evaluated: self.stats.cycles,
            cycles_held: self.stats.cycles_held,
            cycles_without_pose: self.stats.cycles_without_pose,
            cues_spoken: self.stats.cues_spoken,
        }
    }
}

fn holdover_config(profile: &ThresholdProfile) -> HoldoverConfig {
    HoldoverConfig {
        window: profile.holdover,
        weak_pose_score: profile.weak_pose_score,
    }
}

/// One coaching session
#[derive(Debug)]
pub struct Session {
    config: RuntimeConfig,
    active: Option<Active>,
    generation: u64,
    last_summary: Option<SessionSummary>,
}

impl Session {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            active: None,
            generation: 0,
            last_summary: None,
        }
    }

    /// Start a session for `exercise` with fresh state
    pub fn start(&mut self, exercise: ExerciseKind) -> CoachResult<()> {
        if self.active.is_some() {
            return Err(CoachError::SessionAlreadyRunning);
        }

        self.active = Some(Active::new(self.config.profile(exercise)));
        self.last_summary = None;
        self.generation += 1;
        tracing::info!(%exercise, generation = self.generation, "session started");
        Ok(())
    }

    /// Change exercise mid-session. Evaluator, latch and cue state reset.
    pub fn set_exercise(&mut self, exercise: ExerciseKind) -> CoachResult<()> {
        let profile = self.config.profile(exercise);
        let active = self.active.as_mut().ok_or(CoachError::SessionNotRunning)?;

        let previous = active.profile.exercise;
        active.switch_to(profile);
        self.generation += 1;
        tracing::info!(from = %previous, to = %exercise, "exercise changed");
        Ok(())
    }

    /// Stop the session. Repeated calls return the same summary.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        if let Some(active) = self.active.take() {
            let summary = active.summary();
            self.generation += 1;
            tracing::info!(
                exercise = %summary.exercise,
                reps = summary.reps,
                correct_reps = summary.correct_reps,
                hold_seconds = summary.hold_seconds,
                cycles = summary.cycles_evaluated,
                "session stopped"
            );
            self.last_summary = Some(summary);
        }
        self.last_summary.clone()
    }

    /// Run one cycle
    pub fn tick(&mut self, sample: PoseSample) -> CoachResult<CycleOutput> {
        let active = self.active.as_mut().ok_or(CoachError::SessionNotRunning)?;
        let Active {
            profile,
            evaluator,
            holdover,
            latch,
            cues,
            stats,
        } = active;
        let at = sample.at;
        stats.cycles += 1;

        // Stages 1-2: resolve pose, extract features
        let resolution = holdover.resolve(sample);
        let tracking = match resolution {
            Resolution::Fresh(_) => Tracking::Fresh,
            Resolution::Held { .. } => Tracking::Held,
            Resolution::Lost => Tracking::Lost,
        };
        let features = resolution
            .pose()
            .map(|pose| FeatureSet::from_pose(pose, profile.min_kp_score));

        match tracking {
            Tracking::Held => stats.cycles_held += 1,
            Tracking::Lost => stats.cycles_without_pose += 1,
            Tracking::Fresh => {}
        }

        // Stage 3: evaluate
        let assessment = evaluator.step(features.as_ref(), profile, at);

        // Stage 4: latch
        let status = latch.update(assessment.verdict.form_correct);

        // Stage 5: cue
        let speak = cues.dispatch(&assessment.verdict.cue, at);
        if speak.is_some() {
            stats.cues_spoken += 1;
        }

        if let Some(event) = &assessment.event {
            tracing::info!(
                kind = ?event.kind,
                index = event.index,
                was_correct = event.was_correct,
                ?at,
                "form event"
            );
        }

        Ok(CycleOutput {
            at,
            verdict: assessment.verdict,
            status,
            event: assessment.event,
            speak,
            tracking,
        })
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn exercise(&self) -> Option<ExerciseKind> {
        self.active.as_ref().map(|a| a.profile.exercise)
    }

    pub fn profile(&self) -> Option<&ThresholdProfile> {
        self.active.as_ref().map(|a| &a.profile)
    }

    pub fn status(&self) -> FormStatus {
        self.active
            .as_ref()
            .map_or(FormStatus::Neutral, |a| a.latch.status())
    }

    pub fn tally(&self) -> Tally {
        self.active
            .as_ref()
            .map_or_else(Tally::default, |a| a.evaluator.tally())
    }
}
