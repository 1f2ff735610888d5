//! Form evaluator - per-exercise dispatch
//!
//! Each exercise owns an evaluator that carries its own state (baselines,
//! repetition phase, hold buckets). `FormEvaluator` tags them and routes
//! every frame to the active one.

use gymbuddy_core::{ExerciseKind, FormEvent, SessionTime, Verdict};
use gymbuddy_features::FeatureSet;

use crate::{
    DeadBugEvaluator, PlankEvaluator, PushUpEvaluator, SquatEvaluator, ThresholdProfile,
    WallSitEvaluator,
};

/// Result of judging one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    pub verdict: Verdict,
    /// At most one event per frame
    pub event: Option<FormEvent>,
}

impl Assessment {
    pub fn new(verdict: Verdict, event: Option<FormEvent>) -> Self {
        Self { verdict, event }
    }

    /// Incorrect, no cue, no event
    pub fn fail_closed() -> Self {
        Self::default()
    }
}

/// Running totals for the active exercise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub reps: u32,
    pub correct_reps: u32,
    pub hold_seconds: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// The active exercise's evaluator
#[derive(Debug, Clone)]
pub enum FormEvaluator {
    Squat(SquatEvaluator),
    PushUp(PushUpEvaluator),
    Plank(PlankEvaluator),
    DeadBug(DeadBugEvaluator),
    WallSit(WallSitEvaluator),
}

impl FormEvaluator {
    /// Fresh evaluator for the profile's exercise
    pub fn new(profile: &ThresholdProfile) -> Self {
        match profile.exercise {
            ExerciseKind::Squat => FormEvaluator::Squat(SquatEvaluator::new(profile)),
            ExerciseKind::PushUp => FormEvaluator::PushUp(PushUpEvaluator::new(profile)),
            ExerciseKind::Plank => FormEvaluator::Plank(PlankEvaluator::new(profile)),
            ExerciseKind::DeadBug => FormEvaluator::DeadBug(DeadBugEvaluator::new(profile)),
            ExerciseKind::WallSit => FormEvaluator::WallSit(WallSitEvaluator::new(profile)),
        }
    }

    pub fn exercise(&self) -> ExerciseKind {
        match self {
            FormEvaluator::Squat(_) => ExerciseKind::Squat,
            FormEvaluator::PushUp(_) => ExerciseKind::PushUp,
            FormEvaluator::Plank(_) => ExerciseKind::Plank,
            FormEvaluator::DeadBug(_) => ExerciseKind::DeadBug,
            FormEvaluator::WallSit(_) => ExerciseKind::WallSit,
        }
    }

    /// Judge one cycle. `None` means no pose could be resolved.
    pub fn step(
        &mut self,
        features: Option<&FeatureSet>,
        profile: &ThresholdProfile,
        now: SessionTime,
    ) -> Assessment {
        let Some(features) = features else {
            self.lose_tracking();
            return Assessment::fail_closed();
        };

        if !features.is_evaluable() {
            let event = self.skip_frame(now);
            return Assessment::new(Verdict::fail_closed(), event);
        }

        match self {
            FormEvaluator::Squat(e) => e.evaluate(features, profile, now),
            FormEvaluator::PushUp(e) => e.evaluate(features, profile, now),
            FormEvaluator::Plank(e) => e.evaluate(features, profile, now),
            FormEvaluator::DeadBug(e) => e.evaluate(features, profile, now),
            FormEvaluator::WallSit(e) => e.evaluate(features, profile, now),
        }
    }

    /// A frame with too little of the body visible. Holds count it as a
    /// failed frame; the only possible event closes the previous second.
    fn skip_frame(&mut self, now: SessionTime) -> Option<FormEvent> {
        match self {
            FormEvaluator::Squat(e) => e.reps.taint(),
            FormEvaluator::PushUp(e) => e.reps.taint(),
            FormEvaluator::DeadBug(e) => e.skip_frame(),
            FormEvaluator::Plank(e) => return e.hold.record(false, now),
            FormEvaluator::WallSit(e) => return e.hold.record(false, now),
        }
        None
    }

    /// Holdover expired with no pose
    fn lose_tracking(&mut self) {
        match self {
            FormEvaluator::Squat(e) => e.reps.taint(),
            FormEvaluator::PushUp(e) => e.reps.taint(),
            FormEvaluator::DeadBug(e) => e.skip_frame(),
            FormEvaluator::Plank(e) => e.hold.lose_tracking(),
            FormEvaluator::WallSit(e) => e.hold.lose_tracking(),
        }
    }

    pub fn tally(&self) -> Tally {
        let reps = match self {
            FormEvaluator::Squat(e) => Some(&e.reps),
            FormEvaluator::PushUp(e) => Some(&e.reps),
            FormEvaluator::DeadBug(e) => Some(&e.reps),
            FormEvaluator::Plank(_) | FormEvaluator::WallSit(_) => None,
        };
        let hold = match self {
            FormEvaluator::Plank(e) => Some(&e.hold),
            FormEvaluator::WallSit(e) => Some(&e.hold),
            _ => None,
        };

        Tally {
            reps: reps.map_or(0, |r| r.count()),
            correct_reps: reps.map_or(0, |r| r.correct_count()),
            hold_seconds: hold.map_or(0, |h| h.seconds()),
            current_streak: hold.map_or(0, |h| h.current_streak()),
            best_streak: hold.map_or(0, |h| h.best_streak()),
        }
    }
}

/// `value <= max`, failing when unknown
pub(crate) fn at_most(value: Option<f32>, max: f32) -> bool {
    value.is_some_and(|v| v <= max)
}

/// `value <= max`, passing when unknown
pub(crate) fn at_most_or_pass(value: Option<f32>, max: f32) -> bool {
    value.map_or(true, |v| v <= max)
}

/// First failed check's cue, in priority order; empty when all pass
pub(crate) fn first_cue<'a>(checks: impl IntoIterator<Item = (bool, &'a str)>) -> &'a str {
    checks
        .into_iter()
        .find(|(failed, _)| *failed)
        .map_or("", |(_, cue)| cue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymbuddy_core::{Landmark, Pose};

    #[test]
    fn test_dispatch_matches_profile() {
        for kind in ExerciseKind::all() {
            let evaluator = FormEvaluator::new(&ThresholdProfile::defaults(*kind));
            assert_eq!(evaluator.exercise(), *kind);
        }
    }

    #[test]
    fn test_too_few_keypoints_fails_closed() {
        let pose = Pose::new().with(Landmark::RightHip, 100.0, 100.0, 0.9);
        let features = FeatureSet::from_pose(&pose, 0.4);

        for kind in ExerciseKind::all() {
            let profile = ThresholdProfile::defaults(*kind);
            let mut evaluator = FormEvaluator::new(&profile);
            for ms in (0..3000).step_by(300) {
                let out = evaluator.step(Some(&features), &profile, SessionTime::from_millis(ms));
                assert!(!out.verdict.form_correct);
                assert!(out.event.is_none());
            }
        }
    }

    fn plank_features() -> FeatureSet {
        let pose = Pose::new()
            .with(Landmark::RightEar, 60.0, 300.0, 0.9)
            .with(Landmark::RightShoulder, 100.0, 300.0, 0.9)
            .with(Landmark::RightElbow, 100.0, 350.0, 0.9)
            .with(Landmark::RightWrist, 110.0, 350.0, 0.9)
            .with(Landmark::RightHip, 250.0, 300.0, 0.9)
            .with(Landmark::RightKnee, 350.0, 300.0, 0.9)
            .with(Landmark::RightAnkle, 450.0, 300.0, 0.9);
        FeatureSet::from_pose(&pose, 0.4)
    }

    fn wallsit_features() -> FeatureSet {
        let pose = Pose::new()
            .with(Landmark::RightShoulder, 100.0, 200.0, 0.9)
            .with(Landmark::RightHip, 100.0, 350.0, 0.9)
            .with(Landmark::RightKnee, 250.0, 350.0, 0.9)
            .with(Landmark::RightAnkle, 250.0, 500.0, 0.9);
        FeatureSet::from_pose(&pose, 0.4)
    }

    #[test]
    fn test_sparse_frames_count_against_hold_second() {
        let sparse = FeatureSet::from_pose(&Pose::new().with(Landmark::RightHip, 100.0, 100.0, 0.9), 0.4);

        for (kind, good) in [
            (ExerciseKind::Plank, plank_features()),
            (ExerciseKind::WallSit, wallsit_features()),
        ] {
            let profile = ThresholdProfile::defaults(kind);
            let mut evaluator = FormEvaluator::new(&profile);
            let t = SessionTime::from_millis;

            // One judged frame, four out of view: 1 of 5 is below the green fraction
            assert!(evaluator.step(Some(&good), &profile, t(0)).verdict.form_correct);
            for ms in [200, 400, 600, 800] {
                let out = evaluator.step(Some(&sparse), &profile, t(ms));
                assert!(!out.verdict.form_correct);
                assert!(out.event.is_none());
            }
            let out = evaluator.step(Some(&good), &profile, t(1000));

            assert!(out.event.is_none());
            assert_eq!(evaluator.tally().hold_seconds, 0);
        }
    }

    #[test]
    fn test_sparse_frame_closes_credited_second() {
        let sparse = FeatureSet::from_pose(&Pose::new().with(Landmark::RightHip, 100.0, 100.0, 0.9), 0.4);
        let good = plank_features();
        let profile = ThresholdProfile::defaults(ExerciseKind::Plank);
        let mut evaluator = FormEvaluator::new(&profile);

        for ms in [0, 300, 600, 900] {
            evaluator.step(Some(&good), &profile, SessionTime::from_millis(ms));
        }
        let out = evaluator.step(Some(&sparse), &profile, SessionTime::from_millis(1200));

        assert!(!out.verdict.form_correct);
        assert_eq!(out.event.map(|e| e.index), Some(1));
        assert_eq!(evaluator.tally().hold_seconds, 1);
    }

    #[test]
    fn test_no_pose_fails_closed() {
        let profile = ThresholdProfile::defaults(ExerciseKind::Plank);
        let mut evaluator = FormEvaluator::new(&profile);

        let out = evaluator.step(None, &profile, SessionTime::ZERO);
        assert_eq!(out, Assessment::fail_closed());
        assert_eq!(evaluator.tally(), Tally::default());
    }

    #[test]
    fn test_first_cue() {
        assert_eq!(first_cue([(false, "a"), (true, "b"), (true, "c")]), "b");
        assert_eq!(first_cue([(false, "a"), (false, "b")]), "");
    }
}
