//! Wall-sit

use gymbuddy_core::{SessionTime, Verdict};
use gymbuddy_features::FeatureSet;

use crate::evaluator::first_cue;
use crate::{Assessment, HoldAccumulator, ThresholdProfile};

/// Wall-sit evaluator state
#[derive(Debug, Clone)]
pub struct WallSitEvaluator {
    pub(crate) hold: HoldAccumulator,
}

impl WallSitEvaluator {
    pub fn new(profile: &ThresholdProfile) -> Self {
        Self {
            hold: HoldAccumulator::new(profile.hold_second_green_frac, profile.hold_break),
        }
    }

    pub fn evaluate(
        &mut self,
        f: &FeatureSet,
        profile: &ThresholdProfile,
        now: SessionTime,
    ) -> Assessment {
        // Missing knee reads as too open
        let knee = f.knee_angle.unwrap_or(180.0);
        let too_open = knee > profile.wallsit_knee_max;
        let too_closed = knee < profile.wallsit_knee_min;

        let shin_ok = f.shin_offset <= profile.wallsit_shin_tilt_max;
        let back_ok = f.back_offset <= profile.wallsit_back_tilt_max;

        let cue = first_cue([
            (too_open, "Slide down a little"),
            (too_closed, "Rise slightly"),
            (!shin_ok, "Feet under knees"),
            (!back_ok, "Back to wall"),
        ]);
        let correct = !too_open && !too_closed && shin_ok && back_ok;

        let event = self.hold.record(correct, now);
        Assessment::new(Verdict::new(correct, cue), event)
    }

    pub fn hold(&self) -> &HoldAccumulator {
        &self.hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymbuddy_core::{ExerciseKind, Landmark, Pose};

    /// Side view against a wall at x=100, thigh horizontal
    fn sitting(shin_dx: f32, back_dx: f32, knee_drop: f32) -> FeatureSet {
        let pose = Pose::new()
            .with(Landmark::RightShoulder, 100.0 + back_dx, 200.0, 0.9)
            .with(Landmark::RightHip, 100.0, 350.0, 0.9)
            .with(Landmark::RightKnee, 250.0, 350.0 + knee_drop, 0.9)
            .with(Landmark::RightAnkle, 250.0 + shin_dx, 500.0, 0.9);
        FeatureSet::from_pose(&pose, 0.4)
    }

    #[test]
    fn test_good_wallsit() {
        let profile = ThresholdProfile::defaults(ExerciseKind::WallSit);
        let mut evaluator = WallSitEvaluator::new(&profile);

        let out = evaluator.evaluate(&sitting(0.0, 0.0, 0.0), &profile, SessionTime::ZERO);
        assert!(out.verdict.form_correct);
        assert_eq!(out.verdict.cue, "");
    }

    #[test]
    fn test_cue_priority() {
        let profile = ThresholdProfile::defaults(ExerciseKind::WallSit);
        let mut evaluator = WallSitEvaluator::new(&profile);
        let t = SessionTime::ZERO;

        let out = evaluator.evaluate(&sitting(30.0, 30.0, 0.0), &profile, t);
        assert_eq!(out.verdict.cue, "Feet under knees");

        let out = evaluator.evaluate(&sitting(0.0, 30.0, 0.0), &profile, t);
        assert_eq!(out.verdict.cue, "Back to wall");

        // Hip above the knee opens the angle past the bound
        let out = evaluator.evaluate(&sitting(0.0, 0.0, 80.0), &profile, t);
        assert!(!out.verdict.form_correct);
        assert_eq!(out.verdict.cue, "Slide down a little");

        let out = evaluator.evaluate(&sitting(0.0, 0.0, -100.0), &profile, t);
        assert_eq!(out.verdict.cue, "Rise slightly");
    }

    #[test]
    fn test_missing_points_fail() {
        let pose = Pose::new()
            .with(Landmark::RightShoulder, 100.0, 200.0, 0.9)
            .with(Landmark::RightHip, 100.0, 350.0, 0.9);
        let profile = ThresholdProfile::defaults(ExerciseKind::WallSit);
        let mut evaluator = WallSitEvaluator::new(&profile);

        let out = evaluator.evaluate(&FeatureSet::from_pose(&pose, 0.4), &profile, SessionTime::ZERO);
        assert!(!out.verdict.form_correct);
    }
}
