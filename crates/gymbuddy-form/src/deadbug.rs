//! Dead-bug
//!
//! Lying on the back, the lower back must stay pressed down: shoulder and
//! hip share a column in a side view. A rep is one reach of the moving limb
//! away from the hip and back, measured against the tucked position.

use gymbuddy_core::{FormEvent, Point2, SessionTime, Verdict};
use gymbuddy_features::FeatureSet;

use crate::evaluator::first_cue;
use crate::{Assessment, RepCounter, RepRule, ThresholdProfile};

/// Tucked distances below this are too small to normalize against
const MIN_TUCKED_PX: f32 = 1.0;

/// Dead-bug evaluator state
#[derive(Debug, Clone)]
pub struct DeadBugEvaluator {
    /// Limb end on the previous judged frame
    last_limb: Option<Point2>,
    /// Smallest limb-to-hip distance seen while idle
    tucked: Option<f32>,
    pub(crate) reps: RepCounter,
}

impl DeadBugEvaluator {
    pub fn new(profile: &ThresholdProfile) -> Self {
        Self {
            last_limb: None,
            tucked: None,
            reps: RepCounter::new(RepRule {
                moved: profile.deadbug_reach_frac,
                depth: profile.deadbug_reach_frac,
                near_top: profile.deadbug_return_frac,
                min_rep: profile.min_rep,
            }),
        }
    }

    pub fn evaluate(
        &mut self,
        f: &FeatureSet,
        profile: &ThresholdProfile,
        now: SessionTime,
    ) -> Assessment {
        let back_ok = f.back_offset <= profile.deadbug_back_contact_max_px;

        let speed = match (self.last_limb, f.limb) {
            (Some(prev), Some(cur)) => prev.distance(&cur),
            _ => 0.0,
        };
        self.last_limb = f.limb;
        let slow = speed <= profile.deadbug_limb_speed_max_px;

        let cue = first_cue([(!back_ok, "Press lower back"), (!slow, "Slower reach")]);
        let verdict = Verdict::new(back_ok, cue);

        let event = match f.limb_reach {
            Some(distance) => self.track_reach(distance, back_ok && slow, now),
            None => {
                self.reps.taint();
                None
            }
        };

        Assessment::new(verdict, event)
    }

    fn track_reach(&mut self, distance: f32, frame_ok: bool, now: SessionTime) -> Option<FormEvent> {
        if self.reps.is_idle() {
            let tucked = self.tucked.map_or(distance, |t| t.min(distance));
            self.tucked = Some(tucked);
        }

        let tucked = self.tucked.filter(|t| *t >= MIN_TUCKED_PX)?;
        let reach = (distance - tucked) / tucked;
        self.reps.update(reach, frame_ok, now)
    }

    /// A frame that could not be judged breaks limb speed continuity
    pub(crate) fn skip_frame(&mut self) {
        self.last_limb = None;
        self.reps.taint();
    }

    pub fn reps(&self) -> &RepCounter {
        &self.reps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymbuddy_core::{ExerciseKind, Landmark, Pose};

    /// Lying on the back, wrist `reach` px from the hip
    fn lying(reach: f32, back_px: f32) -> FeatureSet {
        let pose = Pose::new()
            .with(Landmark::RightShoulder, 200.0 + back_px, 300.0, 0.9)
            .with(Landmark::RightHip, 200.0, 400.0, 0.9)
            .with(Landmark::RightKnee, 260.0, 340.0, 0.9)
            .with(Landmark::RightWrist, 200.0, 400.0 - reach, 0.9);
        FeatureSet::from_pose(&pose, 0.4)
    }

    #[test]
    fn test_back_contact() {
        let profile = ThresholdProfile::defaults(ExerciseKind::DeadBug);
        let mut evaluator = DeadBugEvaluator::new(&profile);

        let out = evaluator.evaluate(&lying(100.0, 10.0), &profile, SessionTime::ZERO);
        assert!(out.verdict.form_correct);
        assert_eq!(out.verdict.cue, "");

        let out = evaluator.evaluate(&lying(100.0, 80.0), &profile, SessionTime::from_millis(300));
        assert!(!out.verdict.form_correct);
        assert_eq!(out.verdict.cue, "Press lower back");
    }

    #[test]
    fn test_fast_limb_cued_but_not_failed() {
        let profile = ThresholdProfile::defaults(ExerciseKind::DeadBug);
        let mut evaluator = DeadBugEvaluator::new(&profile);

        evaluator.evaluate(&lying(100.0, 0.0), &profile, SessionTime::ZERO);
        let out = evaluator.evaluate(&lying(160.0, 0.0), &profile, SessionTime::from_millis(300));

        assert!(out.verdict.form_correct);
        assert_eq!(out.verdict.cue, "Slower reach");
    }

    #[test]
    fn test_slow_reach_counts_correct_rep() {
        let profile = ThresholdProfile::defaults(ExerciseKind::DeadBug);
        let mut evaluator = DeadBugEvaluator::new(&profile);

        let reaches = [100.0, 100.0, 110.0, 122.0, 134.0, 146.0, 140.0, 128.0, 116.0, 104.0];
        let events: Vec<_> = reaches
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                evaluator
                    .evaluate(&lying(*r, 0.0), &profile, SessionTime::from_millis(i as i64 * 300))
                    .event
            })
            .collect();

        assert_eq!(events.len(), 1);
        assert!(events[0].was_correct);
    }

    #[test]
    fn test_fast_reach_counts_incorrect_rep() {
        let profile = ThresholdProfile::defaults(ExerciseKind::DeadBug);
        let mut evaluator = DeadBugEvaluator::new(&profile);

        let reaches = [100.0, 140.0, 140.0, 100.0];
        let events: Vec<_> = reaches
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                evaluator
                    .evaluate(&lying(*r, 0.0), &profile, SessionTime::from_millis(i as i64 * 300))
                    .event
            })
            .collect();

        assert_eq!(events.len(), 1);
        assert!(!events[0].was_correct);
    }
}
