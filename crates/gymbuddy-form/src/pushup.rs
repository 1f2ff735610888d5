//! Push-up
//!
//! Body checks follow the plank but measure along the shoulder to the
//! farthest tracked point, since feet often leave the frame. Repetitions
//! follow elbow flexion.

use gymbuddy_core::{SessionTime, Verdict};
use gymbuddy_features::FeatureSet;

use crate::evaluator::{at_most, at_most_or_pass, first_cue};
use crate::{Assessment, Leniency, RepCounter, RepRule, ThresholdProfile};

/// Outcome of each push-up check for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushUpChecks {
    pub line: bool,
    pub neck: bool,
    pub horizontal: bool,
    pub support: bool,
}

impl PushUpChecks {
    pub fn measure(f: &FeatureSet, profile: &ThresholdProfile) -> Self {
        Self {
            line: f.distal_line_deviation.abs() <= profile.line_dev_max,
            neck: f.neck_flexion <= profile.neck_max,
            horizontal: at_most(f.distal_level_tilt, profile.pushup_horizontal_max_deg),
            support: at_most_or_pass(f.wrist_offset, profile.pushup_support_under_shoulder_px),
        }
    }

    pub fn passes(&self, leniency: Leniency) -> bool {
        let Self {
            line,
            neck,
            horizontal,
            support,
        } = *self;

        match leniency {
            Leniency::Strict => line && neck && support && horizontal,
            Leniency::Live => (line || horizontal) && (support || horizontal) && (neck || horizontal),
            Leniency::Reference => line || horizontal || support,
        }
    }

    pub fn cue(&self) -> &'static str {
        first_cue([
            (!self.horizontal && !self.line, "Keep body level"),
            (!self.support, "Wrists under shoulders"),
            (!self.line, "Straight line head to heels"),
            (!self.neck, "Tuck chin slightly"),
        ])
    }
}

/// Push-up evaluator state
#[derive(Debug, Clone)]
pub struct PushUpEvaluator {
    pub(crate) reps: RepCounter,
}

impl PushUpEvaluator {
    pub fn new(profile: &ThresholdProfile) -> Self {
        // Signal is elbow flexion, 180 - elbow angle
        let top = 180.0 - profile.pushup_top_elbow_min;
        Self {
            reps: RepCounter::new(RepRule {
                moved: top,
                depth: 180.0 - profile.pushup_depth_elbow_max,
                near_top: top,
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
        let checks = PushUpChecks::measure(f, profile);
        let correct = checks.passes(profile.leniency);

        let event = match f.elbow_angle {
            Some(elbow) => self.reps.update(180.0 - elbow, correct, now),
            None => {
                self.reps.taint();
                None
            }
        };

        Assessment::new(Verdict::new(correct, checks.cue()), event)
    }

    pub fn reps(&self) -> &RepCounter {
        &self.reps
    }
}
