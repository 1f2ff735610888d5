//! Squat
//!
//! Depth is judged relative to a personal standing baseline: the mean
//! height of hips, knees and shoulders. Displacement is how far that
//! center has dropped, as a fraction of the baseline. The baseline follows
//! slow drift while standing so that small camera moves are absorbed.

use gymbuddy_core::{SessionTime, Verdict};
use gymbuddy_features::{Ema, FeatureSet};

use crate::evaluator::first_cue;
use crate::{Assessment, RepCounter, RepRule, ThresholdProfile};

/// Squat evaluator state
#[derive(Debug, Clone)]
pub struct SquatEvaluator {
    /// Standing center height
    baseline: Ema,
    pub(crate) reps: RepCounter,
}

impl SquatEvaluator {
    pub fn new(profile: &ThresholdProfile) -> Self {
        Self {
            baseline: Ema::new(profile.squat_baseline_alpha),
            reps: RepCounter::new(RepRule {
                moved: profile.rep_down_frac,
                depth: profile.rep_down_frac,
                near_top: profile.rep_top_frac,
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
        let Some(center) = f.center_y else {
            self.reps.taint();
            return Assessment::fail_closed();
        };

        let base = match self.baseline.value() {
            Some(base) => base,
            None => {
                self.baseline.set(center);
                center
            }
        };
        let displacement = (center - base) / base.max(1.0);

        let deep = displacement >= profile.rep_down_frac;
        let torso_ok = f.torso_tilt <= profile.squat_torso_change_max;

        let cue = first_cue([(!deep, "Lower more"), (!torso_ok, "Chest tall")]);
        let verdict = Verdict::new(deep && torso_ok, cue);

        let event = self.reps.update(displacement, torso_ok, now);

        if self.reps.is_idle() && displacement < profile.rep_down_frac * 0.5 {
            self.baseline.update(center);
        }

        Assessment::new(verdict, event)
    }

    /// Current standing baseline, once the first frame has been seen
    pub fn baseline(&self) -> Option<f32> {
        self.baseline.value()
    }

    pub fn reps(&self) -> &RepCounter {
        &self.reps
    }
}
