//! Threshold profile - per-exercise numeric configuration
//!
//! A profile is built once from a flat key→number map and stays immutable
//! for the life of an exercise. Keys use camelCase (`lineDevMax`). A key
//! prefixed with the exercise id (`plankLineDevMax`) overrides the generic
//! key for that exercise only. Unrecognised keys are ignored and missing
//! keys take their defaults. Values are not range checked.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gymbuddy_core::{CoachError, CoachResult, ExerciseKind};

/// How strictly plank and push-up checks combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leniency {
    /// Every check must pass
    Strict,
    /// Horizontality may stand in for weaker checks (live camera)
    #[default]
    Live,
    /// Loosest combination, for reference clips
    Reference,
}

impl Leniency {
    /// 0 = strict, 2 = reference, anything else = live
    pub fn from_flag(flag: f64) -> Self {
        match flag.round() as i64 {
            0 => Leniency::Strict,
            2 => Leniency::Reference,
            _ => Leniency::Live,
        }
    }
}

/// What a failed hold second does to the visible streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldBreakPolicy {
    /// Close the streak into the best streak and start again from zero
    ResetStreak,
    /// Leave the streak as it is
    KeepStreak,
}

/// Per-exercise thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdProfile {
    pub exercise: ExerciseKind,

    // Pipeline
    pub min_kp_score: f32,
    pub weak_pose_score: f32,
    pub holdover: Duration,
    pub cue_hold: Duration,
    pub hold_second_green_frac: f32,
    pub good_frames_to_green: u32,
    pub bad_frames_to_red: u32,
    pub leniency: Leniency,
    pub hold_break: HoldBreakPolicy,

    // Repetitions
    pub min_rep: Duration,
    pub rep_down_frac: f32,
    pub rep_top_frac: f32,

    // Squat
    pub squat_torso_change_max: f32,
    pub squat_baseline_alpha: f32,

    // Plank and push-up
    pub line_dev_max: f32,
    pub neck_max: f32,
    pub plank_horizontal_max_deg: f32,
    pub plank_min_shoulder_ankle_dx_px: f32,
    pub support_under_shoulder_px: f32,
    pub pushup_horizontal_max_deg: f32,
    pub pushup_support_under_shoulder_px: f32,
    pub pushup_depth_elbow_max: f32,
    pub pushup_top_elbow_min: f32,

    // Dead-bug
    pub deadbug_back_contact_max_px: f32,
    pub deadbug_limb_speed_max_px: f32,
    pub deadbug_reach_frac: f32,
    pub deadbug_return_frac: f32,

    // Wall-sit
    pub wallsit_knee_min: f32,
    pub wallsit_knee_max: f32,
    pub wallsit_shin_tilt_max: f32,
    pub wallsit_back_tilt_max: f32,
}

/// Key lookup honoring per-exercise overrides
struct Lookup<'a> {
    exercise: ExerciseKind,
    map: &'a HashMap<String, f64>,
}

/// `lineDevMax` → `plankLineDevMax`
pub fn scoped_key(exercise: ExerciseKind, key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", exercise.id(), first.to_ascii_uppercase(), chars.as_str()),
        None => exercise.id().to_string(),
    }
}

impl Lookup<'_> {
    fn num(&self, key: &str, default: f64) -> f64 {
        self.map
            .get(&scoped_key(self.exercise, key))
            .or_else(|| self.map.get(key))
            .copied()
            .unwrap_or(default)
    }

    fn f32(&self, key: &str, default: f64) -> f32 {
        self.num(key, default) as f32
    }

    fn count(&self, key: &str, default: f64) -> u32 {
        self.num(key, default).max(0.0).round() as u32
    }

    fn millis(&self, key: &str, default: f64) -> Duration {
        Duration::from_millis(self.num(key, default).max(0.0).round() as u64)
    }

    fn flag(&self, key: &str, default: f64) -> bool {
        self.num(key, default) != 0.0
    }
}

impl ThresholdProfile {
    /// Profile with every key at its default
    pub fn defaults(exercise: ExerciseKind) -> Self {
        Self::from_map(exercise, &HashMap::new())
    }

    /// Build from a flat key→number map
    pub fn from_map(exercise: ExerciseKind, map: &HashMap<String, f64>) -> Self {
        let k = Lookup {
            exercise,
            map,
        };

        let hold_break_resets = match exercise {
            ExerciseKind::WallSit => k.flag("wallsitHoldBreakResets", 0.0),
            _ => k.flag("plankHoldBreakResets", 1.0),
        };

        ThresholdProfile {
            exercise,
            min_kp_score: k.f32("minKPScore", 0.4),
            weak_pose_score: k.f32("weakPoseScore", 0.6),
            holdover: k.millis("holdoverMs", 1200.0),
            cue_hold: k.millis("cueHoldMs", 800.0),
            hold_second_green_frac: k.f32("holdSecondGreenFrac", 0.6),
            good_frames_to_green: k.count("goodFramesToGreen", 2.0),
            bad_frames_to_red: k.count("badFramesToRed", 6.0),
            leniency: Leniency::from_flag(k.num("leniency", 1.0)),
            hold_break: if hold_break_resets {
                HoldBreakPolicy::ResetStreak
            } else {
                HoldBreakPolicy::KeepStreak
            },
            min_rep: k.millis("minRepMs", 800.0),
            rep_down_frac: k.f32("repDownFrac", 0.06),
            rep_top_frac: k.f32("repTopFrac", 0.03),
            squat_torso_change_max: k.f32("squatTorsoChangeMax", 30.0),
            squat_baseline_alpha: k.f32("squatBaselineAlpha", 0.015),
            line_dev_max: k.f32("lineDevMax", 14.0),
            neck_max: k.f32("neckMax", 28.0),
            plank_horizontal_max_deg: k.f32("plankHorizontalMaxDeg", 20.0),
            plank_min_shoulder_ankle_dx_px: k.f32("plankMinShoulderAnkleDxPx", 120.0),
            support_under_shoulder_px: k.f32("supportUnderShoulderPx", 60.0),
            pushup_horizontal_max_deg: k.f32("pushupHorizontalMaxDeg", 25.0),
            pushup_support_under_shoulder_px: k.f32("pushupSupportUnderShoulderPx", 60.0),
            pushup_depth_elbow_max: k.f32("pushupDepthElbowMax", 110.0),
            pushup_top_elbow_min: k.f32("pushupTopElbowMin", 150.0),
            deadbug_back_contact_max_px: k.f32("deadbugBackContactMaxPx", 55.0),
            deadbug_limb_speed_max_px: k.f32("deadbugLimbSpeedMaxPx", 14.0),
            deadbug_reach_frac: k.f32("deadbugReachFrac", 0.25),
            deadbug_return_frac: k.f32("deadbugReturnFrac", 0.10),
            wallsit_knee_min: k.f32("wallsitKneeMin", 75.0),
            wallsit_knee_max: k.f32("wallsitKneeMax", 115.0),
            wallsit_shin_tilt_max: k.f32("wallsitShinTiltMax", 14.0),
            wallsit_back_tilt_max: k.f32("wallsitBackTiltMax", 14.0),
        }
    }

    /// Build from a JSON object of numbers. Non-numeric members are ignored.
    pub fn from_json_str(exercise: ExerciseKind, json: &str) -> CoachResult<Self> {
        let map = parse_threshold_map(json)?;
        Ok(Self::from_map(exercise, &map))
    }
}

/// Parse a JSON object into a threshold map, keeping numeric members only
pub fn parse_threshold_map(json: &str) -> CoachResult<HashMap<String, f64>> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| CoachError::InvalidConfig(e.to_string()))?;

    let serde_json::Value::Object(members) = value else {
        return Err(CoachError::InvalidConfig(
            "threshold map must be a JSON object".into(),
        ));
    };

    Ok(members
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|n| (key, n)))
        .collect())
}
