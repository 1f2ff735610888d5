//! Feature set - every measurement an evaluator may consult for one frame
//!
//! Derived, never persisted. Fields that feed fail-closed bounds use
//! `UNKNOWN_DEVIATION` when inputs are missing; the rest stay optional.

use gymbuddy_core::{BodyPart, Point2, Pose};

use crate::{
    horizontal_offset, joint_angle, line_deviation, pixel_distance, tilt_from_horizontal,
    tilt_from_vertical, BodyView, UNKNOWN_DEVIATION,
};

/// Per-frame features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    // Resolved (right-first) points
    pub hip: Option<Point2>,
    pub knee: Option<Point2>,
    pub ankle: Option<Point2>,
    pub shoulder: Option<Point2>,
    pub elbow: Option<Point2>,
    pub wrist: Option<Point2>,
    pub ear: Option<Point2>,

    /// Core parts that cleared the confidence cutoff
    pub visible_parts: usize,

    /// Hip-knee-ankle angle
    pub knee_angle: Option<f32>,
    /// Shoulder-elbow-wrist angle
    pub elbow_angle: Option<f32>,
    /// Hip→shoulder tilt from vertical (degrees)
    pub torso_tilt: f32,
    /// Bend of the neck away from the torso line, 0 when unknown
    pub neck_flexion: f32,

    /// Signed hip offset from the shoulder–ankle line (approx. degrees)
    pub hip_line_deviation: f32,
    /// Body tilt from horizontal along shoulder–ankle
    pub body_level_tilt: Option<f32>,
    /// Horizontal shoulder–ankle span (px)
    pub shoulder_ankle_span: Option<f32>,

    /// Farthest tracked point along the body: ankle, else wrist, else knee
    pub distal: Option<Point2>,
    /// Signed hip offset from the shoulder–distal line
    pub distal_line_deviation: f32,
    /// Tilt from horizontal along shoulder–distal
    pub distal_level_tilt: Option<f32>,

    /// |wrist.x - shoulder.x| (px)
    pub wrist_offset: Option<f32>,
    /// |elbow.x - shoulder.x| (px)
    pub elbow_offset: Option<f32>,
    /// |hip.x - shoulder.x| (px), UNKNOWN_DEVIATION when unknown
    pub back_offset: f32,
    /// |knee.x - ankle.x| (px), UNKNOWN_DEVIATION when unknown
    pub shin_offset: f32,

    /// Moving limb end for dead-bug: wrist, else ankle, else knee
    pub limb: Option<Point2>,
    /// Limb end to hip distance (px)
    pub limb_reach: Option<f32>,

    /// Mean y of every tracked hip, knee and shoulder
    pub center_y: Option<f32>,
}

impl FeatureSet {
    /// Extract features from a pose with the given confidence cutoff
    pub fn from_pose(pose: &Pose, min_score: f32) -> Self {
        Self::extract(&BodyView::new(pose, min_score))
    }

    pub fn extract(view: &BodyView<'_>) -> Self {
        let hip = view.part(BodyPart::Hip);
        let knee = view.part(BodyPart::Knee);
        let ankle = view.part(BodyPart::Ankle);
        let shoulder = view.part(BodyPart::Shoulder);
        let elbow = view.part(BodyPart::Elbow);
        let wrist = view.part(BodyPart::Wrist);
        let ear = view.part(BodyPart::Ear);

        let distal = ankle.or(wrist).or(knee);
        let limb = wrist.or(ankle).or(knee);

        let neck_flexion = joint_angle(hip, shoulder, ear)
            .map(|a| 180.0 - a)
            .unwrap_or(0.0);

        let ys: Vec<f32> = [BodyPart::Hip, BodyPart::Knee, BodyPart::Shoulder]
            .into_iter()
            .flat_map(|part| view.both(part))
            .map(|p| p.y)
            .collect();
        let center_y = if ys.is_empty() {
            None
        } else {
            Some(ys.iter().sum::<f32>() / ys.len() as f32)
        };

        FeatureSet {
            hip,
            knee,
            ankle,
            shoulder,
            elbow,
            wrist,
            ear,
            visible_parts: view.visible_parts(),
            knee_angle: joint_angle(hip, knee, ankle),
            elbow_angle: joint_angle(shoulder, elbow, wrist),
            torso_tilt: tilt_from_vertical(hip, shoulder).unwrap_or(UNKNOWN_DEVIATION),
            neck_flexion,
            hip_line_deviation: line_deviation(shoulder, ankle, hip),
            body_level_tilt: tilt_from_horizontal(shoulder, ankle),
            shoulder_ankle_span: horizontal_offset(shoulder, ankle),
            distal,
            distal_line_deviation: line_deviation(shoulder, distal, hip),
            distal_level_tilt: tilt_from_horizontal(shoulder, distal),
            wrist_offset: horizontal_offset(wrist, shoulder),
            elbow_offset: horizontal_offset(elbow, shoulder),
            back_offset: horizontal_offset(hip, shoulder).unwrap_or(UNKNOWN_DEVIATION),
            shin_offset: horizontal_offset(knee, ankle).unwrap_or(UNKNOWN_DEVIATION),
            limb,
            limb_reach: pixel_distance(limb, hip),
            center_y,
        }
    }

    /// Whether enough of the body is visible to judge form
    pub fn is_evaluable(&self) -> bool {
        self.visible_parts >= crate::MIN_VISIBLE_PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymbuddy_core::Landmark;

    fn plank_pose() -> Pose {
        Pose::new()
            .with(Landmark::RightShoulder, 100.0, 300.0, 0.9)
            .with(Landmark::RightElbow, 100.0, 350.0, 0.9)
            .with(Landmark::RightWrist, 110.0, 400.0, 0.9)
            .with(Landmark::RightHip, 250.0, 300.0, 0.9)
            .with(Landmark::RightKnee, 350.0, 300.0, 0.9)
            .with(Landmark::RightAnkle, 450.0, 300.0, 0.9)
            .with(Landmark::RightEar, 60.0, 300.0, 0.9)
    }

    #[test]
    fn test_plank_features() {
        let f = FeatureSet::from_pose(&plank_pose(), 0.5);

        assert!(f.is_evaluable());
        assert!(f.hip_line_deviation.abs() < 0.01);
        assert!(f.neck_flexion < 0.01);
        assert!(f.body_level_tilt.unwrap() < 0.01);
        assert_eq!(f.shoulder_ankle_span, Some(350.0));
        assert_eq!(f.wrist_offset, Some(10.0));
        assert_eq!(f.distal, f.ankle);
        assert!((f.knee_angle.unwrap() - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_points_are_sentinel_safe() {
        let pose = Pose::new()
            .with(Landmark::RightHip, 0.0, 0.0, 0.9)
            .with(Landmark::RightKnee, 0.0, 50.0, 0.9);
        let f = FeatureSet::from_pose(&pose, 0.5);

        assert_eq!(f.hip_line_deviation, UNKNOWN_DEVIATION);
        assert_eq!(f.torso_tilt, UNKNOWN_DEVIATION);
        assert_eq!(f.back_offset, UNKNOWN_DEVIATION);
        assert_eq!(f.neck_flexion, 0.0);
        assert!(f.knee_angle.is_none());
        assert_eq!(f.center_y, Some(25.0));
    }

    #[test]
    fn test_distal_falls_back_to_wrist() {
        let pose = plank_pose().with(Landmark::RightAnkle, 450.0, 300.0, 0.1);
        let f = FeatureSet::from_pose(&pose, 0.5);

        assert!(f.ankle.is_none());
        assert_eq!(f.distal, f.wrist);
        assert_eq!(f.hip_line_deviation, UNKNOWN_DEVIATION);
        assert!(f.distal_line_deviation.abs() < UNKNOWN_DEVIATION);
    }

    #[test]
    fn test_center_uses_both_sides() {
        let pose = Pose::new()
            .with(Landmark::RightHip, 0.0, 100.0, 0.9)
            .with(Landmark::LeftHip, 0.0, 120.0, 0.9)
            .with(Landmark::RightShoulder, 0.0, 40.0, 0.9);
        let f = FeatureSet::from_pose(&pose, 0.5);

        assert!((f.center_y.unwrap() - 260.0 / 3.0).abs() < 1e-3);
    }
}
