//! Pose - scored 2-D keypoints for one instant
//!
//! Produced by the external pose estimator and never mutated by the engine.
//! Coordinates are in image pixels with y growing downward.

use serde::{Deserialize, Serialize};

use crate::{Landmark, SessionTime};

/// 2-D position (image pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Keypoint (position + estimator confidence in [0, 1])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub position: Point2,
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            score,
        }
    }
}

/// Complete single-person pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Keypoints indexed by `Landmark`; `None` when the estimator omitted it
    keypoints: Vec<Option<Keypoint>>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new()
    }
}

impl Pose {
    /// Create an empty pose
    pub fn new() -> Self {
        Self {
            keypoints: vec![None; Landmark::COUNT],
        }
    }

    /// Build from estimator output given as `(name, x, y, score)`.
    /// Unknown names are ignored.
    pub fn from_named<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32, f32, f32)>,
    {
        let mut pose = Pose::new();
        for (name, x, y, score) in points {
            if let Some(landmark) = Landmark::from_name(name) {
                pose.set(landmark, Keypoint::new(x, y, score));
            }
        }
        pose
    }

    /// Builder-style keypoint insert
    pub fn with(mut self, landmark: Landmark, x: f32, y: f32, score: f32) -> Self {
        self.set(landmark, Keypoint::new(x, y, score));
        self
    }

    /// Set keypoint
    pub fn set(&mut self, landmark: Landmark, keypoint: Keypoint) {
        if let Some(slot) = self.keypoints.get_mut(landmark.index()) {
            *slot = Some(keypoint);
        }
    }

    /// Get keypoint regardless of score
    pub fn keypoint(&self, landmark: Landmark) -> Option<&Keypoint> {
        self.keypoints.get(landmark.index()).and_then(|k| k.as_ref())
    }

    /// Iterate present keypoints
    pub fn iter(&self) -> impl Iterator<Item = (Landmark, &Keypoint)> {
        self.keypoints
            .iter()
            .enumerate()
            .filter_map(|(i, k)| Some((Landmark::from_index(i)?, k.as_ref()?)))
    }

    /// Number of present keypoints
    pub fn len(&self) -> usize {
        self.keypoints.iter().filter(|k| k.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest keypoint score, 0 for an empty pose
    pub fn max_score(&self) -> f32 {
        self.iter().map(|(_, k)| k.score).fold(0.0, f32::max)
    }

    /// A weak pose has no keypoint scoring at or above `threshold`
    pub fn is_weak(&self, threshold: f32) -> bool {
        self.max_score() < threshold
    }
}

/// Pose sample - one cycle's estimator output
#[derive(Debug, Clone)]
pub struct PoseSample {
    /// The pose, or `None` for a dropped detection
    pub pose: Option<Pose>,
    /// When the sample was taken
    pub at: SessionTime,
}

impl PoseSample {
    pub fn new(pose: Option<Pose>, at: SessionTime) -> Self {
        Self { pose, at }
    }

    pub fn present(pose: Pose, at: SessionTime) -> Self {
        Self {
            pose: Some(pose),
            at,
        }
    }

    pub fn missing(at: SessionTime) -> Self {
        Self { pose: None, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_named_ignores_unknown() {
        let pose = Pose::from_named([
            ("left_hip", 10.0, 20.0, 0.9),
            ("tail", 0.0, 0.0, 1.0),
            ("right_knee", 12.0, 40.0, 0.8),
        ]);

        assert_eq!(pose.len(), 2);
        assert!(pose.keypoint(Landmark::LeftHip).is_some());
        assert!(pose.keypoint(Landmark::RightKnee).is_some());
    }

    #[test]
    fn test_weak_pose() {
        let pose = Pose::new()
            .with(Landmark::Nose, 0.0, 0.0, 0.3)
            .with(Landmark::LeftHip, 0.0, 0.0, 0.5);

        assert!(pose.is_weak(0.6));
        assert!(!pose.is_weak(0.5));
        assert!(Pose::new().is_weak(0.1));
    }

    #[test]
    fn test_point_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_pose_json_shape() {
        let pose = Pose::new().with(Landmark::Nose, 1.0, 2.0, 0.9);
        let json = serde_json::to_string(&pose).unwrap();
        let back: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pose);
    }
}
