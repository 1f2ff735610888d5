//! Synthetic pose generation
//!
//! Simulates:
//! - Side-view skeletons for every exercise, driven by one or two knobs
//! - Keypoint jitter and confidence spread
//! - Dropped frames (no person detected)
//!
//! All randomness comes from a seeded `StdRng` so runs are reproducible.

use gymbuddy_core::{Keypoint, Landmark, Pose, PoseSample, SessionTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Keypoint score given to every synthetic landmark before noise
pub const CLEAN_SCORE: f32 = 0.9;

fn skeleton(points: &[(Landmark, f32, f32)]) -> Pose {
    points
        .iter()
        .fold(Pose::new(), |pose, (landmark, x, y)| {
            pose.with(*landmark, *x, *y, CLEAN_SCORE)
        })
}

/// Standing or squatting, facing right. `center_y` is the mean height of
/// shoulder, hip and knee; `torso_lean_deg` tips the shoulder forward.
pub fn squat_pose(center_y: f32, torso_lean_deg: f32) -> Pose {
    let hip = (300.0, center_y);
    let shoulder_dx = 120.0 * torso_lean_deg.to_radians().tan();

    skeleton(&[
        (Landmark::RightEar, hip.0 + shoulder_dx, center_y - 150.0),
        (Landmark::RightShoulder, hip.0 + shoulder_dx, center_y - 120.0),
        (Landmark::RightHip, hip.0, hip.1),
        (Landmark::RightKnee, hip.0 + 20.0, center_y + 120.0),
        (Landmark::RightAnkle, hip.0, center_y + 240.0),
        (Landmark::RightWrist, hip.0 + shoulder_dx + 40.0, center_y - 40.0),
    ])
}

/// Forearm plank facing left. Positive `hip_offset_px` sags the hips.
pub fn plank_pose(hip_offset_px: f32) -> Pose {
    skeleton(&[
        (Landmark::RightEar, 60.0, 300.0),
        (Landmark::RightShoulder, 100.0, 300.0),
        (Landmark::RightElbow, 100.0, 350.0),
        (Landmark::RightWrist, 110.0, 350.0),
        (Landmark::RightHip, 250.0, 300.0 + hip_offset_px),
        (Landmark::RightKnee, 350.0, 300.0),
        (Landmark::RightAnkle, 450.0, 300.0),
    ])
}

/// Push-up facing left with the given elbow angle
pub fn pushup_pose(elbow_deg: f32) -> Pose {
    let shoulder = (100.0, 300.0);
    let elbow = (shoulder.0, shoulder.1 + 60.0);
    let bend = (180.0 - elbow_deg).to_radians();
    let wrist = (elbow.0 + 60.0 * bend.sin(), elbow.1 + 60.0 * bend.cos());

    skeleton(&[
        (Landmark::RightEar, 60.0, 300.0),
        (Landmark::RightShoulder, shoulder.0, shoulder.1),
        (Landmark::RightElbow, elbow.0, elbow.1),
        (Landmark::RightWrist, wrist.0, wrist.1),
        (Landmark::RightHip, 250.0, 305.0),
        (Landmark::RightKnee, 350.0, 310.0),
        (Landmark::RightAnkle, 450.0, 315.0),
    ])
}

/// Dead-bug on the back, wrist `reach_px` from the hip, shoulder
/// `back_px` off the hip's column
pub fn deadbug_pose(reach_px: f32, back_px: f32) -> Pose {
    skeleton(&[
        (Landmark::RightShoulder, 200.0 + back_px, 300.0),
        (Landmark::RightHip, 200.0, 400.0),
        (Landmark::RightKnee, 260.0, 340.0),
        (Landmark::RightWrist, 200.0, 400.0 - reach_px),
    ])
}

/// Wall-sit with the thigh level; offsets move the ankle and shoulder
pub fn wallsit_pose(shin_dx: f32, back_dx: f32) -> Pose {
    skeleton(&[
        (Landmark::RightShoulder, 100.0 + back_dx, 200.0),
        (Landmark::RightHip, 100.0, 350.0),
        (Landmark::RightKnee, 250.0, 350.0),
        (Landmark::RightAnkle, 250.0 + shin_dx, 500.0),
    ])
}

/// A single tracked hip: too little to judge
pub fn sparse_pose() -> Pose {
    skeleton(&[(Landmark::RightHip, 300.0, 300.0)])
}

/// Camera and estimator imperfections
#[derive(Clone, Debug)]
pub struct NoiseModel {
    /// Maximum positional jitter per axis (px)
    pub jitter_px: f32,
    /// Probability that a frame has no pose at all
    pub dropout_rate: f64,
    /// Confidence is drawn from this range
    pub score_range: (f32, f32),
}

impl NoiseModel {
    /// Perfect tracking
    pub fn none() -> Self {
        Self {
            jitter_px: 0.0,
            dropout_rate: 0.0,
            score_range: (CLEAN_SCORE, CLEAN_SCORE),
        }
    }

    /// Typical webcam
    pub fn camera() -> Self {
        Self {
            jitter_px: 1.5,
            dropout_rate: 0.05,
            score_range: (0.7, 0.95),
        }
    }

    /// Poor light, frequent dropouts
    pub fn flaky() -> Self {
        Self {
            jitter_px: 3.0,
            dropout_rate: 0.25,
            score_range: (0.5, 0.9),
        }
    }
}

/// Seeded pose perturbation
pub struct PoseGenerator {
    noise: NoiseModel,
    rng: StdRng,
}

impl PoseGenerator {
    pub fn new(seed: u64, noise: NoiseModel) -> Self {
        Self {
            noise,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply jitter and confidence spread, or drop the frame
    pub fn perturb(&mut self, pose: &Pose) -> Option<Pose> {
        if self.noise.dropout_rate > 0.0 && self.rng.gen_bool(self.noise.dropout_rate.min(1.0)) {
            return None;
        }

        let mut noisy = Pose::new();
        for (landmark, keypoint) in pose.iter() {
            let (dx, dy) = (self.jitter(), self.jitter());
            let score = self.score();
            noisy.set(
                landmark,
                Keypoint::new(keypoint.position.x + dx, keypoint.position.y + dy, score),
            );
        }
        Some(noisy)
    }

    /// A timestamped sample of `pose`
    pub fn sample(&mut self, pose: &Pose, at: SessionTime) -> PoseSample {
        PoseSample::new(self.perturb(pose), at)
    }

    fn jitter(&mut self) -> f32 {
        let j = self.noise.jitter_px;
        if j > 0.0 {
            self.rng.gen_range(-j..=j)
        } else {
            0.0
        }
    }

    fn score(&mut self) -> f32 {
        let (lo, hi) = self.noise.score_range;
        if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }
}
