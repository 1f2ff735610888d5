//! Body landmarks
//!
//! The 33-point BlazePose topology. Indices match the order in which the
//! estimator emits keypoints, so a pose can be stored as a dense array.

use serde::{Deserialize, Serialize};

/// Named body landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Landmark {
    // Head
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,

    // Upper body
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,

    // Lower body
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    /// Number of landmarks
    pub const COUNT: usize = 33;

    /// All landmarks in index order
    pub fn all() -> &'static [Landmark] {
        use Landmark::*;
        &[
            Nose,
            LeftEyeInner,
            LeftEye,
            LeftEyeOuter,
            RightEyeInner,
            RightEye,
            RightEyeOuter,
            LeftEar,
            RightEar,
            MouthLeft,
            MouthRight,
            LeftShoulder,
            RightShoulder,
            LeftElbow,
            RightElbow,
            LeftWrist,
            RightWrist,
            LeftPinky,
            RightPinky,
            LeftIndex,
            RightIndex,
            LeftThumb,
            RightThumb,
            LeftHip,
            RightHip,
            LeftKnee,
            RightKnee,
            LeftAnkle,
            RightAnkle,
            LeftHeel,
            RightHeel,
            LeftFootIndex,
            RightFootIndex,
        ]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Estimator name, e.g. `left_knee`
    pub fn name(self) -> &'static str {
        use Landmark::*;
        match self {
            Nose => "nose",
            LeftEyeInner => "left_eye_inner",
            LeftEye => "left_eye",
            LeftEyeOuter => "left_eye_outer",
            RightEyeInner => "right_eye_inner",
            RightEye => "right_eye",
            RightEyeOuter => "right_eye_outer",
            LeftEar => "left_ear",
            RightEar => "right_ear",
            MouthLeft => "mouth_left",
            MouthRight => "mouth_right",
            LeftShoulder => "left_shoulder",
            RightShoulder => "right_shoulder",
            LeftElbow => "left_elbow",
            RightElbow => "right_elbow",
            LeftWrist => "left_wrist",
            RightWrist => "right_wrist",
            LeftPinky => "left_pinky",
            RightPinky => "right_pinky",
            LeftIndex => "left_index",
            RightIndex => "right_index",
            LeftThumb => "left_thumb",
            RightThumb => "right_thumb",
            LeftHip => "left_hip",
            RightHip => "right_hip",
            LeftKnee => "left_knee",
            RightKnee => "right_knee",
            LeftAnkle => "left_ankle",
            RightAnkle => "right_ankle",
            LeftHeel => "left_heel",
            RightHeel => "right_heel",
            LeftFootIndex => "left_foot_index",
            RightFootIndex => "right_foot_index",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.name() == name)
    }
}

/// Body side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Side-less body part, resolved to a landmark on a chosen side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Ear,
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
    Heel,
    FootIndex,
}

impl BodyPart {
    pub fn on(self, side: Side) -> Landmark {
        use Landmark::*;
        match (self, side) {
            (BodyPart::Ear, Side::Left) => LeftEar,
            (BodyPart::Ear, Side::Right) => RightEar,
            (BodyPart::Shoulder, Side::Left) => LeftShoulder,
            (BodyPart::Shoulder, Side::Right) => RightShoulder,
            (BodyPart::Elbow, Side::Left) => LeftElbow,
            (BodyPart::Elbow, Side::Right) => RightElbow,
            (BodyPart::Wrist, Side::Left) => LeftWrist,
            (BodyPart::Wrist, Side::Right) => RightWrist,
            (BodyPart::Hip, Side::Left) => LeftHip,
            (BodyPart::Hip, Side::Right) => RightHip,
            (BodyPart::Knee, Side::Left) => LeftKnee,
            (BodyPart::Knee, Side::Right) => RightKnee,
            (BodyPart::Ankle, Side::Left) => LeftAnkle,
            (BodyPart::Ankle, Side::Right) => RightAnkle,
            (BodyPart::Heel, Side::Left) => LeftHeel,
            (BodyPart::Heel, Side::Right) => RightHeel,
            (BodyPart::FootIndex, Side::Left) => LeftFootIndex,
            (BodyPart::FootIndex, Side::Right) => RightFootIndex,
        }
    }
}
