//! Body view - confidence-filtered landmark lookup
//!
//! Keypoints scoring below the profile's cutoff are treated as absent.
//! Side-less lookups always try the right side first so that the same
//! limb is used from frame to frame; the left side is the fallback.

use gymbuddy_core::{BodyPart, Landmark, Point2, Pose, Side};

/// Landmarks that count toward the minimum-visibility rule
const CORE_PARTS: [BodyPart; 6] = [
    BodyPart::Hip,
    BodyPart::Knee,
    BodyPart::Ankle,
    BodyPart::Shoulder,
    BodyPart::Wrist,
    BodyPart::Ear,
];

/// Minimum number of resolvable core parts for a frame to be judged
pub const MIN_VISIBLE_PARTS: usize = 2;

/// Borrowed, filtered view of a pose
#[derive(Debug, Clone, Copy)]
pub struct BodyView<'a> {
    pose: &'a Pose,
    min_score: f32,
}

impl<'a> BodyView<'a> {
    pub fn new(pose: &'a Pose, min_score: f32) -> Self {
        Self { pose, min_score }
    }

    /// Position of a landmark if it clears the confidence cutoff
    pub fn point(&self, landmark: Landmark) -> Option<Point2> {
        self.pose
            .keypoint(landmark)
            .filter(|k| k.score >= self.min_score)
            .map(|k| k.position)
    }

    /// Right-first lookup of a side-less body part
    pub fn part(&self, part: BodyPart) -> Option<Point2> {
        self.point(part.on(Side::Right))
            .or_else(|| self.point(part.on(Side::Left)))
    }

    /// Every tracked instance of a body part, right side first
    pub fn both(&self, part: BodyPart) -> impl Iterator<Item = Point2> + '_ {
        [Side::Right, Side::Left]
            .into_iter()
            .filter_map(move |side| self.point(part.on(side)))
    }

    /// Number of core parts that resolve
    pub fn visible_parts(&self) -> usize {
        CORE_PARTS.iter().filter(|p| self.part(**p).is_some()).count()
    }

    /// Whether enough of the body is visible to say anything about form
    pub fn is_evaluable(&self) -> bool {
        self.visible_parts() >= MIN_VISIBLE_PARTS
    }
}
