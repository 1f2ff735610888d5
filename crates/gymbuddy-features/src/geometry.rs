//! Planar geometry on keypoints
//!
//! All angles are in degrees. Inputs are optional so that a missing
//! keypoint turns into a defined unknown result instead of a NaN.

use gymbuddy_core::Point2;

/// Sentinel for a deviation or offset that could not be measured.
/// Large enough that every `<= max` bound fails.
pub const UNKNOWN_DEVIATION: f32 = 9999.0;

/// Rays shorter than this are treated as degenerate
const MIN_RAY_LEN: f32 = 1e-4;

/// Angle at vertex `b` between rays `b→a` and `b→c`, in [0, 180].
///
/// `None` when a point is missing or a ray has zero length.
pub fn joint_angle(a: Option<Point2>, b: Option<Point2>, c: Option<Point2>) -> Option<f32> {
    let (a, b, c) = (a?, b?, c?);

    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < MIN_RAY_LEN || mag2 < MIN_RAY_LEN {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Signed offset of `h` from the line through `s` and `a`, in approximate
/// degrees (perpendicular offset as a fraction of |s-a|, times 90).
///
/// Positive when `h` lies below the line in image coordinates (a sagging
/// hip), negative above (a piked hip). `UNKNOWN_DEVIATION` when a point is
/// missing.
pub fn line_deviation(s: Option<Point2>, a: Option<Point2>, h: Option<Point2>) -> f32 {
    let (Some(s), Some(a), Some(h)) = (s, a, h) else {
        return UNKNOWN_DEVIATION;
    };

    let (vx, vy) = (a.x - s.x, a.y - s.y);
    let (hx, hy) = (h.x - s.x, h.y - s.y);
    let len = (vx * vx + vy * vy).sqrt().max(1.0);

    let mut signed_px = (vx * hy - vy * hx) / len;
    if vx < 0.0 {
        signed_px = -signed_px;
    }

    (signed_px / len * 90.0).clamp(-90.0, 90.0)
}

/// Angle of segment `a`–`b` away from vertical, in [0, 90].
/// Endpoint order does not matter.
pub fn tilt_from_vertical(a: Option<Point2>, b: Option<Point2>) -> Option<f32> {
    let (a, b) = (a?, b?);
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    Some(dx.atan2(dy).to_degrees())
}

/// Angle of segment `a`–`b` away from horizontal, in [0, 90]
pub fn tilt_from_horizontal(a: Option<Point2>, b: Option<Point2>) -> Option<f32> {
    let (a, b) = (a?, b?);
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    if dx <= 0.0 {
        return Some(90.0);
    }
    Some((dy / dx).atan().to_degrees())
}

/// Euclidean distance in pixels
pub fn pixel_distance(a: Option<Point2>, b: Option<Point2>) -> Option<f32> {
    Some(a?.distance(&b?))
}

/// Horizontal pixel offset |a.x - b.x|
pub fn horizontal_offset(a: Option<Point2>, b: Option<Point2>) -> Option<f32> {
    Some((a?.x - b?.x).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f32, y: f32) -> Option<Point2> {
        Some(Point2::new(x, y))
    }

    #[test]
    fn test_straight_joint() {
        let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0)).unwrap();
        assert!((angle - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_right_angle_joint() {
        let angle = joint_angle(p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)).unwrap();
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_joint_angle_missing_or_degenerate() {
        assert!(joint_angle(None, p(0.0, 0.0), p(1.0, 0.0)).is_none());
        assert!(joint_angle(p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_line_deviation_on_line_is_zero() {
        let dev = line_deviation(p(0.0, 100.0), p(400.0, 100.0), p(200.0, 100.0));
        assert!(dev.abs() < 1e-3);
    }

    #[test]
    fn test_line_deviation_sign_is_orientation_independent() {
        // Hip 40px below a horizontal body line, facing either way
        let facing_right = line_deviation(p(0.0, 100.0), p(400.0, 100.0), p(200.0, 140.0));
        let facing_left = line_deviation(p(400.0, 100.0), p(0.0, 100.0), p(200.0, 140.0));

        assert!(facing_right > 0.0);
        assert!((facing_right - facing_left).abs() < 1e-3);
        assert!((facing_right - 9.0).abs() < 1e-3);

        let piked = line_deviation(p(0.0, 100.0), p(400.0, 100.0), p(200.0, 60.0));
        assert!(piked < 0.0);
    }

    #[test]
    fn test_line_deviation_missing_fails_closed() {
        assert_eq!(line_deviation(None, p(1.0, 1.0), p(2.0, 2.0)), UNKNOWN_DEVIATION);
        assert_eq!(line_deviation(p(0.0, 0.0), p(1.0, 1.0), None), UNKNOWN_DEVIATION);
    }

    #[test]
    fn test_tilts() {
        // Upright segment, either endpoint order
        assert!(tilt_from_vertical(p(0.0, 0.0), p(0.0, 100.0)).unwrap() < 0.01);
        assert!(tilt_from_vertical(p(0.0, 100.0), p(0.0, 0.0)).unwrap() < 0.01);
        // 45 degree lean
        let lean = tilt_from_vertical(p(100.0, 0.0), p(0.0, 100.0)).unwrap();
        assert!((lean - 45.0).abs() < 0.01);
        // Lying flat
        let flat = tilt_from_vertical(p(0.0, 50.0), p(200.0, 50.0)).unwrap();
        assert!((flat - 90.0).abs() < 0.01);

        assert!(tilt_from_horizontal(p(0.0, 0.0), p(100.0, 0.0)).unwrap() < 0.01);
        assert_eq!(tilt_from_horizontal(p(0.0, 0.0), p(0.0, 50.0)), Some(90.0));
    }

    #[test]
    fn test_distances() {
        assert_eq!(pixel_distance(p(0.0, 0.0), p(3.0, 4.0)), Some(5.0));
        assert_eq!(horizontal_offset(p(10.0, 0.0), p(4.0, 99.0)), Some(6.0));
        assert_eq!(pixel_distance(None, p(3.0, 4.0)), None);
    }

    proptest! {
        #[test]
        fn prop_joint_angle_in_range(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
        ) {
            if let Some(angle) = joint_angle(p(ax, ay), p(bx, by), p(cx, cy)) {
                prop_assert!(angle.is_finite());
                prop_assert!((0.0..=180.0).contains(&angle));
            }
        }

        #[test]
        fn prop_line_deviation_bounded(
            sx in -500.0f32..500.0, sy in -500.0f32..500.0,
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            hx in -500.0f32..500.0, hy in -500.0f32..500.0,
        ) {
            let dev = line_deviation(p(sx, sy), p(ax, ay), p(hx, hy));
            prop_assert!(dev.is_finite());
            prop_assert!(dev.abs() <= 90.0);
        }
    }
}
