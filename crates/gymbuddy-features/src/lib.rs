//! GymBuddy Features - From raw keypoints to measurable posture
//!
//! Everything here is pure except the holdover buffer:
//! - `geometry`: angles, deviations, tilts and distances
//! - `body`: confidence-filtered, side-preferring landmark lookup
//! - `features`: the per-frame feature set every evaluator reads
//! - `smoothing`: named exponential moving averages
//! - `holdover`: bridges brief tracking dropouts with the last usable pose
//!
//! # Unknown values
//!
//! Missing keypoints never propagate as failures. Bounds that must fail
//! closed read `UNKNOWN_DEVIATION`; checks that degrade gracefully read an
//! `Option` and decide for themselves.

pub mod body;
pub mod features;
pub mod geometry;
pub mod holdover;
pub mod smoothing;

pub use body::*;
pub use features::*;
pub use geometry::*;
pub use holdover::*;
pub use smoothing::*;
