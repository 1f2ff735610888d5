//! GymBuddy Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the form engine:
//! - Body landmarks and scored keypoints (Landmark, Keypoint, Pose)
//! - Session time (SessionTime)
//! - Exercise kinds, per-cycle verdicts and discrete events
//! - The error type surfaced at the session boundary

pub mod error;
pub mod event;
pub mod exercise;
pub mod landmark;
pub mod pose;
pub mod time;

pub use error::*;
pub use event::*;
pub use exercise::*;
pub use landmark::*;
pub use pose::*;
pub use time::*;
