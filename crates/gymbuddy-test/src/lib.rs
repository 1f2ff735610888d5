//! GymBuddy Test Harness - Synthetic poses and end-to-end scenarios
//!
//! This crate provides:
//! - Synthetic side-view skeletons for every exercise
//! - Seeded keypoint noise and dropped frames
//! - Scripted pose sources and recording speech sinks
//! - End-to-end session scenarios

pub mod integration;
pub mod scripted;
pub mod synthetic;

pub use integration::*;
pub use scripted::*;
pub use synthetic::*;
