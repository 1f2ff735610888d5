//! GymBuddy Runtime - Session lifecycle and the periodic evaluation loop
//!
//! - `session`: per-session state and the staged per-cycle pipeline
//! - `latch`: hysteresis on the displayed form status
//! - `cue`: dedupe and rate limit of spoken cues
//! - `driver`: tokio loop pulling poses and pushing cues
//! - `config`: runtime configuration (JSON, human-readable durations)
//! - `telemetry`: `tracing` subscriber setup

pub mod config;
pub mod cue;
pub mod driver;
pub mod latch;
pub mod session;
pub mod telemetry;

pub use config::*;
pub use cue::*;
pub use driver::*;
pub use latch::*;
pub use session::*;
pub use telemetry::*;
