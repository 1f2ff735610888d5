//! GymBuddy Form - Per-exercise rules and event detection
//!
//! Turns a frame's feature set into a verdict and, at most once per frame,
//! a discrete event:
//! - `profile`: per-exercise thresholds, leniency and hold break policy
//! - `evaluator`: the tagged evaluator dispatching to one exercise
//! - `squat`, `pushup`, `plank`, `deadbug`, `wallsit`: the rules
//! - `reps`: repetition state machine shared by rep-based exercises
//! - `hold`: per-second hold accumulator shared by hold-based exercises
//!
//! Every frame that cannot be judged is incorrect. Each rule names the
//! most severe failed check as its cue, even when leniency lets the frame
//! pass; a frame with no failed check has an empty cue.

pub mod deadbug;
pub mod evaluator;
pub mod hold;
pub mod plank;
pub mod profile;
pub mod pushup;
pub mod reps;
pub mod squat;
pub mod wallsit;

pub use deadbug::*;
pub use evaluator::{Assessment, FormEvaluator, Tally};
pub use hold::*;
pub use plank::*;
pub use profile::*;
pub use pushup::*;
pub use reps::*;
pub use squat::*;
pub use wallsit::*;
