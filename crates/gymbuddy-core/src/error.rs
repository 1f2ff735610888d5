//! Error types for the form engine

use thiserror::Error;

/// Core GymBuddy errors
#[derive(Error, Debug)]
pub enum CoachError {
    // Pose source errors
    #[error("Pose source unavailable: {0}")]
    PoseSourceUnavailable(String),

    // Session errors
    #[error("Session not running")]
    SessionNotRunning,

    #[error("Session already running")]
    SessionAlreadyRunning,

    // Configuration errors
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for GymBuddy operations
pub type CoachResult<T> = Result<T, CoachError>;

/// Failure reported by a pose source for one request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoseSourceError {
    /// The request failed but the next one may succeed
    #[error("Pose estimation failed: {0}")]
    Transient(String),

    /// The source can no longer produce poses (e.g. camera permission denied)
    #[error("Pose source unavailable: {0}")]
    Unavailable(String),
}

impl PoseSourceError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, PoseSourceError::Unavailable(_))
    }
}

impl From<PoseSourceError> for CoachError {
    fn from(err: PoseSourceError) -> Self {
        match err {
            PoseSourceError::Transient(msg) | PoseSourceError::Unavailable(msg) => {
                CoachError::PoseSourceUnavailable(msg)
            }
        }
    }
}
