//! Scripted collaborators for driving the runtime end to end

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use gymbuddy_core::{Pose, PoseSourceError};
use gymbuddy_runtime::{FrameTick, PoseSource, SpeechSink};
use parking_lot::Mutex;

/// One scripted reply
#[derive(Clone, Debug)]
pub enum ScriptStep {
    Pose(Pose),
    NoPerson,
    Transient(String),
    Unavailable(String),
    /// Answer with the pose only after a delay
    Slow(Pose, Duration),
}

/// Pose source that replays a script, then reports no person
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
    requests: Arc<Mutex<Vec<FrameTick>>>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            requests: Arc::default(),
        }
    }

    /// The same pose `n` times
    pub fn repeat(pose: Pose, n: usize) -> Self {
        Self::new(std::iter::repeat(ScriptStep::Pose(pose)).take(n))
    }

    /// Frames requested so far, shared with the returned handle
    pub fn requests(&self) -> Arc<Mutex<Vec<FrameTick>>> {
        self.requests.clone()
    }
}

impl PoseSource for ScriptedSource {
    async fn next_pose(&mut self, frame: FrameTick) -> Result<Option<Pose>, PoseSourceError> {
        self.requests.lock().push(frame);

        match self.steps.pop_front() {
            Some(ScriptStep::Pose(pose)) => Ok(Some(pose)),
            Some(ScriptStep::NoPerson) | None => Ok(None),
            Some(ScriptStep::Transient(reason)) => Err(PoseSourceError::Transient(reason)),
            Some(ScriptStep::Unavailable(reason)) => Err(PoseSourceError::Unavailable(reason)),
            Some(ScriptStep::Slow(pose, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(Some(pose))
            }
        }
    }
}

/// Speech sink that records every utterance
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }
}

impl SpeechSink for RecordingSink {
    fn speak(&self, text: &str) {
        self.spoken.lock().push(text.to_string());
    }
}
