//! Cycle driver - periodic evaluation loop
//!
//! One cycle is in flight at a time: the loop awaits the pose source
//! inside the cycle and skips interval ticks that pass meanwhile. Commands
//! go through the shared session from any task; a cycle whose session
//! generation changed while it was waiting for a pose is discarded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use gymbuddy_core::{
    CoachError, CoachResult, ExerciseKind, Pose, PoseSample, PoseSourceError, SessionTime,
};

use crate::{CycleOutput, RuntimeConfig, Session, SessionSummary};

/// Identifies the frame a pose is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Cycle number since the session started
    pub index: u64,
    pub at: SessionTime,
}

/// Supplies one pose estimate per cycle
pub trait PoseSource: Send {
    /// `Ok(None)` means no person was detected this frame
    fn next_pose(
        &mut self,
        frame: FrameTick,
    ) -> impl Future<Output = Result<Option<Pose>, PoseSourceError>> + Send;
}

/// Receives coaching cues to speak
pub trait SpeechSink: Send + Sync {
    /// Fire and forget. Replaces any utterance still playing.
    fn speak(&self, text: &str);
}

/// Handle to a running session
pub struct SessionHandle {
    session: Arc<Mutex<Session>>,
    task: Mutex<Option<JoinHandle<CoachResult<()>>>>,
}

impl SessionHandle {
    /// Start `exercise` and spawn its cycle loop on the current runtime
    pub fn spawn<S, K>(
        config: RuntimeConfig,
        exercise: ExerciseKind,
        source: S,
        sink: K,
    ) -> CoachResult<(Self, mpsc::UnboundedReceiver<CycleOutput>)>
    where
        S: PoseSource + 'static,
        K: SpeechSink + 'static,
    {
        config.validate()?;
        let period = config.cycle_period;

        let mut session = Session::new(config);
        session.start(exercise)?;
        let session = Arc::new(Mutex::new(session));

        let (outputs, rx) = mpsc::unbounded_channel();
        let driver = CycleDriver {
            session: session.clone(),
            source,
            sink,
            period,
            outputs,
        };
        let task = tokio::spawn(driver.run());

        Ok((
            Self {
                session,
                task: Mutex::new(Some(task)),
            },
            rx,
        ))
    }

    pub fn set_exercise(&self, exercise: ExerciseKind) -> CoachResult<()> {
        self.session.lock().set_exercise(exercise)
    }

    /// Stop the loop and the session. Safe to call more than once.
    pub fn stop(&self) -> Option<SessionSummary> {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.session.lock().stop()
    }

    /// Wait for the loop to end on its own, e.g. when the pose source
    /// becomes unavailable
    pub async fn join(&self) -> CoachResult<()> {
        let task = self.task.lock().take();
        match task {
            Some(task) => match task.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Ok(()),
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            },
            None => Ok(()),
        }
    }

    pub fn session(&self) -> Arc<Mutex<Session>> {
        self.session.clone()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

/// The loop itself
struct CycleDriver<S, K> {
    session: Arc<Mutex<Session>>,
    source: S,
    sink: K,
    period: Duration,
    outputs: mpsc::UnboundedSender<CycleOutput>,
}

impl<S: PoseSource, K: SpeechSink> CycleDriver<S, K> {
    async fn run(mut self) -> CoachResult<()> {
        let started = Instant::now();
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut index = 0u64;

        loop {
            interval.tick().await;

            let at = SessionTime::from_micros(started.elapsed().as_micros() as i64);
            let generation = {
                let session = self.session.lock();
                if !session.is_running() {
                    return Ok(());
                }
                session.generation()
            };

            let frame = FrameTick { index, at };
            index += 1;
            let pose = match self.fetch(frame).await {
                Ok(pose) => pose,
                Err(err) => {
                    tracing::error!(error = %err, "pose source lost; stopping session");
                    self.session.lock().stop();
                    return Err(err.into());
                }
            };

            let output = {
                let mut session = self.session.lock();
                if session.generation() != generation {
                    tracing::debug!(index = frame.index, "discarding stale cycle");
                    continue;
                }
                session.tick(PoseSample::new(pose, at))?
            };

            if let Some(text) = &output.speak {
                self.sink.speak(text);
            }
            // Nobody listening is fine
            let _ = self.outputs.send(output);
        }
    }

    /// Request a pose, bounded by one cycle period. Only an unavailable
    /// source is an error; everything else is "no pose".
    async fn fetch(&mut self, frame: FrameTick) -> Result<Option<Pose>, PoseSourceError> {
        match time::timeout(self.period, self.source.next_pose(frame)).await {
            Ok(Ok(pose)) => Ok(pose),
            Ok(Err(err)) if err.is_fatal() => Err(err),
            Ok(Err(err)) => {
                tracing::warn!(index = frame.index, error = %err, "pose estimation failed");
                Ok(None)
            }
            Err(_) => {
                tracing::warn!(index = frame.index, timeout = ?self.period, "pose source timed out");
                Ok(None)
            }
        }
    }
}
