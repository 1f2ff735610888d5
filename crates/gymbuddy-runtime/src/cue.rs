//! Cue dispatcher - dedupe and rate limit of spoken coaching
//!
//! A cue is spoken when it first appears or changes. Repeating the same
//! text is suppressed until the hold time since it was last spoken has
//! passed. Whatever is emitted replaces any utterance still playing.

use std::time::Duration;

use gymbuddy_core::SessionTime;

/// Dispatcher state
#[derive(Debug, Clone)]
pub struct CueDispatcher {
    hold: Duration,
    /// Last spoken text and when
    last: Option<(String, SessionTime)>,
}

impl CueDispatcher {
    pub fn new(hold: Duration) -> Self {
        Self { hold, last: None }
    }

    /// Returns the text to speak now, if any
    pub fn dispatch(&mut self, text: &str, now: SessionTime) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        if let Some((last_text, spoken_at)) = &self.last {
            if last_text == text && now.since(*spoken_at) < self.hold {
                return None;
            }
        }

        self.last = Some((text.to_string(), now));
        Some(text.to_string())
    }

    /// Last spoken text
    pub fn last_spoken(&self) -> Option<&str> {
        self.last.as_ref().map(|(text, _)| text.as_str())
    }
}
