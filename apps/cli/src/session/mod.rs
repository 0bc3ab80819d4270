//! Per-mode session controllers.
//!
//! Each session keeps its state in a `watch` channel: operations write `Pending`,
//! await the gateway without holding the state, then write the settled outcome.
//! Presentations `subscribe()` for changes or take a `snapshot()`.

pub mod browser;
pub mod generator;
pub mod random;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{filter_catalog, BrowserState, FontBrowser, PreviewOutcome};
pub use generator::{GeneratorSession, GeneratorState};
pub use random::{RandomMode, RandomSession, RandomState};

use crate::errors::SessionError;
use crate::models::GenerationResult;

/// Request lifecycle of one session (or of one half of a session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Settled,
}

/// A user-facing message raised by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

/// Phase plus the last outcome of a generation-style request.
///
/// Shared by the explicit and random sessions so both settle the same way.
/// Concurrent requests are not coalesced: whichever settles last wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSlot {
    pub phase: Phase,
    pub last_result: Option<GenerationResult>,
    pub last_error: Option<SessionError>,
}

impl RequestSlot {
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
    }

    /// Records the outcome. A failure keeps the previous result on display.
    pub fn settle(&mut self, outcome: &Result<GenerationResult, SessionError>) {
        self.phase = Phase::Settled;
        match outcome {
            Ok(result) => {
                self.last_result = Some(result.clone());
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.clone()),
        }
    }
}

/// Rejects results that would leave the user without a font name to show.
pub(crate) fn checked(
    outcome: Result<GenerationResult, SessionError>,
) -> Result<GenerationResult, SessionError> {
    outcome.and_then(|result| result.validate().map_err(SessionError::MalformedResponse))
}
