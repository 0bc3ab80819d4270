//! Random generation.
//!
//! One action, two meanings: with custom text the backend picks only the font;
//! without it the backend picks everything.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::Gateway;
use crate::errors::SessionError;
use crate::models::{GenerationRequest, GenerationResult, Justify};
use crate::session::{checked, Notice, RequestSlot};

const RANDOM_WIDTH: u32 = 80;
const RANDOM_JUSTIFY: Justify = Justify::Center;

const RANDOM_FAILED: &str = "Failed to generate random ASCII art. Please try again.";

/// What the next `generate_random` call will ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomMode {
    /// The custom text, in a font of the backend's choosing.
    RandomFont,
    /// Text, font and layout all chosen by the backend.
    FullyRandom,
}

impl RandomMode {
    pub fn hint(&self) -> &'static str {
        match self {
            RandomMode::RandomFont => "Click generate to see your text in a random font",
            RandomMode::FullyRandom => "Click generate to get completely random ASCII art",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomState {
    pub custom_text: String,
    pub request: RequestSlot,
    pub notice: Option<Notice>,
}

impl RandomState {
    pub fn mode(&self) -> RandomMode {
        if self.custom_text.trim().is_empty() {
            RandomMode::FullyRandom
        } else {
            RandomMode::RandomFont
        }
    }
}

pub struct RandomSession {
    gateway: Arc<dyn Gateway>,
    state: watch::Sender<RandomState>,
}

impl RandomSession {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (state, _) = watch::channel(RandomState::default());
        Self { gateway, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<RandomState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RandomState {
        self.state.borrow().clone()
    }

    /// Hands the pending notice to the presentation and clears it.
    pub fn take_notice(&self) -> Option<Notice> {
        let mut taken = None;
        self.state.send_if_modified(|s| {
            taken = s.notice.take();
            taken.is_some()
        });
        taken
    }

    pub fn mode(&self) -> RandomMode {
        self.state.borrow().mode()
    }

    pub fn set_custom_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.custom_text = text);
    }

    /// Never picks a font locally: the backend decides and reports it as `font_used`.
    pub async fn generate_random(&self) -> Result<GenerationResult, SessionError> {
        let (mode, text) = {
            let s = self.state.borrow();
            (s.mode(), s.custom_text.clone())
        };

        self.state.send_modify(|s| s.request.begin());

        let outcome = match mode {
            RandomMode::RandomFont => {
                debug!("Requesting random font for custom text");
                let request = GenerationRequest::new(text)
                    .with_width(RANDOM_WIDTH)
                    .with_justify(RANDOM_JUSTIFY);
                self.gateway.generate(&request).await
            }
            RandomMode::FullyRandom => {
                debug!("Requesting fully random art");
                self.gateway.random().await
            }
        };
        let outcome = checked(outcome);

        self.state.send_modify(|s| {
            s.request.settle(&outcome);
            if outcome.is_err() {
                s.notice = Some(Notice::error(RANDOM_FAILED));
            }
        });

        match &outcome {
            Ok(result) => debug!("Backend chose font {}", result.font_used),
            Err(e) => warn!("Random generation failed: {e}"),
        }
        outcome
    }
}
