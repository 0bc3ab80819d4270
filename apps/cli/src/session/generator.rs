//! Explicit generation: the user picks text, font, width and justification.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::Gateway;
use crate::errors::SessionError;
use crate::models::{
    FontCatalog, FontName, GenerationRequest, GenerationResult, Justify, DEFAULT_WIDTH,
};
use crate::session::{checked, Notice, RequestSlot};

pub const DEFAULT_TEXT: &str = "Hello World";
pub const DEFAULT_FONT: &str = "standard";

const EMPTY_TEXT: &str = "Please enter some text to generate ASCII art.";
const FONTS_FAILED: &str = "Failed to load fonts. Please try again.";
const GENERATE_FAILED: &str = "Failed to generate ASCII art. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorState {
    pub text: String,
    pub font: FontName,
    pub width: u32,
    pub justify: Justify,
    /// Empty until `load_fonts` runs; a single default font if loading failed.
    pub fonts: FontCatalog,
    pub request: RequestSlot,
    pub notice: Option<Notice>,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font: FontName::from(DEFAULT_FONT),
            width: DEFAULT_WIDTH,
            justify: Justify::default(),
            fonts: FontCatalog::new(),
            request: RequestSlot::default(),
            notice: None,
        }
    }
}

pub struct GeneratorSession {
    gateway: Arc<dyn Gateway>,
    state: watch::Sender<GeneratorState>,
}

impl GeneratorSession {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (state, _) = watch::channel(GeneratorState::default());
        Self { gateway, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<GeneratorState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> GeneratorState {
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

    /// Fetches the catalog. On failure the session falls back to the default font
    /// so a font can still be chosen, and the error is returned for display.
    pub async fn load_fonts(&self) -> Result<FontCatalog, SessionError> {
        match self.gateway.list_fonts().await {
            Ok(list) => {
                debug!("Loaded {} fonts", list.fonts.len());
                let fonts = list.fonts;
                self.state.send_modify(|s| s.fonts = fonts.clone());
                Ok(fonts)
            }
            Err(e) => {
                warn!("Font catalog unavailable, using {DEFAULT_FONT}: {e}");
                self.state.send_modify(|s| {
                    s.fonts = vec![FontName::from(DEFAULT_FONT)];
                    s.notice = Some(Notice::error(FONTS_FAILED));
                });
                Err(e)
            }
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.text = text);
    }

    pub fn set_font(&self, font: FontName) {
        self.state.send_modify(|s| s.font = font);
    }

    pub fn set_width(&self, width: u32) {
        self.state.send_modify(|s| s.width = width);
    }

    pub fn set_justify(&self, justify: Justify) {
        self.state.send_modify(|s| s.justify = justify);
    }

    /// Selects the font the last result was rendered with, if there is one.
    pub fn adopt_font_used(&self) -> Option<FontName> {
        let font = self
            .state
            .borrow()
            .request
            .last_result
            .as_ref()
            .map(|r| r.font_used.clone())?;
        self.set_font(font.clone());
        Some(font)
    }

    /// Renders the current fields. Blank text is rejected without a request.
    ///
    /// Calls are independent: overlapping calls each send a request and the
    /// last one to settle is what the session keeps.
    pub async fn generate(&self) -> Result<GenerationResult, SessionError> {
        let request = {
            let s = self.state.borrow();
            if s.text.trim().is_empty() {
                None
            } else {
                Some(GenerationRequest {
                    text: s.text.clone(),
                    font: Some(s.font.clone()),
                    width: s.width,
                    justify: s.justify,
                })
            }
        };

        let Some(request) = request else {
            self.state
                .send_modify(|s| s.notice = Some(Notice::error(EMPTY_TEXT)));
            return Err(SessionError::Validation(EMPTY_TEXT.to_string()));
        };

        self.state.send_modify(|s| s.request.begin());
        debug!("Generating with font {:?}", request.font);

        let outcome = checked(self.gateway.generate(&request).await);

        self.state.send_modify(|s| {
            s.request.settle(&outcome);
            if outcome.is_err() {
                s.notice = Some(Notice::error(GENERATE_FAILED));
            }
        });

        match &outcome {
            Ok(result) => debug!("Generated with font {}", result.font_used),
            Err(e) => warn!("Generation failed: {e}"),
        }
        outcome
    }
}
