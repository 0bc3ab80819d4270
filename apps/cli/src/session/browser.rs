//! Catalog browsing with a live per-font preview.
//!
//! Only the most recent preview is kept. Every preview request carries a sequence
//! number; a response whose number is no longer current is dropped unseen, so a slow
//! answer for an earlier selection can never replace the preview of the current one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::Gateway;
use crate::errors::SessionError;
use crate::models::{FontCatalog, FontName, GenerationRequest, GenerationResult, Justify};
use crate::session::{checked, Notice, Phase};

pub const DEFAULT_PREVIEW_TEXT: &str = "Hello";

/// Layout used for every preview, regardless of any other session's settings.
const PREVIEW_WIDTH: u32 = 80;
const PREVIEW_JUSTIFY: Justify = Justify::Center;

const FONTS_FAILED: &str = "Failed to load fonts. Please try again.";
const EMPTY_PREVIEW_TEXT: &str = "Please enter some text to preview the font.";
const PREVIEW_FAILED: &str = "Failed to generate font preview. Please try again.";

/// Fonts whose name contains `term`, ignoring case, in catalog order.
pub fn filter_catalog(catalog: &[FontName], term: &str) -> FontCatalog {
    let needle = term.to_lowercase();
    catalog
        .iter()
        .filter(|font| font.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub fonts: FontCatalog,
    pub catalog_phase: Phase,
    pub search_term: String,
    /// Always `filter_catalog(&fonts, &search_term)`.
    pub filtered: FontCatalog,
    pub selected: Option<FontName>,
    pub preview_text: String,
    pub preview_phase: Phase,
    /// Preview of `selected`, once it has arrived.
    pub preview: Option<GenerationResult>,
    pub notice: Option<Notice>,
    preview_seq: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            fonts: FontCatalog::new(),
            catalog_phase: Phase::Idle,
            search_term: String::new(),
            filtered: FontCatalog::new(),
            selected: None,
            preview_text: DEFAULT_PREVIEW_TEXT.to_string(),
            preview_phase: Phase::Idle,
            preview: None,
            notice: None,
            preview_seq: 0,
        }
    }
}

impl BrowserState {
    fn refilter(&mut self) {
        self.filtered = filter_catalog(&self.fonts, &self.search_term);
    }
}

/// What became of a preview request.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    Shown(GenerationResult),
    /// Another font was selected before this one answered; nothing was displayed.
    Stale,
}

pub struct FontBrowser {
    gateway: Arc<dyn Gateway>,
    state: watch::Sender<BrowserState>,
}

impl FontBrowser {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (state, _) = watch::channel(BrowserState::default());
        Self { gateway, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BrowserState {
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

    pub fn filtered(&self) -> FontCatalog {
        self.state.borrow().filtered.clone()
    }

    /// Fetches the catalog. On failure the catalog stays empty and a notice is raised.
    pub async fn load_fonts(&self) -> Result<FontCatalog, SessionError> {
        self.state.send_modify(|s| s.catalog_phase = Phase::Pending);

        let outcome = self.gateway.list_fonts().await;

        self.state.send_modify(|s| {
            s.catalog_phase = Phase::Settled;
            match &outcome {
                Ok(list) => {
                    s.fonts = list.fonts.clone();
                    s.refilter();
                }
                Err(_) => s.notice = Some(Notice::error(FONTS_FAILED)),
            }
        });

        match outcome {
            Ok(list) => {
                debug!("Browsing {} fonts", list.fonts.len());
                Ok(list.fonts)
            }
            Err(e) => {
                warn!("Font catalog unavailable: {e}");
                Err(e)
            }
        }
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.state.send_modify(|s| {
            s.search_term = term;
            s.refilter();
        });
    }

    /// Text used by previews issued from now on.
    pub fn set_preview_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.preview_text = text);
    }

    /// Selects `font` and renders the preview text with it.
    ///
    /// Blank preview text is rejected without a request and without touching the selection.
    pub async fn preview_font(&self, font: FontName) -> Result<PreviewOutcome, SessionError> {
        let mut request = GenerationRequest::new(String::new())
            .with_font(font.clone())
            .with_width(PREVIEW_WIDTH)
            .with_justify(PREVIEW_JUSTIFY);
        let mut seq = 0;
        let mut blank = false;

        self.state.send_modify(|s| {
            if s.preview_text.trim().is_empty() {
                blank = true;
                s.notice = Some(Notice::error(EMPTY_PREVIEW_TEXT));
                return;
            }
            s.preview_seq += 1;
            seq = s.preview_seq;
            s.selected = Some(font.clone());
            s.preview_phase = Phase::Pending;
            s.preview = None;
            request.text = s.preview_text.clone();
        });

        if blank {
            return Err(SessionError::Validation(EMPTY_PREVIEW_TEXT.to_string()));
        }
        debug!("Preview #{seq} requested for {font}");

        let outcome = checked(self.gateway.generate(&request).await);

        let mut current = false;
        self.state.send_if_modified(|s| {
            if s.preview_seq != seq {
                return false;
            }
            current = true;
            s.preview_phase = Phase::Settled;
            match &outcome {
                Ok(result) => s.preview = Some(result.clone()),
                Err(_) => s.notice = Some(Notice::error(PREVIEW_FAILED)),
            }
            true
        });

        if !current {
            debug!("Discarding stale preview #{seq} for {font}");
            return Ok(PreviewOutcome::Stale);
        }

        match outcome {
            Ok(result) => Ok(PreviewOutcome::Shown(result)),
            Err(e) => {
                warn!("Preview of {font} failed: {e}");
                Err(e)
            }
        }
    }
}
