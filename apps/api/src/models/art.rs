use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::font::FontName;

/// Column budget used when the caller does not pick one.
pub const DEFAULT_WIDTH: u32 = 80;
/// Width range offered by front ends. The relay itself does not enforce it.
pub const WIDTH_MIN: u32 = 40;
pub const WIDTH_MAX: u32 = 200;
pub const WIDTH_STEP: u32 = 5;

/// Horizontal alignment of the rendered block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Left,
    #[default]
    Center,
    Right,
}

impl Justify {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justify::Left => "left",
            Justify::Center => "center",
            Justify::Right => "right",
        }
    }
}

/// A single render request. `font: None` asks the backend to pick one.
///
/// Callers are responsible for rejecting blank `text` before building one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontName>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub justify: Justify,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            width: DEFAULT_WIDTH,
            justify: Justify::default(),
        }
    }

    pub fn with_font(mut self, font: FontName) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }
}

/// Rendered art as returned by the backend.
///
/// `font_used` is always resolved, including when the request left the font to the backend.
/// `metadata` is backend-defined and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub ascii_art: String,
    pub font_used: FontName,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl GenerationResult {
    /// Checks the invariants a parsed result must hold before anyone displays it.
    pub fn validate(self) -> Result<Self, String> {
        if self.font_used.is_blank() {
            return Err("result is missing font_used".to_string());
        }
        Ok(self)
    }
}
