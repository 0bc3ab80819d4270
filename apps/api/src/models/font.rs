use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a rendering style, as reported by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontName(String);

impl FontName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FontName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FontName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for FontName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Ordered font names in backend order. Read-only once fetched.
pub type FontCatalog = Vec<FontName>;

/// Wire shape of the font listing: `{ "fonts": [...], "count": n }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontList {
    pub fonts: FontCatalog,
    pub count: usize,
}

impl FontList {
    pub fn new(fonts: FontCatalog) -> Self {
        let count = fonts.len();
        Self { fonts, count }
    }
}

#[derive(Deserialize)]
struct RawFontList {
    fonts: FontCatalog,
    count: Option<usize>,
}

// A listing without `count` is still usable; the count is derived from the names.
impl<'de> Deserialize<'de> for FontList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawFontList::deserialize(deserializer)?;
        let count = raw.count.unwrap_or(raw.fonts.len());
        Ok(FontList {
            fonts: raw.fonts,
            count,
        })
    }
}
