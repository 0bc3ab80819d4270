//! Rendering backend client. The only place the gateway talks to the backend.
//!
//! Every relay makes exactly one backend call: no caching, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{FontList, GenerationResult};

const FONTS_PATH: &str = "/figlet/fonts";
const GENERATE_PATH: &str = "/figlet/generate";
const RANDOM_PATH: &str = "/figlet/random";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with status {0}")]
    Status(u16),

    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// A backend body as received, next to its parsed form.
///
/// Relays hand `body` to the client untouched; `parsed` only proves the shape is right.
#[derive(Debug, Clone, PartialEq)]
pub struct Relayed<T> {
    pub parsed: T,
    pub body: Value,
}

impl<T: DeserializeOwned> Relayed<T> {
    pub fn from_body(body: Value) -> Result<Self, BackendError> {
        let parsed = serde_json::from_value(body.clone())
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        Ok(Self { parsed, body })
    }
}

impl Relayed<GenerationResult> {
    fn validated(self) -> Result<Self, BackendError> {
        let parsed = self.parsed.validate().map_err(BackendError::Malformed)?;
        Ok(Self {
            parsed,
            body: self.body,
        })
    }
}

/// The rendering backend contract: list fonts, render text, render something random.
///
/// Carried in `AppState` as `Arc<dyn RenderBackend>`.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    async fn list_fonts(&self) -> Result<Relayed<FontList>, BackendError>;

    /// Forwards `body` as-is. The backend owns validation of its fields.
    async fn generate(&self, body: &Value) -> Result<Relayed<GenerationResult>, BackendError>;

    async fn random(&self) -> Result<Relayed<GenerationResult>, BackendError>;
}

/// `RenderBackend` over HTTP, rooted at a configured base address.
#[derive(Clone)]
pub struct HttpRenderBackend {
    client: Client,
    base_url: String,
}

impl HttpRenderBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn read<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Relayed<T>, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| BackendError::Malformed(e.to_string()))?;
        Relayed::from_body(body)
    }
}

#[async_trait]
impl RenderBackend for HttpRenderBackend {
    async fn list_fonts(&self) -> Result<Relayed<FontList>, BackendError> {
        let response = self.client.get(self.url(FONTS_PATH)).send().await?;
        let list: Relayed<FontList> = Self::read(response).await?;
        debug!("Backend listed {} fonts", list.parsed.count);
        Ok(list)
    }

    async fn generate(&self, body: &Value) -> Result<Relayed<GenerationResult>, BackendError> {
        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .json(body)
            .send()
            .await?;
        let result = Self::read::<GenerationResult>(response).await?.validated()?;
        debug!("Backend rendered with font {}", result.parsed.font_used);
        Ok(result)
    }

    async fn random(&self) -> Result<Relayed<GenerationResult>, BackendError> {
        let response = self.client.get(self.url(RANDOM_PATH)).send().await?;
        let result = Self::read::<GenerationResult>(response).await?.validated()?;
        debug!("Backend picked font {} at random", result.parsed.font_used);
        Ok(result)
    }
}
