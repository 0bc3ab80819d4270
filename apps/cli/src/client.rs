//! Access to the gateway's three relays.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::errors::SessionError;
use crate::models::{FontList, GenerationRequest, GenerationResult};

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";

/// The gateway as seen by a session. `HttpGateway` in production, fakes in tests.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_fonts(&self) -> Result<FontList, SessionError>;

    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationResult, SessionError>;

    /// Fully backend-chosen art. Sends no request body.
    async fn random(&self) -> Result<GenerationResult, SessionError>;
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    error: String,
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SessionError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!("Gateway returned {}: {}", status, message);
            return Err(SessionError::BackendUnavailable(format!(
                "gateway responded with {status}: {message}"
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SessionError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_fonts(&self) -> Result<FontList, SessionError> {
        let response = self.client.get(self.url("/api/fonts")).send().await?;
        Self::read(response).await
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, SessionError> {
        debug!(
            "POST /api/generate font={:?} width={} justify={}",
            request.font.as_ref().map(|f| f.as_str()),
            request.width,
            request.justify.as_str()
        );
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(request)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn random(&self) -> Result<GenerationResult, SessionError> {
        let response = self.client.get(self.url("/api/random")).send().await?;
        Self::read(response).await
    }
}
