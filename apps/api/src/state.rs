use std::sync::Arc;

use crate::backend::RenderBackend;

/// Shared state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable backend. `HttpRenderBackend` in production, fakes in tests.
    pub backend: Arc<dyn RenderBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self { backend }
    }
}
