use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use asciify_api::backend::HttpRenderBackend;
use asciify_api::config::Config;
use asciify_api::routes::build_router;
use asciify_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting asciify gateway v{}", env!("CARGO_PKG_VERSION"));

    let backend = HttpRenderBackend::new(config.backend_url.clone(), config.backend_timeout)?;
    if backend.base_url().is_empty() {
        warn!("BACKEND_URL is not set; backend paths stay relative and every relay will fail");
    } else {
        info!("Rendering backend at {}", backend.base_url());
    }

    let state = AppState::new(Arc::new(backend));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
