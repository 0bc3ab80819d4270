pub mod health;
pub mod relay;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/fonts", get(relay::handle_fonts))
        .route("/api/generate", post(relay::handle_generate))
        .route("/api/random", get(relay::handle_random))
        .with_state(state)
}
