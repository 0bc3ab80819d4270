//! Sessions talking to the real gateway router, which talks to a stub rendering backend.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use asciify::client::{Gateway, HttpGateway};
use asciify::errors::SessionError;
use asciify::models::{FontName, Justify};
use asciify::session::{FontBrowser, GeneratorSession, Phase, PreviewOutcome, RandomSession};
use asciify_api::backend::HttpRenderBackend;
use asciify_api::routes::build_router;
use asciify_api::state::AppState;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn render(Json(body): Json<Value>) -> Json<Value> {
    let text = body["text"].as_str().unwrap_or_default();
    let font = body["font"].as_str().unwrap_or("doom");
    Json(json!({
        "ascii_art": format!("<{font}> {text}"),
        "font_used": font,
        "metadata": { "width": body["width"], "justify": body["justify"] }
    }))
}

fn healthy_backend() -> Router {
    Router::new()
        .route(
            "/figlet/fonts",
            get(|| async { Json(json!({ "fonts": ["standard", "slant"], "count": 2 })) }),
        )
        .route("/figlet/generate", post(render))
        .route(
            "/figlet/random",
            get(|| async {
                Json(json!({ "ascii_art": "<banner> surprise", "font_used": "banner" }))
            }),
        )
}

fn broken_backend() -> Router {
    let fail = || async { (StatusCode::INTERNAL_SERVER_ERROR, "Traceback (most recent call last)") };
    Router::new()
        .route("/figlet/fonts", get(fail))
        .route("/figlet/generate", post(fail))
        .route("/figlet/random", get(fail))
}

async fn gateway_for(backend: Router) -> Arc<dyn Gateway> {
    let backend_url = serve(backend).await;
    let render_backend = HttpRenderBackend::new(backend_url, TIMEOUT).unwrap();
    let gateway_url = serve(build_router(AppState::new(Arc::new(render_backend)))).await;
    Arc::new(HttpGateway::new(gateway_url, TIMEOUT).unwrap())
}

#[tokio::test]
async fn explicit_generation_round_trip() {
    let session = GeneratorSession::new(gateway_for(healthy_backend()).await);
    session.load_fonts().await.unwrap();
    session.set_text("Hi");
    session.set_font(FontName::from("slant"));
    session.set_width(120);
    session.set_justify(Justify::Left);

    let result = session.generate().await.unwrap();

    assert_eq!(result.ascii_art, "<slant> Hi");
    assert_eq!(result.font_used, FontName::from("slant"));
    assert_eq!(result.metadata["width"], json!(120));
    assert_eq!(result.metadata["justify"], json!("left"));
    assert_eq!(session.snapshot().fonts.len(), 2);
}

#[tokio::test]
async fn browsing_filters_and_previews() {
    let browser = FontBrowser::new(gateway_for(healthy_backend()).await);
    browser.load_fonts().await.unwrap();
    browser.set_search_term("SL");

    assert_eq!(browser.filtered(), vec![FontName::from("slant")]);

    let outcome = browser.preview_font(FontName::from("slant")).await.unwrap();
    let PreviewOutcome::Shown(result) = outcome else {
        panic!("preview was discarded");
    };
    assert_eq!(result.ascii_art, "<slant> Hello");
    assert_eq!(result.metadata["width"], json!(80));
    assert_eq!(result.metadata["justify"], json!("center"));
}

#[tokio::test]
async fn random_with_and_without_custom_text() {
    let session = RandomSession::new(gateway_for(healthy_backend()).await);

    let fully_random = session.generate_random().await.unwrap();
    assert_eq!(fully_random.font_used, FontName::from("banner"));
    assert!(fully_random.metadata.is_empty());

    session.set_custom_text("ferris");
    let random_font = session.generate_random().await.unwrap();
    assert_eq!(random_font.ascii_art, "<doom> ferris");
    assert_eq!(random_font.font_used, FontName::from("doom"));
}

#[tokio::test]
async fn backend_failures_reach_sessions_as_generic_errors() {
    let gateway = gateway_for(broken_backend()).await;

    let session = GeneratorSession::new(gateway.clone());
    assert!(session.load_fonts().await.is_err());
    assert_eq!(session.snapshot().fonts, vec![FontName::from("standard")]);

    let err = session.generate().await.unwrap_err();
    match &err {
        SessionError::BackendUnavailable(message) => {
            assert!(message.contains("Failed to generate ASCII art"), "{message}");
            assert!(!message.contains("Traceback"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.snapshot().request.phase, Phase::Settled);

    let random = RandomSession::new(gateway);
    let err = random.generate_random().await.unwrap_err();
    assert!(err.is_backend_failure());
    assert_eq!(random.snapshot().request.phase, Phase::Settled);
}
