use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::handlers::{locations, measurements, refresh};
use crate::{AppState, health};

async fn fallback_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist",
            "status": 404
        })),
    )
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(measurements))
        .route("/locations", get(locations))
        .route("/refresh", get(refresh))
        .route("/health", get(health::handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
