use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::AppState;

const POSTGRES_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub components: HashMap<String, ComponentHealth>,
}

pub async fn handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut components = HashMap::new();

    let postgres = check_postgres(&state).await;
    let overall = postgres.status.clone();
    components.insert("postgres".to_string(), postgres);

    let status_code = if overall == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall,
            components,
        }),
    )
}

async fn check_postgres(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let result = tokio::time::timeout(POSTGRES_TIMEOUT, async {
        state.store.ping().await.map_err(|e| e.to_string())
    })
    .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(())) => ComponentHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(latency_ms),
            error: None,
        },
        Ok(Err(e)) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            error: Some(e),
        },
        Err(_) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            error: Some("timeout".to_string()),
        },
    }
}
