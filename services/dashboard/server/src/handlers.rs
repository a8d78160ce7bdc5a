use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::fetch::{self, FetchError};
use crate::{AppState, views};

const FALLBACK_BODY: &str = "Something went wrong!";

/// `GET /` — pull fresh measurements and render everything stored so far.
#[tracing::instrument(skip_all, name = "measurements_page")]
pub async fn measurements(State(state): State<AppState>) -> Response {
    let result = fetch::sync_measurements(
        &state.client,
        state.store.as_ref(),
        &state.config.openaq_city,
        &state.config.openaq_parameter,
    )
    .await;

    match result {
        Ok(rows) => Html(views::measurements_page(&rows)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// `GET /locations` — pull fresh station metadata and render everything
/// stored so far.
#[tracing::instrument(skip_all, name = "locations_page")]
pub async fn locations(State(state): State<AppState>) -> Response {
    let result =
        fetch::sync_locations(&state.client, state.store.as_ref()).await;

    match result {
        Ok(rows) => Html(views::locations_page(&rows)).into_response(),
        Err(e) => fetch_error_response(e),
    }
}

/// `GET /refresh` — drop and recreate both tables, then repopulate them.
#[tracing::instrument(skip_all, name = "refresh")]
pub async fn refresh(State(state): State<AppState>) -> Response {
    if let Err(e) = state.store.reset().await {
        tracing::error!(error = %e, "failed to reset dashboard tables");
        return (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY)
            .into_response();
    }

    if let Err(e) = fetch::sync_measurements(
        &state.client,
        state.store.as_ref(),
        &state.config.openaq_city,
        &state.config.openaq_parameter,
    )
    .await
    {
        return fetch_error_response(e);
    }

    if let Err(e) =
        fetch::sync_locations(&state.client, state.store.as_ref()).await
    {
        return fetch_error_response(e);
    }

    (StatusCode::OK, "Data refreshed!").into_response()
}

/// The route layer decides the HTTP status; the body stays deliberately
/// generic so upstream details never leak to the page.
fn fetch_error_response(err: FetchError) -> Response {
    let status = match &err {
        FetchError::UpstreamStatus(code) => {
            tracing::warn!(upstream_status = code, "upstream returned non-200");
            StatusCode::BAD_GATEWAY
        }
        FetchError::Upstream(e) => {
            tracing::error!(error = %e, "upstream request failed");
            StatusCode::BAD_GATEWAY
        }
        FetchError::Store(e) => {
            tracing::error!(error = %e, "persistence failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, FALLBACK_BODY).into_response()
}
