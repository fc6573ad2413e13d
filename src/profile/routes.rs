//! REST endpoints for dialog status and collected profiles.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::dialog::ProfileDialog;

/// Shared state for profile routes.
#[derive(Clone)]
pub struct ProfileRouteState {
    pub dialog: Arc<ProfileDialog>,
}

fn store_error(e: impl std::fmt::Display) -> Response {
    tracing::warn!("Profile route failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": e.to_string()})),
    )
        .into_response()
}

/// GET /api/dialog/{conversation}/status
///
/// Whether a dialog is running, its phase, and the profile so far.
async fn get_status(
    State(state): State<ProfileRouteState>,
    Path(conversation): Path<String>,
) -> Response {
    match state.dialog.status(&conversation).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => store_error(e),
    }
}

/// GET /api/profile/{conversation}
///
/// Returns the stored profile, or 404 if the conversation has none.
async fn get_profile(
    State(state): State<ProfileRouteState>,
    Path(conversation): Path<String>,
) -> Response {
    match state.dialog.status(&conversation).await {
        Ok(status) => match status.profile {
            Some(profile) => Json(profile).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "No profile exists yet"})),
            )
                .into_response(),
        },
        Err(e) => store_error(e),
    }
}

/// Build the profile REST routes.
pub fn profile_routes(state: ProfileRouteState) -> Router {
    Router::new()
        .route("/api/dialog/{conversation}/status", get(get_status))
        .route("/api/profile/{conversation}", get(get_profile))
        .with_state(state)
}
