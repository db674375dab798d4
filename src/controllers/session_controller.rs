use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::api::{LoginRequest, SessionInfo};
use crate::shared_state::AppState;

fn session_info(state: &AppState) -> SessionInfo {
    let user = state.user();
    SessionInfo { authenticated: user.is_some(), user }
}

/// POST /api/session/login
/// Remember a username for this session
#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SessionInfo),
        (status = 400, description = "Blank username")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username must not be blank".to_string()));
    }
    state.login(username);
    Ok(Json(session_info(&state)))
}

/// POST /api/session/logout
#[utoipa::path(
    post,
    path = "/api/session/logout",
    responses((status = 200, description = "Logged out", body = SessionInfo))
)]
pub async fn logout(State(state): State<AppState>) -> Json<SessionInfo> {
    state.logout();
    Json(session_info(&state))
}

/// GET /api/session
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Current session", body = SessionInfo))
)]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionInfo> {
    Json(session_info(&state))
}
