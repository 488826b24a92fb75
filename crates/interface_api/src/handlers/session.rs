//! Role switching and dashboards

use axum::{extract::State, Extension, Json};

use crate::auth::TokenClaims;
use crate::dto::auth::{SwitchRoleRequest, TokenResponse};
use crate::dto::claims::DashboardResponse;
use crate::error::ApiError;
use crate::handlers::login::issue_token;
use crate::handlers::current_session;
use crate::AppState;

/// Switches the active role and returns a token for it
pub async fn switch_role(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(request): Json<SwitchRoleRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut session = current_session(&state, &claims)?;
    session.switch_role(request.role)?;

    let token = issue_token(&state, &session)?;
    Ok(Json(TokenResponse::bearer(token, state.config.jwt_expiration_secs, &session)))
}

/// The dashboard for the caller's active role
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let session = current_session(&state, &claims)?;
    let store = state.store.read().await;

    Ok(Json(DashboardResponse::from(session.dashboard(&store))))
}
