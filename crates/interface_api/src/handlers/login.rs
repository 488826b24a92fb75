//! Login handler

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain_session::Session;

use crate::auth::create_token;
use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::error::ApiError;
use crate::AppState;

/// Checks credentials and issues a session token in the user's first role
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request.validate()?;

    let user = state.directory.authenticate(&request.email, &request.password)?;
    let session = Session::start(user)?;
    let token = issue_token(&state, &session)?;

    info!(email = %session.user().email, role = %session.active_role(), "Login");
    Ok(Json(TokenResponse::bearer(token, state.config.jwt_expiration_secs, &session)))
}

pub(crate) fn issue_token(state: &AppState, session: &Session) -> Result<String, ApiError> {
    create_token(session, &state.config.jwt_secret, state.config.jwt_expiration_secs)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
