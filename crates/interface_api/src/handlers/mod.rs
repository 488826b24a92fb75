//! Request handlers

pub mod claims;
pub mod health;
pub mod login;
pub mod session;

use domain_session::{Session, SessionError};

use crate::auth::TokenClaims;
use crate::error::ApiError;
use crate::AppState;

/// Rebuilds the caller's session from the directory and the token
///
/// The directory stays the authority on roles; a token naming an account
/// that no longer exists is treated as logged out.
pub(crate) fn current_session(state: &AppState, claims: &TokenClaims) -> Result<Session, ApiError> {
    let user = state
        .directory
        .find(&claims.sub)
        .ok_or(SessionError::NotLoggedIn)?;
    Ok(Session::resume(user.clone(), claims.active_role)?)
}
