//! Session tokens
//!
//! A token carries the user's identity, every role they hold and the role
//! they are currently acting in. Switching roles issues a new token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_claims::Employee;
use domain_session::{Role, Session, User};

use crate::error::ApiError;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Every role the user holds
    pub roles: Vec<Role>,
    /// Role the user is acting in
    pub active_role: Role,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl TokenClaims {
    /// Rebuilds the directory entry carried by the token
    pub fn user(&self) -> User {
        User::new(self.sub.clone(), self.name.clone(), &self.roles)
    }

    pub fn employee(&self) -> Employee {
        Employee::new(self.sub.clone(), self.name.clone())
    }
}

/// Checks that the token is acting in the given role
///
/// Gating follows the active role, the way the dashboard is chosen. A user
/// holding both roles must switch before using the other role's routes.
pub fn require_role(claims: &TokenClaims, role: Role) -> Result<(), ApiError> {
    if claims.active_role == role {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("Requires the {} role", role)))
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token lifetime of {0} seconds is out of range")]
    InvalidLifetime(u64),
}

/// Converts a configured lifetime in seconds into a duration
///
/// `None` when the value does not fit chrono's range.
pub fn token_lifetime(expiration_secs: u64) -> Option<Duration> {
    i64::try_from(expiration_secs)
        .ok()
        .and_then(Duration::try_seconds)
}

/// Creates a token for a session
///
/// # Arguments
///
/// * `session` - The session to encode
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    session: &Session,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = token_lifetime(expiration_secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(AuthError::InvalidLifetime(expiration_secs))?;

    let user = session.user();
    let claims = TokenClaims {
        sub: user.email.clone(),
        name: user.name.clone(),
        roles: user.roles.clone(),
        active_role: session.active_role(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_session::{SessionShell, DEMO_PASSWORD};

    fn session(email: &str) -> Session {
        let mut shell = SessionShell::default();
        shell.login(email, DEMO_PASSWORD).unwrap().clone()
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_token(&session("admin@dasi.com"), "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "admin@dasi.com");
        assert_eq!(claims.name, "Admin User");
        assert_eq!(claims.roles, vec![Role::Employee, Role::Reviewer]);
        assert_eq!(claims.active_role, Role::Employee);
        assert_eq!(claims.user().roles.len(), 2);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&session("hr@dasi.com"), "secret", 60).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_require_role_follows_active_role() {
        let token = create_token(&session("manager@dasi.com"), "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert!(require_role(&claims, Role::Employee).is_ok());
        assert!(matches!(require_role(&claims, Role::Reviewer), Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let result = create_token(&session("john@dasi.com"), "secret", u64::MAX);
        assert!(matches!(result, Err(AuthError::InvalidLifetime(u64::MAX))));

        let result = create_token(&session("john@dasi.com"), "secret", i64::MAX as u64);
        assert!(matches!(result, Err(AuthError::InvalidLifetime(_))));
    }

    #[test]
    fn test_token_lifetime_range() {
        assert_eq!(token_lifetime(3600), Some(Duration::hours(1)));
        assert_eq!(token_lifetime(u64::MAX), None);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(validate_token("not-a-token", "secret"), Err(AuthError::InvalidToken)));
    }
}
