//! Login and session DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_session::{Role, Session};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 254, message = "is too long"))]
    #[serde(default)]
    pub email: String,
    #[validate(length(max = 128, message = "is too long"))]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub active_role: Role,
    pub can_switch_roles: bool,
}

impl From<&Session> for SessionUserResponse {
    fn from(session: &Session) -> Self {
        let user = session.user();
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles.clone(),
            active_role: session.active_role(),
            can_switch_roles: session.can_switch_roles(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: SessionUserResponse,
}

impl TokenResponse {
    pub fn bearer(token: String, expires_in: u64, session: &Session) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user: SessionUserResponse::from(session),
        }
    }
}
