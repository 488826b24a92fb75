//! Session domain errors
//!
//! Authentication failures deliberately carry no detail: an unknown email
//! and a wrong password produce the same message.

use thiserror::Error;

use crate::role::Role;

/// Errors that can occur in the session domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Email or password left empty
    #[error("Please fill in all fields")]
    MissingCredentials,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The user may not act in this role
    #[error("Role {0} is not available to this user")]
    RoleNotAvailable(Role),

    /// Role name did not match any role
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Directory entry without any role
    #[error("Account {0} has no roles")]
    NoRoles(String),

    /// An operation needed a session and there was none
    #[error("Not logged in")]
    NotLoggedIn,
}
