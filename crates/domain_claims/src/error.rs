//! Claims domain errors

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("A reason is required to reject a claim")]
    MissingRejectionReason,

    #[error("Claim form is invalid: {0}")]
    Validation(ValidationErrors),

    #[error("Unknown transport mode: {0}")]
    UnknownMode(String),

    #[error("Unknown journey reason: {0}")]
    UnknownReason(String),

    #[error("Expected Yes or No, got: {0}")]
    UnknownHomeLegFlag(String),

    #[error("No review action is staged")]
    NoReviewStaged,
}

impl From<ValidationErrors> for ClaimError {
    fn from(errors: ValidationErrors) -> Self {
        ClaimError::Validation(errors)
    }
}
