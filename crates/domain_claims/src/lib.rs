//! Transport Claims Domain
//!
//! This crate implements the employee transport claim lifecycle: filling in
//! the claim form, calculating the reimbursement, filing the claim in the
//! store, and reviewing it.
//!
//! # Claim Lifecycle
//!
//! ```text
//! ClaimForm --submit--> ClaimStore (pending) --ReviewDesk--> approved | rejected
//! ```

pub mod calculator;
pub mod claim;
pub mod error;
pub mod form;
pub mod review;
pub mod store;
pub mod validation;

pub use calculator::{AmountBreakdown, AmountCalculator, AmountInputs, DEFAULT_RATE_PER_KM, MAX_FIELD_VALUE};
pub use claim::{
    Attachment, ClaimStatus, Employee, HomeLeg, JourneyReason, NewClaim, Receipt, Review,
    TransportClaim, TransportMode, Trip,
};
pub use error::ClaimError;
pub use form::{ClaimForm, NumericPolicy, SubmissionRules};
pub use review::{RejectionReason, ReviewAction, ReviewDecision, ReviewDesk};
pub use store::{ClaimStore, ClaimSummary};
pub use validation::{FieldError, FieldProblem, FormField, ValidationErrors};
