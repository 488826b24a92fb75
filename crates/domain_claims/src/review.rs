//! Claim review workflow
//!
//! ```text
//! pending --approve(reviewer)---------> approved   (terminal)
//! pending --reject(reviewer, reason)--> rejected   (terminal)
//! ```
//!
//! The [`ReviewDesk`] is what a reviewer works from. It lists pending
//! claims and turns approve/reject actions into single calls on the
//! [`ClaimStore`]. A rejection cannot go through without a non-blank
//! reason.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::ClaimId;
use crate::claim::{ClaimStatus, TransportClaim};
use crate::error::ClaimError;
use crate::store::ClaimStore;

/// Non-blank explanation attached to a rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionReason(String);

impl RejectionReason {
    /// Trims the text and refuses it if nothing is left
    pub fn parse(text: &str) -> Result<Self, ClaimError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ClaimError::MissingRejectionReason);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome chosen by a reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReviewDecision {
    Approve,
    Reject(RejectionReason),
}

impl ReviewDecision {
    /// Builds a rejection, failing on a blank reason
    pub fn reject(reason: &str) -> Result<Self, ClaimError> {
        Ok(ReviewDecision::Reject(RejectionReason::parse(reason)?))
    }

    /// Status the claim ends up in
    pub fn status(&self) -> ClaimStatus {
        match self {
            ReviewDecision::Approve => ClaimStatus::Approved,
            ReviewDecision::Reject(_) => ClaimStatus::Rejected,
        }
    }

    pub(crate) fn into_rejection_reason(self) -> Option<String> {
        match self {
            ReviewDecision::Approve => None,
            ReviewDecision::Reject(reason) => Some(reason.0),
        }
    }
}

/// Action picked on a claim card before confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

/// An action awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedReview {
    pub claim_id: ClaimId,
    pub action: ReviewAction,
    pub rejection_text: String,
}

/// A reviewer's workspace over the claim store
#[derive(Debug, Clone)]
pub struct ReviewDesk {
    reviewer: String,
    staged: Option<StagedReview>,
}

impl ReviewDesk {
    pub fn new(reviewer: impl Into<String>) -> Self {
        Self {
            reviewer: reviewer.into(),
            staged: None,
        }
    }

    /// Name recorded on every decision made at this desk
    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    /// Claims awaiting a decision, in submission order
    pub fn pending<'s>(&self, store: &'s ClaimStore) -> Vec<&'s TransportClaim> {
        store.pending_claims()
    }

    /// Approves a claim immediately
    pub fn approve<'s>(
        &self,
        store: &'s mut ClaimStore,
        claim_id: ClaimId,
    ) -> Result<&'s TransportClaim, ClaimError> {
        store.update_claim_status(claim_id, ReviewDecision::Approve, &self.reviewer)
    }

    /// Rejects a claim immediately; a blank reason leaves the store untouched
    pub fn reject<'s>(
        &self,
        store: &'s mut ClaimStore,
        claim_id: ClaimId,
        reason: &str,
    ) -> Result<&'s TransportClaim, ClaimError> {
        let decision = ReviewDecision::reject(reason)?;
        store.update_claim_status(claim_id, decision, &self.reviewer)
    }

    /// Picks an action for a claim, replacing anything staged before
    pub fn stage(&mut self, claim_id: ClaimId, action: ReviewAction) {
        self.staged = Some(StagedReview {
            claim_id,
            action,
            rejection_text: String::new(),
        });
    }

    /// Updates the rejection text of the staged action
    pub fn set_rejection_text(&mut self, text: impl Into<String>) {
        if let Some(staged) = self.staged.as_mut() {
            staged.rejection_text = text.into();
        }
    }

    pub fn staged(&self) -> Option<&StagedReview> {
        self.staged.as_ref()
    }

    /// Approvals can always be confirmed; rejections need a reason
    pub fn can_confirm(&self) -> bool {
        match &self.staged {
            Some(staged) => match staged.action {
                ReviewAction::Approve => true,
                ReviewAction::Reject => !staged.rejection_text.trim().is_empty(),
            },
            None => false,
        }
    }

    /// Carries out the staged action
    ///
    /// The staged action is kept when confirmation fails so the reviewer
    /// can fix the reason and try again.
    pub fn confirm<'s>(
        &mut self,
        store: &'s mut ClaimStore,
    ) -> Result<&'s TransportClaim, ClaimError> {
        let staged = self.staged.as_ref().ok_or(ClaimError::NoReviewStaged)?;
        let decision = match staged.action {
            ReviewAction::Approve => ReviewDecision::Approve,
            ReviewAction::Reject => ReviewDecision::reject(&staged.rejection_text)?,
        };
        let claim_id = staged.claim_id;

        let claim = store.update_claim_status(claim_id, decision, &self.reviewer)?;
        self.staged = None;
        Ok(claim)
    }

    /// Drops the staged action
    pub fn cancel(&mut self) {
        self.staged = None;
    }
}
