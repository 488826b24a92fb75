//! In-memory claim store
//!
//! The store is an ordered list owned by whoever runs the session. It is
//! passed by reference to the form and the review desk. Claims are only
//! appended, never removed, so insertion order is submission order.

use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::ClaimId;
use crate::claim::{ClaimStatus, NewClaim, TransportClaim};
use crate::error::ClaimError;
use crate::review::ReviewDecision;

/// Ordered collection of submitted claims
#[derive(Debug, Default)]
pub struct ClaimStore {
    claims: Vec<TransportClaim>,
}

impl ClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a new claim and appends it
    ///
    /// The id, the submission timestamp and the pending status are set here
    /// regardless of what the caller had in mind.
    pub fn add_claim(&mut self, data: NewClaim) -> &TransportClaim {
        let claim = TransportClaim::submit(data);

        info!(
            claim_id = %claim.id(),
            employee = %claim.employee().email,
            mode = %claim.trip().mode,
            final_amount = %claim.final_amount(),
            "Claim submitted"
        );

        let index = self.claims.len();
        self.claims.push(claim);
        &self.claims[index]
    }

    /// Records a reviewer's decision on a pending claim
    ///
    /// # Errors
    ///
    /// * `ClaimNotFound` - no claim has this id
    /// * `InvalidStatusTransition` - the claim was already reviewed
    pub fn update_claim_status(
        &mut self,
        claim_id: ClaimId,
        decision: ReviewDecision,
        reviewer: &str,
    ) -> Result<&TransportClaim, ClaimError> {
        let Some(claim) = self.claims.iter_mut().find(|c| c.id() == claim_id) else {
            warn!(claim_id = %claim_id, "Review of unknown claim");
            return Err(ClaimError::ClaimNotFound(claim_id.to_string()));
        };

        claim.apply(decision, reviewer)?;

        info!(
            claim_id = %claim_id,
            status = %claim.status(),
            reviewer = %reviewer,
            "Claim reviewed"
        );
        Ok(claim)
    }

    /// Looks up a claim by id
    pub fn get(&self, claim_id: ClaimId) -> Option<&TransportClaim> {
        self.claims.iter().find(|c| c.id() == claim_id)
    }

    /// Claims filed by one employee, in submission order
    pub fn claims_by_employee(&self, email: &str) -> Vec<&TransportClaim> {
        let claims: Vec<_> = self
            .claims
            .iter()
            .filter(|c| c.employee().email == email)
            .collect();
        debug!(employee = %email, count = claims.len(), "Listed employee claims");
        claims
    }

    /// Every claim, in submission order
    pub fn all_claims(&self) -> &[TransportClaim] {
        &self.claims
    }

    /// Claims with the given status, in submission order
    pub fn claims_with_status(&self, status: ClaimStatus) -> Vec<&TransportClaim> {
        self.claims.iter().filter(|c| c.status() == status).collect()
    }

    /// Claims still awaiting review
    pub fn pending_claims(&self) -> Vec<&TransportClaim> {
        self.claims_with_status(ClaimStatus::Pending)
    }

    /// Status counts over the whole store
    pub fn summary(&self) -> ClaimSummary {
        ClaimSummary::of(self.claims.iter())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Status counts shown at the top of both dashboards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

impl ClaimSummary {
    /// Counts the given claims by status
    pub fn of<'a, I>(claims: I) -> Self
    where
        I: IntoIterator<Item = &'a TransportClaim>,
    {
        claims.into_iter().fold(Self::default(), |mut summary, claim| {
            match claim.status() {
                ClaimStatus::Pending => summary.pending += 1,
                ClaimStatus::Approved => summary.approved += 1,
                ClaimStatus::Rejected => summary.rejected += 1,
            }
            summary.total += 1;
            summary
        })
    }
}
