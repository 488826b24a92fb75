//! Role dashboards
//!
//! Which dashboard a session sees is decided by a `match` on its active
//! role. Dashboards borrow claims from the store; they are views, not
//! copies.

use serde::Serialize;

use domain_claims::{ClaimStore, ClaimSummary, Employee, TransportClaim};
use crate::directory::User;
use crate::role::Role;

/// An employee's own claims
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDashboard<'s> {
    pub employee: Employee,
    pub summary: ClaimSummary,
    pub claims: Vec<&'s TransportClaim>,
}

/// The reviewer's queue and the full history
#[derive(Debug, Clone, Serialize)]
pub struct ReviewerDashboard<'s> {
    pub reviewer: String,
    pub summary: ClaimSummary,
    pub pending: Vec<&'s TransportClaim>,
    pub all: &'s [TransportClaim],
}

/// Dashboard for the active role
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard<'s> {
    Employee(EmployeeDashboard<'s>),
    Reviewer(ReviewerDashboard<'s>),
}

impl<'s> Dashboard<'s> {
    /// Builds the dashboard a user sees in the given role
    pub fn for_role(role: Role, user: &User, store: &'s ClaimStore) -> Self {
        match role {
            Role::Employee => {
                let claims = store.claims_by_employee(&user.email);
                Dashboard::Employee(EmployeeDashboard {
                    employee: user.as_employee(),
                    summary: ClaimSummary::of(claims.iter().copied()),
                    claims,
                })
            }
            Role::Reviewer => Dashboard::Reviewer(ReviewerDashboard {
                reviewer: user.name.clone(),
                summary: store.summary(),
                pending: store.pending_claims(),
                all: store.all_claims(),
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Dashboard::Employee(_) => Role::Employee,
            Dashboard::Reviewer(_) => Role::Reviewer,
        }
    }

    pub fn summary(&self) -> ClaimSummary {
        match self {
            Dashboard::Employee(d) => d.summary,
            Dashboard::Reviewer(d) => d.summary,
        }
    }
}
