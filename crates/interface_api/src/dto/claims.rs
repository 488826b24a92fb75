//! Claims DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, Money};
use domain_claims::{AmountBreakdown, Attachment, ClaimForm, ClaimStatus, ClaimSummary, TransportClaim};
use domain_session::Dashboard;

#[derive(Debug, Deserialize, Validate)]
pub struct RejectRequest {
    #[validate(length(max = 1000, message = "is too long"))]
    #[serde(default)]
    pub reason: String,
}

/// Live amount figures for a form being filled in
#[derive(Debug, Serialize)]
pub struct AmountPreviewResponse {
    pub computed_amount: Decimal,
    pub parking_fee: Decimal,
    pub toll_fee: Decimal,
    pub home_amount: Decimal,
    pub final_amount: Decimal,
    pub currency: String,
    pub shows_home_fields: bool,
    pub shows_receipt_fields: bool,
}

impl AmountPreviewResponse {
    pub fn new(form: &ClaimForm, breakdown: &AmountBreakdown) -> Self {
        Self {
            computed_amount: breakdown.computed().amount(),
            parking_fee: breakdown.parking_fee().amount(),
            toll_fee: breakdown.toll_fee().amount(),
            home_amount: breakdown.home_amount().amount(),
            final_amount: breakdown.final_amount().amount(),
            currency: breakdown.currency().code().to_string(),
            shows_home_fields: form.is_home_leg(),
            shows_receipt_fields: form.shows_receipt_fields(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub employee_email: String,
    pub employee_name: String,
    pub mode: String,
    pub to_from_home: bool,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub from_location: String,
    pub to_location: String,
    pub reason: String,
    pub reason_details: Option<String>,
    pub home_distance_km: Option<Decimal>,
    pub home_amount: Option<Decimal>,
    pub parking_fee: Option<Decimal>,
    pub toll_fee: Option<Decimal>,
    pub receipt_number: Option<String>,
    pub receipt_amount: Option<Decimal>,
    pub computed_amount: Decimal,
    pub final_amount: Decimal,
    pub currency: String,
    pub attachments: Vec<Attachment>,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

fn amount(money: Option<Money>) -> Option<Decimal> {
    money.map(|m| m.amount())
}

impl From<&TransportClaim> for ClaimResponse {
    fn from(claim: &TransportClaim) -> Self {
        let trip = claim.trip();
        let home_leg = claim.home_leg();
        let receipt = claim.receipt();

        Self {
            id: claim.id(),
            employee_email: claim.employee().email.clone(),
            employee_name: claim.employee().name.clone(),
            mode: trip.mode.label().to_string(),
            to_from_home: home_leg.is_some(),
            travel_date: trip.travel_date,
            departure_time: trip.departure_time,
            arrival_time: trip.arrival_time,
            from_location: trip.from_location.clone(),
            to_location: trip.to_location.clone(),
            reason: trip.reason.label().to_string(),
            reason_details: trip.reason_details.clone(),
            home_distance_km: home_leg.and_then(|h| h.distance_km),
            home_amount: amount(home_leg.and_then(|h| h.amount)),
            parking_fee: amount(claim.parking_fee()),
            toll_fee: amount(claim.toll_fee()),
            receipt_number: receipt.and_then(|r| r.number.clone()),
            receipt_amount: receipt.map(|r| r.amount.amount()),
            computed_amount: claim.amounts().computed().amount(),
            final_amount: claim.final_amount().amount(),
            currency: claim.final_amount().currency().code().to_string(),
            attachments: claim.attachments().to_vec(),
            status: claim.status(),
            submitted_at: claim.submitted_at(),
            reviewed_by: claim.reviewed_by().map(str::to_string),
            reviewed_at: claim.reviewed_at(),
            rejection_reason: claim.rejection_reason().map(str::to_string),
        }
    }
}

fn responses<'a>(claims: impl IntoIterator<Item = &'a TransportClaim>) -> Vec<ClaimResponse> {
    claims.into_iter().map(ClaimResponse::from).collect()
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub summary: ClaimSummary,
    pub claims: Vec<ClaimResponse>,
}

impl ClaimListResponse {
    pub fn new<'a>(claims: impl IntoIterator<Item = &'a TransportClaim> + Clone) -> Self {
        Self {
            summary: ClaimSummary::of(claims.clone()),
            claims: responses(claims),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DashboardResponse {
    Employee {
        employee_name: String,
        summary: ClaimSummary,
        claims: Vec<ClaimResponse>,
    },
    Reviewer {
        reviewer: String,
        summary: ClaimSummary,
        pending: Vec<ClaimResponse>,
        all: Vec<ClaimResponse>,
    },
}

impl From<Dashboard<'_>> for DashboardResponse {
    fn from(dashboard: Dashboard<'_>) -> Self {
        match dashboard {
            Dashboard::Employee(d) => DashboardResponse::Employee {
                employee_name: d.employee.name,
                summary: d.summary,
                claims: responses(d.claims),
            },
            Dashboard::Reviewer(d) => DashboardResponse::Reviewer {
                reviewer: d.reviewer,
                summary: d.summary,
                pending: responses(d.pending),
                all: responses(d.all),
            },
        }
    }
}
