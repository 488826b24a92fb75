//! Transport claim aggregate

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, Money};
use crate::calculator::AmountBreakdown;
use crate::error::ClaimError;
use crate::review::ReviewDecision;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Submitted, awaiting review
    Pending,
    /// Approved by a reviewer
    Approved,
    /// Rejected by a reviewer, with a reason
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode of transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    #[serde(rename = "Taxi / Private Hire")]
    TaxiPrivateHire,
    #[serde(rename = "Car")]
    Car,
    #[serde(rename = "Motorcycle")]
    Motorcycle,
    #[serde(rename = "Bus / MRT / LRT")]
    BusMrtLrt,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::TaxiPrivateHire,
        TransportMode::Car,
        TransportMode::Motorcycle,
        TransportMode::BusMrtLrt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::TaxiPrivateHire => "Taxi / Private Hire",
            TransportMode::Car => "Car",
            TransportMode::Motorcycle => "Motorcycle",
            TransportMode::BusMrtLrt => "Bus / MRT / LRT",
        }
    }

    /// Reimbursed per kilometre rather than per receipt
    pub fn is_mileage_based(&self) -> bool {
        matches!(self, TransportMode::Car)
    }

    /// Receipt number and amount are collected for these modes
    pub fn requires_receipt(&self) -> bool {
        matches!(self, TransportMode::TaxiPrivateHire | TransportMode::BusMrtLrt)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransportMode {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| ClaimError::UnknownMode(s.to_string()))
    }
}

/// Reason for the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JourneyReason {
    #[serde(rename = "Overtime")]
    Overtime,
    #[serde(rename = "Required to report to work before 6:30 am")]
    EarlyReport,
    #[serde(rename = "Others")]
    Others,
}

impl JourneyReason {
    pub const ALL: [JourneyReason; 3] = [
        JourneyReason::Overtime,
        JourneyReason::EarlyReport,
        JourneyReason::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JourneyReason::Overtime => "Overtime",
            JourneyReason::EarlyReport => "Required to report to work before 6:30 am",
            JourneyReason::Others => "Others",
        }
    }
}

impl fmt::Display for JourneyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JourneyReason {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        JourneyReason::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| ClaimError::UnknownReason(s.to_string()))
    }
}

/// Parses the form's `Yes` / `No` selection
pub fn parse_yes_no(s: &str) -> Result<bool, ClaimError> {
    match s.trim() {
        "Yes" => Ok(true),
        "No" => Ok(false),
        other => Err(ClaimError::UnknownHomeLegFlag(other.to_string())),
    }
}

/// The employee a claim belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub email: String,
    pub name: String,
}

impl Employee {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Where, when and why the trip happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub mode: TransportMode,
    pub travel_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub from_location: String,
    pub to_location: String,
    pub reason: JourneyReason,
    pub reason_details: Option<String>,
}

/// Trip segment between home and the regular workplace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeLeg {
    pub distance_km: Option<Decimal>,
    pub amount: Option<Money>,
}

/// Receipt details for receipt-requiring modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub number: Option<String>,
    pub amount: Money,
}

/// Metadata of an uploaded file; the content itself is never kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Everything needed to file a claim, before an id and timestamp exist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClaim {
    pub employee: Employee,
    pub trip: Trip,
    /// Present only when the trip is to or from home
    pub home_leg: Option<HomeLeg>,
    pub parking_fee: Option<Money>,
    pub toll_fee: Option<Money>,
    /// Present only for receipt-requiring modes
    pub receipt: Option<Receipt>,
    pub amounts: AmountBreakdown,
    pub attachments: Vec<Attachment>,
}

/// Reviewer decision recorded on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub reviewed_by: String,
    pub reviewed_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
}

/// A submitted transport claim
///
/// Status and review metadata are only reachable through [`approve`] and
/// [`reject`], which keeps two invariants: a claim leaves `Pending` at most
/// once, and a rejection reason exists exactly when the claim is rejected.
///
/// [`approve`]: TransportClaim::approve
/// [`reject`]: TransportClaim::reject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportClaim {
    id: ClaimId,
    employee: Employee,
    trip: Trip,
    home_leg: Option<HomeLeg>,
    parking_fee: Option<Money>,
    toll_fee: Option<Money>,
    receipt: Option<Receipt>,
    amounts: AmountBreakdown,
    attachments: Vec<Attachment>,
    status: ClaimStatus,
    submitted_at: DateTime<Utc>,
    review: Option<Review>,
}

impl TransportClaim {
    /// Files a new claim: fresh id, submission time now, status pending
    pub fn submit(data: NewClaim) -> Self {
        Self {
            id: ClaimId::new_v7(),
            employee: data.employee,
            trip: data.trip,
            home_leg: data.home_leg,
            parking_fee: data.parking_fee,
            toll_fee: data.toll_fee,
            receipt: data.receipt,
            amounts: data.amounts,
            attachments: data.attachments,
            status: ClaimStatus::Pending,
            submitted_at: Utc::now(),
            review: None,
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn home_leg(&self) -> Option<&HomeLeg> {
        self.home_leg.as_ref()
    }

    pub fn parking_fee(&self) -> Option<Money> {
        self.parking_fee
    }

    pub fn toll_fee(&self) -> Option<Money> {
        self.toll_fee
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn amounts(&self) -> &AmountBreakdown {
        &self.amounts
    }

    pub fn final_amount(&self) -> Money {
        self.amounts.final_amount()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    pub fn reviewed_by(&self) -> Option<&str> {
        self.review.as_ref().map(|r| r.reviewed_by.as_str())
    }

    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.review.as_ref().map(|r| r.reviewed_at)
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.review.as_ref().and_then(|r| r.rejection_reason.as_deref())
    }

    /// Approves a pending claim
    pub fn approve(&mut self, reviewer: &str) -> Result<(), ClaimError> {
        self.apply(ReviewDecision::Approve, reviewer)
    }

    /// Rejects a pending claim; the reason must not be blank
    pub fn reject(&mut self, reviewer: &str, reason: &str) -> Result<(), ClaimError> {
        let decision = ReviewDecision::reject(reason)?;
        self.apply(decision, reviewer)
    }

    /// Applies a review decision to a pending claim
    pub fn apply(&mut self, decision: ReviewDecision, reviewer: &str) -> Result<(), ClaimError> {
        let target = decision.status();
        if self.status.is_terminal() {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }

        self.status = target;
        self.review = Some(Review {
            reviewed_by: reviewer.to_string(),
            reviewed_at: Utc::now(),
            rejection_reason: decision.into_rejection_reason(),
        });
        Ok(())
    }
}
