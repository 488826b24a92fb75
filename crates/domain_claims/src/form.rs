//! Claim form
//!
//! The form keeps every field as the raw text the employee typed or
//! selected. The amount preview is recalculated from that text on demand,
//! and submission turns it into a typed [`NewClaim`] or a list of
//! validation errors.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use core_kernel::{ClaimId, Money};
use crate::calculator::{is_present, parse_lenient, parse_strict, AmountBreakdown, AmountCalculator, AmountInputs};
use crate::claim::{
    parse_yes_no, Attachment, Employee, HomeLeg, JourneyReason, NewClaim, Receipt, TransportMode, Trip,
};
use crate::error::ClaimError;
use crate::store::ClaimStore;
use crate::validation::{FieldError, FieldProblem, FormField, ValidationErrors};

/// Maximum number of files on one claim
pub const MAX_ATTACHMENTS: usize = 2;

/// Maximum size of one attached file
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const ATTACHMENT_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// How numeric text that does not parse is handled at submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Refuse the submission and name the offending field
    #[default]
    Strict,
    /// Count the field as zero and submit anyway
    Lenient,
}

impl FromStr for NumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(NumericPolicy::Strict),
            "lenient" => Ok(NumericPolicy::Lenient),
            other => Err(format!("unknown numeric policy: {}", other)),
        }
    }
}

/// Settings that shape a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionRules {
    pub calculator: AmountCalculator,
    pub numeric_policy: NumericPolicy,
}

/// Raw state of the transport claim form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimForm {
    pub mode: String,
    pub to_from_home: String,
    pub travel_date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub home_distance: String,
    pub home_amount: String,
    pub from_location: String,
    pub to_location: String,
    pub reason: String,
    pub reason_details: String,
    pub parking_fee: String,
    pub erp: String,
    pub receipt_number: String,
    pub receipt_amount: String,
    pub attachments: Vec<Attachment>,
}

/// Fields that passed validation, typed
struct CheckedFields {
    mode: TransportMode,
    home_leg: bool,
    trip: Trip,
}

impl ClaimForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_field_mut(&mut self, field: FormField) -> Option<&mut String> {
        let slot = match field {
            FormField::Mode => &mut self.mode,
            FormField::ToFromHome => &mut self.to_from_home,
            FormField::TravelDate => &mut self.travel_date,
            FormField::DepartureTime => &mut self.departure_time,
            FormField::ArrivalTime => &mut self.arrival_time,
            FormField::HomeDistance => &mut self.home_distance,
            FormField::HomeAmount => &mut self.home_amount,
            FormField::FromLocation => &mut self.from_location,
            FormField::ToLocation => &mut self.to_location,
            FormField::Reason => &mut self.reason,
            FormField::ReasonDetails => &mut self.reason_details,
            FormField::ParkingFee => &mut self.parking_fee,
            FormField::Erp => &mut self.erp,
            FormField::ReceiptNumber => &mut self.receipt_number,
            FormField::ReceiptAmount => &mut self.receipt_amount,
            FormField::Attachments => return None,
        };
        Some(slot)
    }

    /// Sets a text field; returns false for fields that are not text
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.text_field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Adds a file to the claim
    pub fn attach(&mut self, file_name: impl Into<String>, size_bytes: u64) {
        self.attachments.push(Attachment {
            file_name: file_name.into(),
            size_bytes,
        });
    }

    /// The selected mode, if it is one of the options
    pub fn selected_mode(&self) -> Option<TransportMode> {
        self.mode.parse().ok()
    }

    /// True when "To / From Home" is "Yes"
    pub fn is_home_leg(&self) -> bool {
        matches!(parse_yes_no(&self.to_from_home), Ok(true))
    }

    /// True when receipt number and amount are part of the form
    pub fn shows_receipt_fields(&self) -> bool {
        self.selected_mode().map_or(false, |m| m.requires_receipt())
    }

    /// Amount inputs as currently visible on the form
    ///
    /// Home-leg fields count only when the trip is to or from home, and the
    /// receipt amount only for receipt-requiring modes.
    pub fn amount_inputs(&self) -> AmountInputs<'_> {
        let home_leg = self.is_home_leg();
        let receipt = self.shows_receipt_fields();

        AmountInputs {
            mode: self.selected_mode(),
            distance_km: if home_leg { &self.home_distance } else { "" },
            receipt_amount: if receipt { &self.receipt_amount } else { "" },
            parking_fee: &self.parking_fee,
            toll_fee: &self.erp,
            home_amount: if home_leg { &self.home_amount } else { "" },
        }
    }

    /// Live computed and final amounts for the current input
    pub fn preview(&self, calculator: &AmountCalculator) -> AmountBreakdown {
        calculator.calculate(&self.amount_inputs())
    }

    /// Checks every field without submitting
    pub fn validate(&self, rules: &SubmissionRules) -> Result<(), ValidationErrors> {
        self.check(rules).map(|_| ())
    }

    /// Turns the form into claim data for the given employee
    pub fn to_new_claim(
        &self,
        employee: &Employee,
        rules: &SubmissionRules,
    ) -> Result<NewClaim, ValidationErrors> {
        let checked = self.check(rules)?;
        let currency = rules.calculator.currency();
        let money = |text: &str| Money::new(parse_lenient(text), currency).round_to_currency();
        let optional_money = |text: &str| is_present(text).then(|| money(text));

        let home_leg = checked.home_leg.then(|| HomeLeg {
            distance_km: is_present(&self.home_distance).then(|| parse_lenient(&self.home_distance)),
            amount: optional_money(&self.home_amount),
        });

        let receipt = checked.mode.requires_receipt().then(|| Receipt {
            number: non_blank(&self.receipt_number),
            amount: money(&self.receipt_amount),
        });

        Ok(NewClaim {
            employee: employee.clone(),
            trip: checked.trip,
            home_leg,
            parking_fee: optional_money(&self.parking_fee),
            toll_fee: optional_money(&self.erp),
            receipt,
            amounts: self.preview(&rules.calculator),
            attachments: self.attachments.clone(),
        })
    }

    /// Validates the form and files the claim in the store
    ///
    /// Nothing is added to the store when validation fails.
    pub fn submit(
        &self,
        employee: &Employee,
        rules: &SubmissionRules,
        store: &mut ClaimStore,
    ) -> Result<ClaimId, ClaimError> {
        let data = self.to_new_claim(employee, rules)?;
        Ok(store.add_claim(data).id())
    }

    fn check(&self, rules: &SubmissionRules) -> Result<CheckedFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mode = errors.collect(required_choice(FormField::Mode, &self.mode, |s| s.parse::<TransportMode>()));
        let home_leg = errors.collect(required_choice(FormField::ToFromHome, &self.to_from_home, parse_yes_no));
        let travel_date = errors.collect(required_date(FormField::TravelDate, &self.travel_date));
        let departure_time = errors.collect(required_time(FormField::DepartureTime, &self.departure_time));
        let arrival_time = errors.collect(required_time(FormField::ArrivalTime, &self.arrival_time));
        let from_location = errors.collect(required_text(FormField::FromLocation, &self.from_location));
        let to_location = errors.collect(required_text(FormField::ToLocation, &self.to_location));
        let reason = errors.collect(required_choice(FormField::Reason, &self.reason, |s| s.parse::<JourneyReason>()));

        let receipt_mode = mode.map_or(false, |m| m.requires_receipt());
        if receipt_mode && !is_present(&self.receipt_amount) {
            errors.push(FieldError::required(FormField::ReceiptAmount));
        }

        if rules.numeric_policy == NumericPolicy::Strict {
            let home = home_leg == Some(true);
            let numeric_fields = [
                (FormField::HomeDistance, &self.home_distance, home),
                (FormField::HomeAmount, &self.home_amount, home),
                (FormField::ParkingFee, &self.parking_fee, true),
                (FormField::Erp, &self.erp, true),
                (FormField::ReceiptAmount, &self.receipt_amount, receipt_mode),
            ];
            for (field, text, visible) in numeric_fields {
                if visible {
                    errors.collect(parse_strict(field, text));
                }
            }
        }

        self.check_attachments(&mut errors);

        match (mode, home_leg, travel_date, departure_time, arrival_time, from_location, to_location, reason) {
            (Some(mode), Some(home_leg), Some(travel_date), Some(departure_time), Some(arrival_time), Some(from_location), Some(to_location), Some(reason))
                if errors.is_empty() =>
            {
                Ok(CheckedFields {
                    mode,
                    home_leg,
                    trip: Trip {
                        mode,
                        travel_date,
                        departure_time,
                        arrival_time,
                        from_location,
                        to_location,
                        reason,
                        reason_details: non_blank(&self.reason_details),
                    },
                })
            }
            _ => Err(errors),
        }
    }

    fn check_attachments(&self, errors: &mut ValidationErrors) {
        if self.attachments.len() > MAX_ATTACHMENTS {
            errors.push(FieldError::new(
                FormField::Attachments,
                FieldProblem::TooManyAttachments {
                    count: self.attachments.len(),
                    max: MAX_ATTACHMENTS,
                },
            ));
        }

        for attachment in &self.attachments {
            let extension = Path::new(&attachment.file_name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            let supported = extension
                .as_deref()
                .map_or(false, |e| ATTACHMENT_EXTENSIONS.contains(&e));

            if !supported {
                errors.push(FieldError::new(
                    FormField::Attachments,
                    FieldProblem::UnsupportedAttachment {
                        file_name: attachment.file_name.clone(),
                    },
                ));
            }
            if attachment.size_bytes > MAX_ATTACHMENT_BYTES {
                errors.push(FieldError::new(
                    FormField::Attachments,
                    FieldProblem::AttachmentTooLarge {
                        file_name: attachment.file_name.clone(),
                        max_bytes: MAX_ATTACHMENT_BYTES,
                    },
                ));
            }
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_text(field: FormField, text: &str) -> Result<String, FieldError> {
    non_blank(text).ok_or_else(|| FieldError::required(field))
}

fn required_choice<T, E>(
    field: FormField,
    text: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<T, FieldError> {
    let value = required_text(field, text)?;
    parse(&value).map_err(|_| FieldError::new(field, FieldProblem::UnknownOption { value }))
}

fn required_date(field: FormField, text: &str) -> Result<NaiveDate, FieldError> {
    let value = required_text(field, text)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| FieldError::new(field, FieldProblem::InvalidDate { value }))
}

fn required_time(field: FormField, text: &str) -> Result<NaiveTime, FieldError> {
    let value = required_text(field, text)?;
    NaiveTime::parse_from_str(&value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
        .map_err(|_| FieldError::new(field, FieldProblem::InvalidTime { value }))
}
