//! Claim form validation
//!
//! Validation never stops at the first problem. Every field is checked and
//! all errors are reported together so the whole form can be corrected in
//! one pass.
//!
//! # Validation Rules
//!
//! - Mode, to/from home, travel date, departure time, arrival time, from,
//!   to and reason are required
//! - Receipt amount is required for receipt-requiring modes
//! - Dates are `YYYY-MM-DD`, times are `HH:MM`
//! - Under the strict numeric policy every numeric field must be empty or a
//!   non-negative number no larger than the field maximum
//! - At most 2 attachments, 5 MB each, PDF/PNG/JPEG only

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field of the claim form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Mode,
    ToFromHome,
    TravelDate,
    DepartureTime,
    ArrivalTime,
    HomeDistance,
    HomeAmount,
    FromLocation,
    ToLocation,
    Reason,
    ReasonDetails,
    ParkingFee,
    Erp,
    ReceiptNumber,
    ReceiptAmount,
    Attachments,
}

impl FormField {
    /// Returns the label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Mode => "Mode of Transport",
            FormField::ToFromHome => "To / From Home",
            FormField::TravelDate => "Travel Date",
            FormField::DepartureTime => "Departure Time",
            FormField::ArrivalTime => "Arrival Time",
            FormField::HomeDistance => "Home to Office Distance (KM)",
            FormField::HomeAmount => "Home to Office Amount ($)",
            FormField::FromLocation => "From",
            FormField::ToLocation => "To",
            FormField::Reason => "Reason for Journey",
            FormField::ReasonDetails => "Reason (Details)",
            FormField::ParkingFee => "Parking Fee ($)",
            FormField::Erp => "ERP ($)",
            FormField::ReceiptNumber => "Receipt Number",
            FormField::ReceiptAmount => "Receipt Amount ($)",
            FormField::Attachments => "Attachments",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What is wrong with a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldProblem {
    Required,
    NotANumber { value: String },
    Negative { value: String },
    TooLarge { value: String, max: Decimal },
    InvalidDate { value: String },
    InvalidTime { value: String },
    UnknownOption { value: String },
    TooManyAttachments { count: usize, max: usize },
    AttachmentTooLarge { file_name: String, max_bytes: u64 },
    UnsupportedAttachment { file_name: String },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Required => write!(f, "is required"),
            FieldProblem::NotANumber { value } => write!(f, "'{}' is not a number", value),
            FieldProblem::Negative { value } => write!(f, "'{}' must not be negative", value),
            FieldProblem::TooLarge { value, max } => {
                write!(f, "'{}' exceeds the maximum of {}", value, max)
            }
            FieldProblem::InvalidDate { value } => write!(f, "'{}' is not a YYYY-MM-DD date", value),
            FieldProblem::InvalidTime { value } => write!(f, "'{}' is not an HH:MM time", value),
            FieldProblem::UnknownOption { value } => write!(f, "'{}' is not one of the options", value),
            FieldProblem::TooManyAttachments { count, max } => {
                write!(f, "{} files attached, at most {} allowed", count, max)
            }
            FieldProblem::AttachmentTooLarge { file_name, max_bytes } => {
                write!(f, "{} exceeds {} bytes", file_name, max_bytes)
            }
            FieldProblem::UnsupportedAttachment { file_name } => {
                write!(f, "{} is not a PDF, PNG or JPEG file", file_name)
            }
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub problem: FieldProblem,
}

impl FieldError {
    pub fn new(field: FormField, problem: FieldProblem) -> Self {
        Self { field, problem }
    }

    pub fn required(field: FormField) -> Self {
        Self::new(field, FieldProblem::Required)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// All validation failures found on a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error to the list
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Records the error side of a field check, passing the value through
    pub fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns true if any error concerns the given field
    pub fn has_error_for(&self, field: FormField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Converts into a result: `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}
