//! Reimbursement amount calculation
//!
//! The calculator is a pure function of the amount-bearing form fields. It
//! runs on every field change to refresh the preview, and once more at
//! submission to fix the amounts stored on the claim.
//!
//! # Rule
//!
//! ```text
//! computed = distance × rate   if the mode is mileage-based and a distance is given
//!          = receipt amount    otherwise, if a receipt amount is given
//!          = 0                 otherwise
//! final    = computed + parking fee + ERP + home-leg amount
//! ```
//!
//! Every input is text. Empty or unparsable text counts as zero here, and so
//! does any value beyond [`MAX_FIELD_VALUE`]; the claim form decides
//! separately whether such text may be submitted (see
//! [`crate::form::NumericPolicy`]).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::str::FromStr;
use tracing::warn;

use core_kernel::{Currency, Money, MoneyError};
use crate::claim::TransportMode;
use crate::validation::{FieldError, FieldProblem, FormField};

/// Standard mileage reimbursement per kilometre
pub const DEFAULT_RATE_PER_KM: Decimal = dec!(0.47);

/// Largest value any numeric field accepts
pub const MAX_FIELD_VALUE: Decimal = dec!(1000000000);

/// The amount-bearing fields of a claim form, as entered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountInputs<'a> {
    pub mode: Option<TransportMode>,
    pub distance_km: &'a str,
    pub receipt_amount: &'a str,
    pub parking_fee: &'a str,
    pub toll_fee: &'a str,
    pub home_amount: &'a str,
}

/// Result of an amount calculation
///
/// Each component is rounded to the currency's minor unit and the final
/// amount is the exact sum of the rounded components, so
/// `final == computed + parking + toll + home` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmountBreakdown {
    computed: Money,
    parking_fee: Money,
    toll_fee: Money,
    home_amount: Money,
    final_amount: Money,
}

impl AmountBreakdown {
    /// A breakdown with every figure at zero
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            computed: zero,
            parking_fee: zero,
            toll_fee: zero,
            home_amount: zero,
            final_amount: zero,
        }
    }

    /// Mode-dependent base amount
    pub fn computed(&self) -> Money {
        self.computed
    }

    pub fn parking_fee(&self) -> Money {
        self.parking_fee
    }

    /// Road-toll (ERP) fee
    pub fn toll_fee(&self) -> Money {
        self.toll_fee
    }

    pub fn home_amount(&self) -> Money {
        self.home_amount
    }

    /// Amount to reimburse
    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    pub fn currency(&self) -> Currency {
        self.final_amount.currency()
    }

    /// Recomputes the sum of the four components
    pub fn components_total(&self) -> Result<Money, MoneyError> {
        Money::checked_sum(
            self.currency(),
            &[self.computed, self.parking_fee, self.toll_fee, self.home_amount],
        )
    }
}

/// Computes reimbursement amounts from form input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountCalculator {
    rate_per_km: Decimal,
    currency: Currency,
}

impl Default for AmountCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_PER_KM, Currency::SGD)
    }
}

impl AmountCalculator {
    /// Creates a calculator with the given mileage rate and claim currency
    pub fn new(rate_per_km: Decimal, currency: Currency) -> Self {
        Self { rate_per_km, currency }
    }

    pub fn rate_per_km(&self) -> Decimal {
        self.rate_per_km
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Computes the base and final amounts for the given inputs
    pub fn calculate(&self, inputs: &AmountInputs<'_>) -> AmountBreakdown {
        let mileage_based = inputs.mode.map_or(false, |m| m.is_mileage_based());

        let computed = if mileage_based && is_present(inputs.distance_km) {
            parse_lenient(inputs.distance_km)
                .checked_mul(self.rate_per_km)
                .unwrap_or(Decimal::ZERO)
        } else if is_present(inputs.receipt_amount) {
            parse_lenient(inputs.receipt_amount)
        } else {
            Decimal::ZERO
        };

        let computed = self.money(computed);
        let parking_fee = self.money(parse_lenient(inputs.parking_fee));
        let toll_fee = self.money(parse_lenient(inputs.toll_fee));
        let home_amount = self.money(parse_lenient(inputs.home_amount));

        let mut breakdown = AmountBreakdown {
            computed,
            parking_fee,
            toll_fee,
            home_amount,
            final_amount: Money::zero(self.currency),
        };

        match breakdown.components_total() {
            Ok(total) => {
                breakdown.final_amount = total;
                breakdown
            }
            Err(err) => {
                warn!(error = %err, "Amount out of range, reporting zero");
                AmountBreakdown::zero(self.currency)
            }
        }
    }

    fn money(&self, amount: Decimal) -> Money {
        Money::new(amount, self.currency).round_to_currency()
    }
}

/// True when the field holds anything other than whitespace
pub fn is_present(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Parses numeric form text, treating empty, unparsable or out-of-range
/// text as zero
pub fn parse_lenient(text: &str) -> Decimal {
    parse_number(text)
        .filter(|value| value.abs() <= MAX_FIELD_VALUE)
        .unwrap_or(Decimal::ZERO)
}

/// Parses numeric form text, reporting anything that is not a
/// non-negative number
///
/// Empty text is `Ok(None)`; whether the field is required is decided by
/// the caller.
pub fn parse_strict(field: FormField, text: &str) -> Result<Option<Decimal>, FieldError> {
    if !is_present(text) {
        return Ok(None);
    }

    let value = parse_number(text).ok_or_else(|| {
        FieldError::new(field, FieldProblem::NotANumber { value: text.trim().to_string() })
    })?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::new(
            field,
            FieldProblem::Negative { value: text.trim().to_string() },
        ));
    }

    if value > MAX_FIELD_VALUE {
        return Err(FieldError::new(
            field,
            FieldProblem::TooLarge { value: text.trim().to_string(), max: MAX_FIELD_VALUE },
        ));
    }

    Ok(Some(value))
}

fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn amount_text() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-z]{1,5}",
            (0u32..100_000u32).prop_map(|n| Decimal::new(n as i64, 2).to_string()),
            any::<u64>().prop_map(|n| n.to_string()),
            Just(Decimal::MAX.to_string()),
        ]
    }

    fn mode() -> impl Strategy<Value = Option<TransportMode>> {
        prop_oneof![
            Just(None),
            Just(Some(TransportMode::TaxiPrivateHire)),
            Just(Some(TransportMode::Car)),
            Just(Some(TransportMode::Motorcycle)),
            Just(Some(TransportMode::BusMrtLrt)),
        ]
    }

    proptest! {
        #[test]
        fn final_is_sum_of_components(
            mode in mode(),
            distance in amount_text(),
            receipt in amount_text(),
            parking in amount_text(),
            toll in amount_text(),
            home in amount_text(),
        ) {
            let inputs = AmountInputs {
                mode,
                distance_km: &distance,
                receipt_amount: &receipt,
                parking_fee: &parking,
                toll_fee: &toll,
                home_amount: &home,
            };
            let breakdown = AmountCalculator::default().calculate(&inputs);

            let expected = breakdown.computed().amount()
                + parse_lenient(&parking).round_dp(2)
                + parse_lenient(&toll).round_dp(2)
                + parse_lenient(&home).round_dp(2);
            prop_assert_eq!(breakdown.final_amount().amount(), expected);
            prop_assert_eq!(breakdown.final_amount(), breakdown.components_total().unwrap());
        }

        #[test]
        fn mileage_without_receipt_is_distance_times_rate(centi_km in 0u32..1_000_000u32) {
            let distance = Decimal::new(centi_km as i64, 2).to_string();
            let inputs = AmountInputs {
                mode: Some(TransportMode::Car),
                distance_km: &distance,
                ..Default::default()
            };
            let breakdown = AmountCalculator::default().calculate(&inputs);

            let expected = Money::new(
                Decimal::new(centi_km as i64, 2) * DEFAULT_RATE_PER_KM,
                Currency::SGD,
            )
            .round_to_currency();
            prop_assert_eq!(breakdown.computed(), expected);
        }
    }
}
