//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money};
use domain_claims::{ClaimForm, Employee, TransportMode};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::ClaimFormBuilder;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::SGD),
        Just(Currency::MYR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
    ]
}

/// Strategy for generating non-negative amounts in minor units
pub fn fee_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..100_000i64
}

/// Strategy for generating SGD fees
pub fn sgd_fee_strategy() -> impl Strategy<Value = Money> {
    fee_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::SGD))
}

/// Strategy for generating Money values in any supported currency
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (fee_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Strategy for trip distances in kilometers, up to two decimals
pub fn distance_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..50_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for well-formed amount text as typed into the form
pub fn amount_text_strategy() -> impl Strategy<Value = String> {
    (0i64..100_000i64, 0u32..3u32).prop_map(|(n, scale)| Decimal::new(n, scale).to_string())
}

/// Strategy for amount text far beyond any sensible fee, up to the
/// largest value a `Decimal` holds
pub fn extreme_amount_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(Decimal::MAX.to_string()),
        Just(Decimal::MIN.to_string()),
        any::<u64>().prop_map(|n| n.to_string()),
        (any::<i64>(), 0u32..=28u32).prop_map(|(n, scale)| Decimal::new(n, scale).to_string()),
        Just("1e40".to_string()),
    ]
}

/// Strategy for anything that may end up in a numeric field, including
/// empty, unparsable and out-of-range text
pub fn numeric_field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => amount_text_strategy(),
        1 => extreme_amount_text_strategy(),
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        1 => "[a-z]{1,6}",
    ]
}

/// Strategy for transport modes
pub fn transport_mode_strategy() -> impl Strategy<Value = TransportMode> {
    proptest::sample::select(TransportMode::ALL.to_vec())
}

/// Strategy for the employees in the demo directory
pub fn employee_strategy() -> impl Strategy<Value = Employee> {
    prop_oneof![
        Just(Employee::new("employee@dasi.com", "John Employee")),
        Just(Employee::new("employee2@dasi.com", "Jane Employee")),
        Just(Employee::new("admin@dasi.com", "Admin User")),
        Just(Employee::new("manager@dasi.com", "Department Manager")),
    ]
}

/// Strategy for forms that pass strict validation
pub fn valid_form_strategy() -> impl Strategy<Value = ClaimForm> {
    (
        transport_mode_strategy(),
        any::<bool>(),
        amount_text_strategy(),
        amount_text_strategy(),
        amount_text_strategy(),
        amount_text_strategy(),
    )
        .prop_map(|(mode, home, distance, parking, receipt, home_amount)| {
            let mut builder = ClaimFormBuilder::new().mode(mode.label()).parking(&parking);
            if home {
                builder = builder.home_leg(&distance, &home_amount);
            }
            if mode.requires_receipt() {
                builder = builder.receipt("R-1", &receipt);
            }
            builder.build()
        })
}

/// Strategy for a sequence of submissions by various employees
pub fn submissions_strategy(max: usize) -> impl Strategy<Value = Vec<(Employee, ClaimForm)>> {
    proptest::collection::vec((employee_strategy(), valid_form_strategy()), 0..max)
}
