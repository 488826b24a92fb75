//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{ClaimId, Money};
use domain_claims::{AmountBreakdown, ClaimStatus, ClaimStore, FormField, TransportClaim, ValidationErrors};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value has the given amount
pub fn assert_amount(money: &Money, expected: Decimal) {
    assert_eq!(
        money.amount(),
        expected,
        "Expected {} {}, got {}",
        money.currency().symbol(),
        expected,
        money
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that the final amount is exactly the sum of its components and
/// that every figure is shown to the cent
pub fn assert_breakdown_consistent(breakdown: &AmountBreakdown) {
    let parts = [
        breakdown.computed(),
        breakdown.parking_fee(),
        breakdown.toll_fee(),
        breakdown.home_amount(),
    ];
    let sum: Decimal = parts.iter().map(|m| m.amount()).sum();

    assert_eq!(
        breakdown.final_amount().amount(),
        sum,
        "Final amount {} is not computed + parking + toll + home ({})",
        breakdown.final_amount(),
        sum
    );

    for money in parts.iter().chain(std::iter::once(&breakdown.final_amount())) {
        assert!(
            money.amount().scale() <= 2,
            "Amount {} is not rounded to cents",
            money
        );
        assert_eq!(money.currency(), breakdown.currency(), "Mixed currencies in breakdown");
    }
}

/// Asserts a claim's status and that review metadata matches it
pub fn assert_claim_status(claim: &TransportClaim, expected: ClaimStatus) {
    assert_eq!(claim.status(), expected, "Unexpected status for {}", claim.id());

    match expected {
        ClaimStatus::Pending => {
            assert!(claim.review().is_none(), "Pending claim {} has review data", claim.id());
        }
        ClaimStatus::Approved => {
            assert!(claim.reviewed_by().is_some(), "Approved claim {} has no reviewer", claim.id());
            assert!(claim.rejection_reason().is_none(), "Approved claim {} has a rejection reason", claim.id());
        }
        ClaimStatus::Rejected => {
            assert!(claim.reviewed_by().is_some(), "Rejected claim {} has no reviewer", claim.id());
            assert!(
                claim.rejection_reason().map_or(false, |r| !r.trim().is_empty()),
                "Rejected claim {} has no reason",
                claim.id()
            );
        }
    }
}

/// Asserts that validation failed on exactly the given fields, in any order
pub fn assert_invalid_fields(errors: &ValidationErrors, expected: &[FormField]) {
    for field in expected {
        assert!(
            errors.has_error_for(*field),
            "Expected an error for {}, got: {}",
            field,
            errors
        );
    }
    for error in errors.errors() {
        assert!(
            expected.contains(&error.field),
            "Unexpected error: {}",
            error
        );
    }
}

/// Asserts that the store lists the given ids in this order
pub fn assert_store_order(store: &ClaimStore, expected: &[ClaimId]) {
    let actual: Vec<ClaimId> = store.all_claims().iter().map(|c| c.id()).collect();
    assert_eq!(actual, expected, "Store order differs from submission order");
}
