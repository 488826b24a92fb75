//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims workflow. These fixtures
//! are consistent and predictable for unit tests.

use chrono::{NaiveDate, NaiveTime};
use core_kernel::{Currency, Money};
use domain_claims::{ClaimForm, Employee};
use domain_session::{Role, User};
use rust_decimal_macros::dec;

use crate::builders::ClaimFormBuilder;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Two Singapore dollars, the usual parking fee in the scenarios
    pub fn sgd_parking() -> Money {
        Money::new(dec!(2.00), Currency::SGD)
    }

    /// Mileage amount for a 10 km car trip at the default rate
    pub fn sgd_ten_km() -> Money {
        Money::new(dec!(4.70), Currency::SGD)
    }

    /// Creates a zero amount
    pub fn sgd_zero() -> Money {
        Money::zero(Currency::SGD)
    }

    /// Creates a MYR amount for currency mismatch tests
    pub fn myr_10() -> Money {
        Money::new(dec!(10.00), Currency::MYR)
    }
}

/// Fixture for trip dates and times
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn travel_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    pub fn late_departure() -> NaiveTime {
        NaiveTime::from_hms_opt(21, 30, 0).unwrap()
    }

    pub fn late_arrival() -> NaiveTime {
        NaiveTime::from_hms_opt(22, 15, 0).unwrap()
    }
}

/// Fixture for directory accounts
pub struct UserFixtures;

impl UserFixtures {
    /// Employee-only account
    pub fn john() -> User {
        User::new("employee@dasi.com", "John Employee", &[Role::Employee])
    }

    /// Second employee-only account
    pub fn jane() -> User {
        User::new("employee2@dasi.com", "Jane Employee", &[Role::Employee])
    }

    /// Reviewer-only account
    pub fn sarah() -> User {
        User::new("recruiter@dasi.com", "Sarah Recruiter", &[Role::Reviewer])
    }

    /// Account holding both roles
    pub fn admin() -> User {
        User::new("admin@dasi.com", "Admin User", &[Role::Employee, Role::Reviewer])
    }

    pub fn john_employee() -> Employee {
        Self::john().as_employee()
    }

    pub fn jane_employee() -> Employee {
        Self::jane().as_employee()
    }
}

/// Fixture for filled-in claim forms
pub struct FormFixtures;

impl FormFixtures {
    /// Car trip home after overtime: 10 km, parking 2, computed 4.70, final 6.70
    pub fn car_home_trip() -> ClaimForm {
        ClaimFormBuilder::car().build()
    }

    /// Early taxi trip with a receipt
    pub fn taxi_receipt(amount: &str) -> ClaimForm {
        ClaimFormBuilder::taxi(amount).build()
    }

    /// Bus trip with a fare receipt and no home leg
    pub fn bus_receipt() -> ClaimForm {
        ClaimFormBuilder::new()
            .mode("Bus / MRT / LRT")
            .receipt("EZ-100", "1.85")
            .build()
    }

    /// A form where nothing has been filled in
    pub fn blank() -> ClaimForm {
        ClaimForm::default()
    }
}
