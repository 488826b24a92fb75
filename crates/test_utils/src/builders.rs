//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::ClaimId;
use domain_claims::{ClaimForm, ClaimStore, Employee, FormField, ReviewDecision, SubmissionRules};

use crate::fixtures::TemporalFixtures;

/// Builder for claim forms
///
/// Starts from a complete trip without a mode. Pick a mode with
/// [`mode`](Self::mode) or start from [`car`](Self::car) or
/// [`taxi`](Self::taxi).
#[derive(Debug, Clone)]
pub struct ClaimFormBuilder {
    form: ClaimForm,
}

impl Default for ClaimFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimFormBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        let form = ClaimForm {
            to_from_home: "No".to_string(),
            travel_date: TemporalFixtures::travel_date().format("%Y-%m-%d").to_string(),
            departure_time: TemporalFixtures::late_departure().format("%H:%M").to_string(),
            arrival_time: TemporalFixtures::late_arrival().format("%H:%M").to_string(),
            from_location: "Changi Business Park".to_string(),
            to_location: "Tampines".to_string(),
            reason: "Overtime".to_string(),
            ..Default::default()
        };
        Self { form }
    }

    /// Car trip home, 10 km, parking 2
    pub fn car() -> Self {
        Self::new()
            .mode("Car")
            .home_leg("10", "0")
            .parking("2")
            .erp("0")
    }

    /// Early morning taxi trip with a receipt
    pub fn taxi(amount: &str) -> Self {
        Self::new()
            .mode("Taxi / Private Hire")
            .times("05:40", "06:10")
            .locations("Woodlands", "Raffles Place")
            .reason("Required to report to work before 6:30 am")
            .receipt("TX-8812", amount)
    }

    pub fn mode(mut self, mode: &str) -> Self {
        self.form.mode = mode.to_string();
        self
    }

    /// Marks the trip as to or from home and fills the home-leg fields
    pub fn home_leg(mut self, distance: &str, amount: &str) -> Self {
        self.form.to_from_home = "Yes".to_string();
        self.form.home_distance = distance.to_string();
        self.form.home_amount = amount.to_string();
        self
    }

    /// Marks the trip as not involving home; home-leg text is kept as typed
    pub fn no_home_leg(mut self) -> Self {
        self.form.to_from_home = "No".to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.form.travel_date = date.to_string();
        self
    }

    pub fn times(mut self, departure: &str, arrival: &str) -> Self {
        self.form.departure_time = departure.to_string();
        self.form.arrival_time = arrival.to_string();
        self
    }

    pub fn locations(mut self, from: &str, to: &str) -> Self {
        self.form.from_location = from.to_string();
        self.form.to_location = to.to_string();
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.form.reason = reason.to_string();
        self
    }

    pub fn reason_details(mut self, details: &str) -> Self {
        self.form.reason_details = details.to_string();
        self
    }

    pub fn parking(mut self, fee: &str) -> Self {
        self.form.parking_fee = fee.to_string();
        self
    }

    pub fn erp(mut self, fee: &str) -> Self {
        self.form.erp = fee.to_string();
        self
    }

    pub fn receipt(mut self, number: &str, amount: &str) -> Self {
        self.form.receipt_number = number.to_string();
        self.form.receipt_amount = amount.to_string();
        self
    }

    pub fn attach(mut self, file_name: &str, size_bytes: u64) -> Self {
        self.form.attach(file_name, size_bytes);
        self
    }

    /// Sets any text field by name
    pub fn field(mut self, field: FormField, value: &str) -> Self {
        self.form.set(field, value);
        self
    }

    pub fn build(self) -> ClaimForm {
        self.form
    }
}

/// Builder for a claim store with claims already filed
#[derive(Debug, Default)]
pub struct ClaimStoreBuilder {
    rules: SubmissionRules,
    submissions: Vec<(Employee, ClaimForm)>,
    decisions: Vec<(usize, ReviewDecision, String)>,
}

impl ClaimStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: SubmissionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Files a form for an employee; forms must be valid
    pub fn submit(mut self, employee: Employee, form: ClaimForm) -> Self {
        self.submissions.push((employee, form));
        self
    }

    /// Reviews the claim at the given submission index
    pub fn review(mut self, index: usize, decision: ReviewDecision, reviewer: &str) -> Self {
        self.decisions.push((index, decision, reviewer.to_string()));
        self
    }

    /// Builds the store and returns the ids in submission order
    ///
    /// # Panics
    ///
    /// Panics if a form does not validate or a review fails
    pub fn build(self) -> (ClaimStore, Vec<ClaimId>) {
        let mut store = ClaimStore::new();
        let ids: Vec<ClaimId> = self
            .submissions
            .iter()
            .map(|(employee, form)| {
                form.submit(employee, &self.rules, &mut store)
                    .unwrap_or_else(|e| panic!("fixture form should be valid: {}", e))
            })
            .collect();

        for (index, decision, reviewer) in self.decisions {
            store
                .update_claim_status(ids[index], decision, &reviewer)
                .unwrap_or_else(|e| panic!("fixture review should succeed: {}", e));
        }

        (store, ids)
    }
}
