//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! transport claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for users, forms and money
//! - `builders`: Builder patterns for claim forms and seeded stores
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
