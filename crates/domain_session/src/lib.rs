//! Session Domain
//!
//! Everything around the claims domain that decides who is acting and what
//! they see:
//!
//! - **Directory**: a static table of users sharing one password
//! - **Role**: employee or reviewer, as an enum
//! - **Session**: a user acting in one of their roles
//! - **Dashboard**: the role-specific view over the claim store
//! - **Shell**: login, role switching and routing between the two
//!
//! # Examples
//!
//! ```rust
//! use domain_claims::ClaimStore;
//! use domain_session::{Role, SessionShell, View};
//!
//! let store = ClaimStore::new();
//! let mut shell = SessionShell::default();
//!
//! shell.login("admin@dasi.com", "password123").unwrap();
//! shell.switch_role(Role::Reviewer).unwrap();
//!
//! match shell.view(&store) {
//!     View::Dashboard(dashboard) => assert_eq!(dashboard.role(), Role::Reviewer),
//!     View::Login => unreachable!(),
//! }
//! ```

pub mod dashboard;
pub mod directory;
pub mod error;
pub mod role;
pub mod session;
pub mod shell;

pub use dashboard::{Dashboard, EmployeeDashboard, ReviewerDashboard};
pub use directory::{User, UserDirectory, DEMO_PASSWORD};
pub use error::SessionError;
pub use role::Role;
pub use session::Session;
pub use shell::{SessionShell, View};
