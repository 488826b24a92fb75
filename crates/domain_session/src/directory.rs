//! Static user directory and credential check
//!
//! The directory is a fixed table of accounts sharing one password. It
//! exists so the rest of the system has someone to act as; it is not a
//! security boundary.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use domain_claims::Employee;
use crate::error::SessionError;
use crate::role::Role;

/// Password shared by the demo accounts
pub const DEMO_PASSWORD: &str = "password123";

/// An account in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    /// Roles in the order they are offered; the first one is the default
    pub roles: Vec<Role>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, roles: &[Role]) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            roles: roles.to_vec(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Role a fresh session starts in
    pub fn default_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }

    /// Claim ownership identity for this user
    pub fn as_employee(&self) -> Employee {
        Employee::new(self.email.clone(), self.name.clone())
    }
}

/// Lookup table of known users
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    shared_password: String,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

impl UserDirectory {
    /// Creates an empty directory
    pub fn new(shared_password: impl Into<String>) -> Self {
        Self {
            users: Vec::new(),
            shared_password: shared_password.into(),
        }
    }

    /// The six demo accounts
    pub fn demo() -> Self {
        use Role::{Employee, Reviewer};

        Self::new(DEMO_PASSWORD)
            .with_user(User::new("employee@dasi.com", "John Employee", &[Employee]))
            .with_user(User::new("employee2@dasi.com", "Jane Employee", &[Employee]))
            .with_user(User::new("recruiter@dasi.com", "Sarah Recruiter", &[Reviewer]))
            .with_user(User::new("hr@dasi.com", "HR Manager", &[Reviewer]))
            .with_user(User::new("admin@dasi.com", "Admin User", &[Employee, Reviewer]))
            .with_user(User::new("manager@dasi.com", "Department Manager", &[Employee, Reviewer]))
    }

    /// Adds or replaces an account
    pub fn with_user(mut self, user: User) -> Self {
        self.users.retain(|u| u.email != user.email);
        self.users.push(user);
        self
    }

    /// Replaces the shared password
    pub fn with_shared_password(mut self, password: impl Into<String>) -> Self {
        self.shared_password = password.into();
        self
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Finds an account by exact email
    pub fn find(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Checks an email/password pair
    ///
    /// # Errors
    ///
    /// * `MissingCredentials` - either field is empty
    /// * `InvalidCredentials` - unknown email or wrong password
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        match self.find(email) {
            Some(user) if password == self.shared_password => {
                debug!(email = %email, "Login succeeded");
                Ok(user.clone())
            }
            _ => {
                warn!(email = %email, "Login failed");
                Err(SessionError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_directory_accounts() {
        let directory = UserDirectory::demo();
        assert_eq!(directory.users().len(), 6);

        let admin = directory.find("admin@dasi.com").unwrap();
        assert_eq!(admin.roles, vec![Role::Employee, Role::Reviewer]);

        let sarah = directory.find("recruiter@dasi.com").unwrap();
        assert_eq!(sarah.default_role(), Some(Role::Reviewer));
    }

    #[test]
    fn test_with_user_replaces_same_email() {
        let directory = UserDirectory::new("pw")
            .with_user(User::new("a@dasi.com", "First", &[Role::Employee]))
            .with_user(User::new("a@dasi.com", "Second", &[Role::Reviewer]));

        assert_eq!(directory.users().len(), 1);
        assert_eq!(directory.find("a@dasi.com").unwrap().name, "Second");
    }

    #[test]
    fn test_as_employee() {
        let user = User::new("employee@dasi.com", "John Employee", &[Role::Employee]);
        let employee = user.as_employee();
        assert_eq!(employee.email, "employee@dasi.com");
        assert_eq!(employee.name, "John Employee");
    }
}
