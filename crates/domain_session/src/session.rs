//! Logged-in session

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use core_kernel::SessionId;
use domain_claims::{ClaimStore, Employee, ReviewDesk};
use crate::dashboard::Dashboard;
use crate::directory::User;
use crate::error::SessionError;
use crate::role::Role;

/// A user acting in one of their roles
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: SessionId,
    user: User,
    active_role: Role,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session in the user's first role
    pub fn start(user: User) -> Result<Self, SessionError> {
        let role = user
            .default_role()
            .ok_or_else(|| SessionError::NoRoles(user.email.clone()))?;
        Self::resume(user, role)
    }

    /// Starts a session in a specific role
    pub fn resume(user: User, active_role: Role) -> Result<Self, SessionError> {
        if !user.has_role(active_role) {
            return Err(SessionError::RoleNotAvailable(active_role));
        }

        info!(email = %user.email, role = %active_role, "Session started");
        Ok(Self {
            id: SessionId::new_v7(),
            user,
            active_role,
            started_at: Utc::now(),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn active_role(&self) -> Role {
        self.active_role
    }

    pub fn available_roles(&self) -> &[Role] {
        &self.user.roles
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// True when the role switcher should be offered
    pub fn can_switch_roles(&self) -> bool {
        self.user.roles.len() > 1
    }

    /// Changes the active role to another role of the same user
    pub fn switch_role(&mut self, role: Role) -> Result<(), SessionError> {
        if !self.user.has_role(role) {
            return Err(SessionError::RoleNotAvailable(role));
        }
        info!(email = %self.user.email, from = %self.active_role, to = %role, "Role switched");
        self.active_role = role;
        Ok(())
    }

    /// Identity used when filing claims
    pub fn employee(&self) -> Employee {
        self.user.as_employee()
    }

    /// A review desk in this user's name; only for the reviewer role
    pub fn review_desk(&self) -> Result<ReviewDesk, SessionError> {
        match self.active_role {
            Role::Reviewer => Ok(ReviewDesk::new(self.user.name.clone())),
            Role::Employee => Err(SessionError::RoleNotAvailable(Role::Reviewer)),
        }
    }

    /// The dashboard for the active role
    pub fn dashboard<'s>(&self, store: &'s ClaimStore) -> Dashboard<'s> {
        Dashboard::for_role(self.active_role, &self.user, store)
    }
}
