//! Session shell: login, role selection and view routing
//!
//! ```text
//! Login --login(email, password)--> Dashboard(active role) --logout--> Login
//!                                        |  ^
//!                                        +--+ switch_role
//! ```

use tracing::info;

use domain_claims::ClaimStore;
use crate::dashboard::Dashboard;
use crate::directory::UserDirectory;
use crate::error::SessionError;
use crate::role::Role;
use crate::session::Session;

/// What the shell shows right now
#[derive(Debug)]
pub enum View<'s> {
    Login,
    Dashboard(Dashboard<'s>),
}

/// Owns the directory and the current session, if any
#[derive(Debug, Clone, Default)]
pub struct SessionShell {
    directory: UserDirectory,
    session: Option<Session>,
}

impl SessionShell {
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory,
            session: None,
        }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Authenticates and opens a session in the user's first role
    ///
    /// A failed login leaves any existing session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Session, SessionError> {
        let user = self.directory.authenticate(email, password)?;
        let session = Session::start(user)?;
        Ok(self.session.insert(session))
    }

    /// Switches the active role of the current session
    pub fn switch_role(&mut self, role: Role) -> Result<(), SessionError> {
        self.session
            .as_mut()
            .ok_or(SessionError::NotLoggedIn)?
            .switch_role(role)
    }

    /// Ends the current session
    pub fn logout(&mut self) -> Option<Session> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            info!(email = %session.user().email, "Logged out");
        }
        ended
    }

    /// Routes to the login screen or the active role's dashboard
    pub fn view<'s>(&self, store: &'s ClaimStore) -> View<'s> {
        match &self.session {
            None => View::Login,
            Some(session) => View::Dashboard(session.dashboard(store)),
        }
    }
}
