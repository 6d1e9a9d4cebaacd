//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by `AuthGuard` and user-aware components to coordinate login
//! redirects and identity-dependent rendering. One validation per page load;
//! login and logout reset the state so the next guarded view re-checks.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::CurrentUser;

/// Outcome of checking the stored session token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not checked yet in this page load.
    #[default]
    Unchecked,
    Checking,
    Authorized,
    /// No token stored.
    Missing,
    /// The backend refused the token.
    Rejected,
}

/// Authentication state tracking the session check and the signed-in user.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub status: SessionStatus,
    pub user: Option<CurrentUser>,
}

impl AuthState {
    /// Whether a guard should start validating the token now.
    pub fn needs_check(&self) -> bool {
        self.status == SessionStatus::Unchecked
    }

    pub fn is_authorized(&self) -> bool {
        self.status == SessionStatus::Authorized
    }

    /// Whether guarded views should send the user back to login.
    pub fn should_redirect(&self) -> bool {
        matches!(self.status, SessionStatus::Missing | SessionStatus::Rejected)
    }

    /// Forget the session so the next guarded view validates again.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
