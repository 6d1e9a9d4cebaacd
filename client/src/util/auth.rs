//! Shared session helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components and the login/logout flows apply identical token
//! validation, storage, and reset behavior through these helpers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::net::api::ApiError;
use crate::state::auth::{AuthState, SessionStatus};
use crate::state::permissions::{PermissionStore, refresh_permissions};
use crate::util::token::{BrowserTokenStore, TokenStore};

/// Anything that can confirm a session token is still accepted.
pub trait TokenValidator {
    fn validate(&self, token: &str) -> impl Future<Output = Result<(), ApiError>>;
}

/// Check the stored token. A rejected token is removed from storage.
pub async fn check_session<T, V>(tokens: &T, validator: &V) -> SessionStatus
where
    T: TokenStore,
    V: TokenValidator,
{
    let Some(token) = tokens.load() else {
        return SessionStatus::Missing;
    };
    match validator.validate(&token).await {
        Ok(()) => SessionStatus::Authorized,
        Err(e) => {
            log::warn!("session token rejected: {e}");
            tokens.clear();
            SessionStatus::Rejected
        }
    }
}

/// Store a freshly issued token and reload permissions before the caller
/// navigates into the app.
pub async fn start_session(
    token: &str,
    permissions: RwSignal<PermissionStore>,
    auth: RwSignal<AuthState>,
    config: ApiConfig,
) {
    BrowserTokenStore.save(token);
    auth.update(AuthState::reset);
    refresh_permissions(permissions, config).await;
}

/// Drop the token and every piece of session state.
pub fn end_session(permissions: RwSignal<PermissionStore>, auth: RwSignal<AuthState>) {
    BrowserTokenStore.clear();
    permissions.update(PermissionStore::clear);
    auth.update(AuthState::reset);
}
