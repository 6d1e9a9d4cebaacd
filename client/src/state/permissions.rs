//! Session-scoped permission store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Navigation and route guards ask this store whether a feature is visible.
//! The answer shapes the UI only; the backend authorizes every call itself.
//!
//! LIFECYCLE
//! =========
//! `Uninitialized -> Loading -> Ready`. `Ready` returns to `Loading` only via an
//! explicit refresh (app start, login). There is no periodic invalidation, so
//! server-side permission changes surface on the next refresh.
//!
//! ERROR HANDLING
//! ==============
//! Refresh fails safe: any decode, transport, or status error leaves an empty
//! set, which hides every gated feature. Errors are logged, never returned.

#[cfg(test)]
#[path = "permissions_test.rs"]
mod permissions_test;

use std::collections::HashSet;
use std::future::Future;

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::net::api::{ApiError, BackendApi};
use crate::util::token::{BrowserTokenStore, SessionClaims, TokenError, TokenStore};

/// Load phase of the [`PermissionStore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PermissionPhase {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Unique permission names with trimmed, case-insensitive lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionSet {
    /// Display names, trimmed, first spelling wins. Blank entries are not
    /// listed but still count for membership.
    names: Vec<String>,
    keys: HashSet<String>,
}

fn permission_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PermissionSet {
    /// Build a set from backend names. Case/whitespace duplicates collapse to
    /// the first spelling.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for name in names {
            let name: String = name.into();
            let key = permission_key(&name);
            let listed = !key.is_empty();
            if set.keys.insert(key) && listed {
                set.names.push(name.trim().to_owned());
            }
        }
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&permission_key(name))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True when there is nothing to list.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The current session's permissions plus load phase.
///
/// Provided app-wide as `RwSignal<PermissionStore>`.
#[derive(Clone, Debug, Default)]
pub struct PermissionStore {
    phase: PermissionPhase,
    permissions: PermissionSet,
}

impl PermissionStore {
    /// True until a refresh has completed, and again while one is running.
    pub fn is_loading(&self) -> bool {
        self.phase != PermissionPhase::Ready
    }

    pub fn has(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn begin_refresh(&mut self) {
        self.phase = PermissionPhase::Loading;
    }

    /// Replace the set with a refresh result. Overlapping refreshes are not
    /// deduplicated; the last one to finish wins.
    pub fn finish_refresh(&mut self, permissions: PermissionSet) {
        self.permissions = permissions;
        self.phase = PermissionPhase::Ready;
    }

    /// Forget every permission, e.g. on logout.
    pub fn clear(&mut self) {
        self.finish_refresh(PermissionSet::default());
    }
}

/// Anything that can list a user's permission names.
pub trait PermissionSource {
    fn fetch_permissions(&self, subject: &str, token: &str) -> impl Future<Output = Result<Vec<String>, ApiError>>;
}

#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token carries no user id")]
    MissingSubject,
    #[error(transparent)]
    Api(#[from] ApiError),
}

async fn fetch_for_token<S: PermissionSource>(token: &str, source: &S) -> Result<Vec<String>, PermissionError> {
    let claims = SessionClaims::decode(token)?;
    let subject = claims.subject().ok_or(PermissionError::MissingSubject)?;
    Ok(source.fetch_permissions(&subject, token).await?)
}

/// Resolve the permission set for the stored token. Never fails: any error
/// yields an empty set.
pub async fn load_permissions<T, S>(tokens: &T, source: &S) -> PermissionSet
where
    T: TokenStore,
    S: PermissionSource,
{
    let Some(token) = tokens.load() else {
        return PermissionSet::default();
    };
    match fetch_for_token(&token, source).await {
        Ok(names) => PermissionSet::from_names(names),
        Err(e) => {
            log::warn!("permission load failed, hiding gated features: {e}");
            PermissionSet::default()
        }
    }
}

/// Refresh the context store from the browser token and the backend.
pub async fn refresh_permissions(store: RwSignal<PermissionStore>, config: ApiConfig) {
    store.update(PermissionStore::begin_refresh);
    let permissions = load_permissions(&BrowserTokenStore, &BackendApi::new(config)).await;
    store.update(|s| s.finish_refresh(permissions));
}
