//! Session token storage and JWT claim decoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend issues a JWT at login. The console keeps it in `localStorage`
//! for the browser session and reads the subject claim to address per-user
//! endpoints. Signatures are not verified here; the backend checks the token
//! on every call.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "jwt";
/// Key an older build cached permission names under; cleared on logout.
pub const LEGACY_PERMISSIONS_KEY: &str = "permisos";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token claims are not valid JSON: {0}")]
    Claims(String),
}

/// The subset of JWT claims the console reads.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SessionClaims {
    /// Numeric (sometimes string) user id; preferred over `sub`.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl SessionClaims {
    /// Decode the payload segment of `token` without verifying it.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] when the token has no payload segment, the
    /// segment is not base64url, or it does not hold a JSON claims object.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let payload = token
            .trim()
            .split('.')
            .nth(1)
            .filter(|p| !p.is_empty())
            .ok_or(TokenError::Malformed)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
    }

    /// User identifier for per-user endpoints.
    ///
    /// A present `id` decides on its own: `0` and blank strings mean no
    /// subject. `sub` is consulted only when `id` is absent or null.
    pub fn subject(&self) -> Option<String> {
        match &self.id {
            Some(serde_json::Value::Number(n)) => numeric_subject(n),
            Some(serde_json::Value::String(s)) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_owned),
            None | Some(serde_json::Value::Null) => self
                .sub
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            Some(_) => None,
        }
    }
}

/// Integral ids render without a fraction (`7.0` becomes `7`).
fn numeric_subject(n: &serde_json::Number) -> Option<String> {
    if let Some(v) = n.as_i64() {
        return (v != 0).then(|| v.to_string());
    }
    if let Some(v) = n.as_u64() {
        return Some(v.to_string());
    }
    let v = n.as_f64()?;
    if v == 0.0 || !v.is_finite() {
        None
    } else if v.fract() == 0.0 {
        Some(format!("{v:.0}"))
    } else {
        Some(v.to_string())
    }
}

/// Where the session token lives between page loads.
pub trait TokenStore {
    /// Current token, or `None` when absent or empty.
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    /// Drop the token and any session data cached alongside it.
    fn clear(&self);
}

/// [`TokenStore`] backed by the browser's `localStorage`.
///
/// SSR builds have no storage and always report no token.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|t| !t.trim().is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("failed to persist session token");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
                let _ = storage.remove_item(LEGACY_PERMISSIONS_KEY);
            }
        }
    }
}
