//! Remote service endpoints for the console.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console talks to two services: the backend data/auth API and the AI
//! document-processing API. Base URLs are fixed at build time so SSR and
//! hydrate builds agree on them without a round-trip.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_AI_URL: &str = "http://localhost:8000";

/// Base URLs for the remote services, provided to components via context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub backend_url: String,
    pub ai_url: String,
}

impl ApiConfig {
    /// Build config from `LEGALDESK_BACKEND_URL` / `LEGALDESK_AI_URL` captured
    /// at compile time, falling back to the local development defaults.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("LEGALDESK_BACKEND_URL"), option_env!("LEGALDESK_AI_URL"))
    }

    pub fn from_values(backend_url: Option<&str>, ai_url: Option<&str>) -> Self {
        Self {
            backend_url: base_url_or(backend_url, DEFAULT_BACKEND_URL),
            ai_url: base_url_or(ai_url, DEFAULT_AI_URL),
        }
    }

    /// Join a backend path (leading `/` expected) onto the backend base URL.
    pub fn backend(&self, path: &str) -> String {
        format!("{}{path}", self.backend_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn base_url_or(raw: Option<&str>, default: &str) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed.to_owned()
    }
}
