//! REST helpers for the backend data/auth API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-success statuses carry the
//! backend's message when it sent one, so forms can show it verbatim. There
//! are no retries and no timeouts.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

use super::types::{
    Client, CurrentUser, LoginRequest, LoginResponse, RegisterRequest, ResendOtpRequest, ResendOtpResponse, TokenResponse,
    VerifyOtpRequest,
};
use crate::config::ApiConfig;
use crate::state::permissions::PermissionSource;
use crate::util::auth::TokenValidator;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Backend-supplied message for a failed status, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn permissions_endpoint(config: &ApiConfig, subject: &str) -> String {
    config.backend(&format!("/usuarios/{}/permisos", urlencoding::encode(subject)))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Pull a readable message out of an error body: `{"mensaje": ..}`, a JSON
/// string, or plain text.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => Some(s).filter(|s| !s.is_empty()),
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value::<super::types::ApiMessage>(value)
            .ok()
            .and_then(|m| m.mensaje)
            .filter(|m| !m.is_empty()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}

/// Client list from a `/clientes` body. Anything but an array counts as no
/// clients.
#[cfg(any(test, feature = "hydrate"))]
fn clients_from_body(body: serde_json::Value) -> Result<Vec<Client>, ApiError> {
    match body {
        serde_json::Value::Array(_) => serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string())),
        _ => Ok(Vec::new()),
    }
}

#[cfg(feature = "hydrate")]
fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn ensure_ok(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status { status, message: error_message_from_body(&body) })
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    ensure_ok(resp)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn get_authorized(url: &str, token: &str) -> Result<gloo_net::http::Response, ApiError> {
    gloo_net::http::Request::get(url)
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(network)
}

/// Start a login with `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, rejected credentials, or an
/// undecodable body.
pub async fn login(config: &ApiConfig, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json(&config.backend("/api/auth/login"), request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(ApiError::Unavailable)
    }
}

/// Exchange an OTP for a session token with `POST /api/auth/verify-otp`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure or an invalid/expired code.
pub async fn verify_otp(config: &ApiConfig, request: &VerifyOtpRequest) -> Result<TokenResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json(&config.backend("/api/auth/verify-otp"), request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(ApiError::Unavailable)
    }
}

/// Ask the backend to mail a fresh OTP via `POST /api/auth/resend-otp`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure or a non-success status.
pub async fn resend_otp(config: &ApiConfig, request: &ResendOtpRequest) -> Result<ResendOtpResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json(&config.backend("/api/auth/resend-otp"), request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(ApiError::Unavailable)
    }
}

/// Create a user and its lawyer record via `POST /api/auth/register`.
///
/// # Errors
///
/// Returns an [`ApiError`]; validation failures carry the backend message.
pub async fn register(config: &ApiConfig, request: &RegisterRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&config.backend("/api/auth/register"))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        ensure_ok(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(ApiError::Unavailable)
    }
}

/// Check a stored token with `GET /api/auth/validar-token`.
///
/// # Errors
///
/// Returns an [`ApiError`] when the backend rejects the token or is unreachable.
pub async fn validate_token(config: &ApiConfig, token: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get_authorized(&config.backend("/api/auth/validar-token"), token).await?;
        ensure_ok(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, token);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the authenticated user from `GET /api/usuario/me`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, a non-success status, or an
/// undecodable body.
pub async fn fetch_current_user(config: &ApiConfig, token: &str) -> Result<CurrentUser, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get_authorized(&config.backend("/api/usuario/me"), token).await?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, token);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in lawyer's clients from `GET /clientes`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, a non-success status, or an
/// array that does not hold client records.
pub async fn fetch_clients(config: &ApiConfig, token: &str) -> Result<Vec<Client>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get_authorized(&config.backend("/clientes"), token).await?;
        clients_from_body(read_json(resp).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, token);
        Err(ApiError::Unavailable)
    }
}

/// Fetch a user's flat permission-name list from
/// `GET /usuarios/{subject}/permisos`. A `null` body is an empty list.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport failure, a non-success status, or an
/// undecodable body.
pub async fn fetch_permissions(config: &ApiConfig, subject: &str, token: &str) -> Result<Vec<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get_authorized(&permissions_endpoint(config, subject), token).await?;
        let names: Option<Vec<String>> = read_json(resp).await?;
        Ok(names.unwrap_or_default())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, subject, token);
        Err(ApiError::Unavailable)
    }
}

/// The backend API as seen by the permission store and session guard.
#[derive(Clone, Debug)]
pub struct BackendApi {
    config: ApiConfig,
}

impl BackendApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl PermissionSource for BackendApi {
    async fn fetch_permissions(&self, subject: &str, token: &str) -> Result<Vec<String>, ApiError> {
        fetch_permissions(&self.config, subject, token).await
    }
}

impl TokenValidator for BackendApi {
    async fn validate(&self, token: &str) -> Result<(), ApiError> {
        validate_token(&self.config, token).await
    }
}
