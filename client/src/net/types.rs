//! Wire DTOs for the backend auth and session endpoints.
//!
//! DESIGN
//! ======
//! The backend speaks camelCase JSON. Optional fields default so partial
//! answers decode and the caller decides what counts as a usable response.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Body for `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Answer to `POST /api/auth/login`: either a second-factor challenge or a
/// token issued directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub two_factor: bool,
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub email_masked: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// What the login page should do next with a [`LoginResponse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// An OTP was mailed; verify it against `tx_id`.
    Challenge { tx_id: String, email_masked: String },
    /// The backend skipped the second factor.
    Token(String),
    Unexpected,
}

impl LoginResponse {
    pub fn outcome(self) -> LoginOutcome {
        let tx_id = self.tx_id.filter(|t| !t.is_empty());
        match (self.two_factor, tx_id, self.token.filter(|t| !t.is_empty())) {
            (true, Some(tx_id), _) => LoginOutcome::Challenge {
                tx_id,
                email_masked: self.email_masked.unwrap_or_default(),
            },
            (_, _, Some(token)) => LoginOutcome::Token(token),
            _ => LoginOutcome::Unexpected,
        }
    }
}

/// Body for `POST /api/auth/verify-otp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub tx_id: String,
    pub code: String,
}

/// Body for `POST /api/auth/resend-otp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpRequest {
    pub tx_id: String,
}

/// Answer to `POST /api/auth/resend-otp`. The transaction id may rotate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpResponse {
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub email_masked: Option<String>,
}

/// Answer to `POST /api/auth/verify-otp`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Body for `POST /api/auth/register`; creates the user and its lawyer record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    pub ci: String,
}

/// The authenticated user from `GET /api/usuario/me`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// A client of the signed-in lawyer, from `GET /clientes`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Client {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub ci: String,
    #[serde(default)]
    pub email: String,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre.trim(), self.apellido.trim()).trim().to_owned()
    }
}

/// Error body shape the backend uses for validation failures.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub mensaje: Option<String>,
}
