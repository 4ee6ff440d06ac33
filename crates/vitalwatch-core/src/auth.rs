// ── Login form ──
//
// Required-field validation happens here, before any network call. The
// console classifies backend failures into the two messages the login
// screen shows.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use vitalwatch_api::types::LoginRequest;

use crate::error::CoreError;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
pub const UNEXPECTED_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Reject blank fields. Only the username is trimmed.
    pub fn validate(&self) -> Result<LoginRequest, LoginError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(LoginError::MissingField { field: "username" });
        }
        if self.password.expose_secret().is_empty() {
            return Err(LoginError::MissingField { field: "password" });
        }
        Ok(LoginRequest {
            username: username.to_owned(),
            password: self.password.clone(),
        })
    }
}

/// Why a login attempt failed, phrased for the login screen.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter your {field}")]
    MissingField { field: &'static str },

    /// The backend rejected the credentials (HTTP 400, 401 or 403).
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Anything else: network failure, server error, bad payload, or a
    /// session store that could not be written.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected(#[source] CoreError),
}

impl LoginError {
    pub(crate) fn classify(err: vitalwatch_api::Error) -> Self {
        match err.status() {
            Some(400 | 401 | 403) => Self::InvalidCredentials,
            _ => Self::Unexpected(err.into()),
        }
    }
}
