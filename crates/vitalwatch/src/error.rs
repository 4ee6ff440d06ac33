//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `LoginError` and `ConfigError` into user-facing
//! errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vitalwatch_config::ConfigError;
use vitalwatch_core::{CoreError, LoginError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the backend at {url}")]
    #[diagnostic(
        code(vitalwatch::connection_failed),
        help(
            "Check that the backend is reachable.\n\
             URL: {url}\n\
             Override it with --base-url or VITALWATCH_API_BASE_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(vitalwatch::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(vitalwatch::auth_failed),
        help("Sign in again with: vitalwatch login")
    )]
    AuthFailed { message: String },

    #[error("Not signed in")]
    #[diagnostic(code(vitalwatch::not_signed_in), help("Run: vitalwatch login"))]
    NotSignedIn,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(vitalwatch::no_credentials),
        help(
            "Store a password with: vitalwatch config set-password\n\
             Or set the VITALWATCH_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vitalwatch::not_found),
        help("Run: vitalwatch {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(vitalwatch::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vitalwatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vitalwatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vitalwatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(vitalwatch::config))]
    Config(Box<ConfigError>),

    #[error("Session storage error: {message}")]
    #[diagnostic(
        code(vitalwatch::session),
        help("Remove the session file and sign in again. See: vitalwatch config path")
    )]
    Session { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(vitalwatch::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotSignedIn | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: String, list_command: &str) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier,
            list_command: list_command.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => Self::Timeout,

            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Api { message, status } => Self::ApiError { status, message },

            CoreError::Session { message } => Self::Session { message },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::ApiError {
                status: None,
                message,
            },
        }
    }
}

impl From<LoginError> for CliError {
    fn from(err: LoginError) -> Self {
        let message = err.to_string();
        match err {
            LoginError::MissingField { field } => Self::Validation {
                field: field.into(),
                reason: message,
            },
            LoginError::InvalidCredentials => Self::AuthFailed { message },
            LoginError::Unexpected(core) => core.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            other => Self::Config(Box::new(other)),
        }
    }
}
