// ── Core error types ──
//
// User-facing errors from vitalwatch-core. Consumers see domain failures,
// not reqwest or serde errors. The `From<vitalwatch_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Session { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::AuthenticationFailed { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vitalwatch_api::Error> for CoreError {
    fn from(err: vitalwatch_api::Error) -> Self {
        match err {
            vitalwatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            vitalwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            vitalwatch_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot carry API paths: {url}"),
            },
            vitalwatch_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            e @ vitalwatch_api::Error::PathTemplate { .. } => CoreError::Internal(e.to_string()),
            vitalwatch_api::Error::Api { status, message } => match status {
                401 | 403 => CoreError::AuthenticationFailed { message },
                404 => CoreError::NotFound {
                    entity_type: "resource".into(),
                    identifier: message,
                },
                _ => CoreError::Api {
                    message,
                    status: Some(status),
                },
            },
            vitalwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_backend_statuses() {
        let err: CoreError = vitalwatch_api::Error::Api {
            status: 403,
            message: "Forbidden".into(),
        }
        .into();
        assert!(matches!(err, CoreError::AuthenticationFailed { ref message } if message == "Forbidden"));

        let err: CoreError = vitalwatch_api::Error::Api {
            status: 500,
            message: "HTTP error! status: 500".into(),
        }
        .into();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "API error: HTTP error! status: 500");
    }
}
