use thiserror::Error;

/// Top-level error type for the `vitalwatch-api` crate.
///
/// Covers every failure mode of the REST wrapper: transport, URL and
/// path-template construction, non-success HTTP statuses, and payload
/// decoding. `vitalwatch-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for REST paths: {0}")]
    InvalidBaseUrl(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Endpoint declaration ────────────────────────────────────────
    /// Path arguments did not line up with the endpoint's template.
    #[error("Path template {template} {reason}")]
    PathTemplate {
        template: &'static str,
        reason: String,
    },

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-success HTTP status. `message` is the server-supplied message
    /// when the error body carried one, otherwise a status-derived fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code of a backend rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for a 401 or 403. A 400 from the login endpoint is
    /// classified separately by the login flow.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(e) if e.status().is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_verbatim() {
        let err = Error::Api {
            status: 409,
            message: "Username already taken".into(),
        };
        assert_eq!(err.to_string(), "Username already taken");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn classifies_statuses() {
        let not_found = Error::Api {
            status: 404,
            message: "User not found".into(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_auth_rejected());

        let unauthorized = Error::Api {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert!(unauthorized.is_auth_rejected());
        assert!(!unauthorized.is_transport());

        let forbidden = Error::Api {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(forbidden.is_auth_rejected());

        let bad_request = Error::Api {
            status: 400,
            message: "Invalid credentials".into(),
        };
        assert!(!bad_request.is_auth_rejected());
    }
}
