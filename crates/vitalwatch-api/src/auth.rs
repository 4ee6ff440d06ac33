// Bearer token sourcing.
//
// The client asks a TokenSource for a token on every request, so a login
// or logout performed through the session is visible to the next call
// without rebuilding the client.

use secrecy::SecretString;

/// Supplies the bearer token attached to outgoing requests.
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` to send the request unauthenticated.
    fn bearer_token(&self) -> Option<SecretString>;
}

/// A fixed token (or none), for scripts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.0.clone()
    }
}
