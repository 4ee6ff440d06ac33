// ── Runtime connection configuration ──
//
// Describes how to reach a VitalWatch backend. Carries no credentials
// and never touches disk; the CLI builds a `ConsoleConfig` from its
// profile and hands it in.

use std::time::Duration;

use url::Url;
use vitalwatch_api::{TlsMode, TransportConfig};

use crate::error::CoreError;

/// Backend used when no profile, env var or flag says otherwise.
pub const DEFAULT_BASE_URL: &str = "https://hoxuanthai.id.vn/api/v1";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging backends).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// API base, including the version prefix (e.g. `https://host/api/v1`).
    pub base_url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Page size used when a list view does not specify one.
    pub page_size: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: 10,
        }
    }
}

impl ConsoleConfig {
    pub fn with_base_url(base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::Config {
            message: format!("invalid base URL {base_url:?}: {e}"),
        })?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
