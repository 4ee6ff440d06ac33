//! Shared configuration for the VitalWatch CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! platform paths for the config and session files, and translation to
//! `vitalwatch_core::ConsoleConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vitalwatch_core::{ConsoleConfig, DEFAULT_BASE_URL, TlsVerification};

/// Service name for stored passwords in the system keyring.
pub const KEYRING_SERVICE: &str = "vitalwatch";

/// Overrides the backend base URL for every profile.
pub const BASE_URL_ENV: &str = "VITALWATCH_API_BASE_URL";
pub const USERNAME_ENV: &str = "VITALWATCH_USERNAME";
pub const PASSWORD_ENV: &str = "VITALWATCH_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile name to use when none is given on the command line.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    10
}

/// A named backend profile.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL including the `/api/v1` prefix.
    pub base_url: Option<String>,

    /// Admin username used by `login`.
    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override the request timeout (seconds).
    pub timeout: Option<u64>,

    /// Override the list page size.
    pub page_size: Option<u32>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "vitalwatch", "vitalwatch")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Where the session (token, identity, theme) is persisted.
pub fn session_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("session.json"),
        |dirs| dirs.data_dir().join("session.json"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vitalwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// Environment keys nest with a double underscore, e.g.
/// `VITALWATCH_DEFAULTS__PAGE_SIZE=25`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("VITALWATCH_")
                .ignore(&["API_BASE_URL", "USERNAME", "PASSWORD", "PROFILE", "LOG"])
                .split("__"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Username for `profile`: the profile's own, else `VITALWATCH_USERNAME`.
pub fn resolve_username(profile: &Profile) -> Option<String> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
}

/// Resolve the login password from the credential chain.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password for `profile_name` in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(password)?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/password")
}

// ── ConsoleConfig ───────────────────────────────────────────────────

/// Pick the base URL: env override, then the profile, then the default.
pub fn resolve_base_url(profile: Option<&Profile>) -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| profile.and_then(|p| p.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

/// Build a `ConsoleConfig` from a profile, with no CLI flag overrides.
///
/// A missing profile means "use the defaults against the public backend".
pub fn profile_to_console_config(
    profile: Option<&Profile>,
    defaults: &Defaults,
) -> Result<ConsoleConfig, ConfigError> {
    let raw = resolve_base_url(profile);
    let base_url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;

    let tls = match profile {
        Some(p) if p.insecure.unwrap_or(false) => TlsVerification::DangerAcceptInvalid,
        Some(Profile {
            ca_cert: Some(ca_path),
            ..
        }) => TlsVerification::CustomCa(ca_path.clone()),
        _ => TlsVerification::SystemDefaults,
    };

    let timeout = profile
        .and_then(|p| p.timeout)
        .unwrap_or(defaults.timeout);
    let page_size = profile
        .and_then(|p| p.page_size)
        .unwrap_or(defaults.page_size);

    Ok(ConsoleConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(timeout),
        page_size,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("absent.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.active_profile_name(), "default");
            assert_eq!(cfg.defaults.output, "table");
            assert_eq!(cfg.defaults.page_size, 10);
            assert!(cfg.profiles.is_empty());
            Ok(())
        });
    }

    #[test]
    fn file_profiles_and_env_defaults_merge() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "staging"

                [defaults]
                output = "json"

                [profiles.staging]
                base_url = "https://staging.example.test/api/v1"
                username = "admin"
                page_size = 25
                "#,
            )?;
            jail.set_env("VITALWATCH_DEFAULTS__TIMEOUT", "5");

            let cfg = load_config_from(&jail.directory().join("config.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.active_profile_name(), "staging");
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.timeout, 5);

            let profile = &cfg.profiles["staging"];
            assert_eq!(profile.username.as_deref(), Some("admin"));
            assert_eq!(profile.page_size, Some(25));
            Ok(())
        });
    }

    #[test]
    fn base_url_env_overrides_profile() {
        Jail::expect_with(|jail| {
            let profile = Profile {
                base_url: Some("https://profile.example.test/api/v1".into()),
                ..Profile::default()
            };
            assert_eq!(
                resolve_base_url(Some(&profile)),
                "https://profile.example.test/api/v1"
            );

            jail.set_env(BASE_URL_ENV, "http://localhost:8080/api/v1");
            assert_eq!(
                resolve_base_url(Some(&profile)),
                "http://localhost:8080/api/v1"
            );
            Ok(())
        });
    }

    #[test]
    fn no_profile_targets_default_backend() {
        Jail::expect_with(|_| {
            let cfg = profile_to_console_config(None, &Defaults::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.base_url.as_str(), DEFAULT_BASE_URL);
            assert_eq!(cfg.tls, TlsVerification::SystemDefaults);
            assert_eq!(cfg.timeout, Duration::from_secs(30));
            assert_eq!(cfg.page_size, 10);
            Ok(())
        });
    }

    #[test]
    fn profile_tls_and_overrides_apply() {
        Jail::expect_with(|_| {
            let insecure = Profile {
                insecure: Some(true),
                ca_cert: Some("/etc/ca.pem".into()),
                timeout: Some(3),
                ..Profile::default()
            };
            let cfg = profile_to_console_config(Some(&insecure), &Defaults::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
            assert_eq!(cfg.timeout, Duration::from_secs(3));

            let pinned = Profile {
                ca_cert: Some("/etc/ca.pem".into()),
                ..Profile::default()
            };
            let cfg = profile_to_console_config(Some(&pinned), &Defaults::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.tls, TlsVerification::CustomCa("/etc/ca.pem".into()));
            Ok(())
        });
    }

    #[test]
    fn bad_base_url_is_a_validation_error() {
        Jail::expect_with(|_| {
            let profile = Profile {
                base_url: Some("not a url".into()),
                ..Profile::default()
            };
            let err = profile_to_console_config(Some(&profile), &Defaults::default()).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
            Ok(())
        });
    }

    #[test]
    fn password_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env(PASSWORD_ENV, "from-env");
            let profile = Profile {
                password: Some("from-file".into()),
                ..Profile::default()
            };
            let pw = resolve_password(&profile, "default").map_err(|e| e.to_string())?;
            assert_eq!(secrecy::ExposeSecret::expose_secret(&pw), "from-env");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                base_url: Some("http://localhost:8080/api/v1".into()),
                username: Some("admin".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.profiles["default"].username.as_deref(), Some("admin"));
    }
}
