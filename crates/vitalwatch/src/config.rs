//! CLI configuration: thin wrapper around `vitalwatch_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--profile, --base-url, --insecure, ...).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use vitalwatch_core::{ConsoleConfig, FileStore, Session, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vitalwatch_config::{
    Config, Profile, config_path, load_config_or_default, save_config, session_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Translate the active profile + global flags into a `ConsoleConfig`.
///
/// CLI flag overrides take priority over profile values. Without any
/// profile the public backend and defaults are used, unless `--profile`
/// named one that does not exist.
pub fn resolve_console_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConsoleConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config.profiles.get(&profile_name);
    if profile.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(config),
        });
    }

    let mut resolved = vitalwatch_config::profile_to_console_config(profile, &config.defaults)?;

    // 1. Base URL (flag / env > profile)
    if let Some(ref raw) = global.base_url {
        resolved.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    // 2. TLS verification
    if global.insecure {
        resolved.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 3. Timeout
    if let Some(secs) = global.timeout {
        resolved.timeout = Duration::from_secs(secs);
    }

    Ok(resolved)
}

/// Where this invocation keeps its session.
pub fn session_file(global: &GlobalOpts) -> PathBuf {
    global.session_file.clone().unwrap_or_else(session_path)
}

/// Open the on-disk session store.
pub fn open_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let store = FileStore::open(session_file(global))?;
    Ok(Session::new(Arc::new(store)))
}
