//! Shared helpers for command handlers.

use std::path::Path;

use secrecy::SecretString;
use vitalwatch_core::{
    AlertSeverity, AlertStatus, Console, Gender, PageRequest, TimeRange,
};

use crate::cli::{GenderArg, PageArgs, RangeArg, SeverityArg, StatusArg};
use crate::error::CliError;

/// Refuse to call protected endpoints without a stored token.
pub fn require_session(console: &Console) -> Result<(), CliError> {
    if console.session().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::NotSignedIn)
    }
}

/// Build the list request from `--page/--size/--sort-by`.
pub fn page_request(console: &Console, args: PageArgs) -> Result<PageRequest, CliError> {
    let size = args.size.unwrap_or(console.config().page_size);
    if size == 0 {
        return Err(CliError::Validation {
            field: "size".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(PageRequest {
        page: args.page,
        size,
        sort_by: args.sort_by,
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Hidden password prompt.
pub fn prompt_secret(label: &str) -> Result<SecretString, CliError> {
    let raw = rpassword::prompt_password(label).map_err(prompt_err)?;
    Ok(SecretString::from(raw))
}

/// Read and parse a JSON file for `--file` flags.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

// ── Arg enum → domain ───────────────────────────────────────────────

pub fn gender(arg: GenderArg) -> Gender {
    match arg {
        GenderArg::Male => Gender::Male,
        GenderArg::Female => Gender::Female,
        GenderArg::Other => Gender::Other,
    }
}

pub fn severity(arg: SeverityArg) -> AlertSeverity {
    match arg {
        SeverityArg::Low => AlertSeverity::Low,
        SeverityArg::Medium => AlertSeverity::Medium,
        SeverityArg::High => AlertSeverity::High,
    }
}

pub fn status(arg: StatusArg) -> AlertStatus {
    match arg {
        StatusArg::New => AlertStatus::New,
        StatusArg::Viewed => AlertStatus::Viewed,
        StatusArg::Resolved => AlertStatus::Resolved,
    }
}

pub fn range(arg: RangeArg) -> TimeRange {
    match arg {
        RangeArg::LastHour => TimeRange::LastHour,
        RangeArg::Today => TimeRange::Today,
        RangeArg::LastSevenDays => TimeRange::LastSevenDays,
    }
}

/// `"-"` for absent values in detail views.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
