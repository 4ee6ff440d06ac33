//! Config subcommand handlers.

use dialoguer::{Input, Select};
use vitalwatch_core::DEFAULT_BASE_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "page_size = {}", cfg.defaults.page_size);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref url) = p.base_url {
            let _ = writeln!(out, "base_url = \"{url}\"");
        }
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(size) = p.page_size {
            let _ = writeln!(out, "page_size = {size}");
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    CliError::ProfileNotFound {
        name,
        available: config::available_profiles(cfg),
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, value: &str, expect: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expect}"),
    })
}

/// Offer to store the password in the system keyring or return it for plaintext config.
///
/// Returns `Some(password)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_password_storage(profile_name: &str, password: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store; prompt at login",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    match selection {
        0 => {
            vitalwatch_config::store_password(profile_name, password)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => Ok(Some(password.to_owned())),
        _ => Ok(None),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("VitalWatch configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let base_url: String = Input::new()
                .with_prompt("Backend URL (including /api/v1)")
                .default(DEFAULT_BASE_URL.into())
                .validate_with(|input: &String| -> Result<(), String> {
                    url::Url::parse(input)
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Admin username")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let password = if username.is_empty() {
                None
            } else {
                let pass = rpassword::prompt_password("Password (empty to skip): ")
                    .map_err(prompt_err)?;
                if pass.is_empty() {
                    None
                } else {
                    prompt_password_storage(&profile_name, &pass)?
                }
            };

            let profile = Profile {
                base_url: Some(base_url),
                username: (!username.is_empty()).then_some(username),
                password,
                ..Profile::default()
            };

            // Other profiles in an existing config are kept
            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Sign in with: vitalwatch login");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            let out = format!(
                "config:  {}\nsession: {}",
                config::config_path().display(),
                config::session_file(global).display()
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            match key.as_str() {
                "base_url" | "base-url" => {
                    url::Url::parse(&value).map_err(|e| CliError::Validation {
                        field: "base_url".into(),
                        reason: format!("invalid URL: {e}"),
                    })?;
                    profile.base_url = Some(value);
                }
                "username" => profile.username = Some(value),
                "insecure" => {
                    profile.insecure = Some(parse_value("insecure", &value, "'true' or 'false'")?);
                }
                "timeout" => {
                    profile.timeout = Some(parse_value("timeout", &value, "a number (seconds)")?);
                }
                "page_size" | "page-size" => {
                    let size: u32 = parse_value("page_size", &value, "a positive number")?;
                    if size == 0 {
                        return Err(CliError::Validation {
                            field: "page_size".into(),
                            reason: "must be a positive number".into(),
                        });
                    }
                    profile.page_size = Some(size);
                }
                "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: base_url, username, \
                             insecure, timeout, page_size, ca_cert"
                        ),
                    });
                }
            }

            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: vitalwatch config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            vitalwatch_config::store_password(&profile_name, &secret)?;

            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
