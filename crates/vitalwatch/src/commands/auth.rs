//! Session command handlers: login, logout, whoami, register.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};
use vitalwatch_core::{Console, LoginForm, RegisterRequest, SessionUser};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(user: &SessionUser) -> String {
    [
        format!("Username:  {}", user.username),
        format!(
            "Signed in: {}",
            user.signed_in_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ]
    .join("\n")
}

/// Sign in with flag, profile, keyring or prompted credentials.
pub async fn login(
    console: &Console,
    cfg: &Config,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    let username = match args
        .username
        .or_else(|| profile.and_then(vitalwatch_config::resolve_username))
    {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(util::prompt_err)?,
    };

    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => match profile.map(|p| vitalwatch_config::resolve_password(p, &profile_name)) {
            Some(Ok(password)) => password,
            _ => util::prompt_secret("Password: ")?,
        },
    };

    let form = LoginForm::new(username, password);
    let user = output::with_spinner(global, "Signing in...", console.login(&form)).await?;

    if !global.quiet {
        eprintln!("✓ Signed in as {}", user.username);
    }
    Ok(())
}

pub fn logout(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    console.logout()?;
    if !global.quiet {
        eprintln!("✓ Signed out");
    }
    Ok(())
}

pub fn whoami(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    if !console.session().is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    let user = console.session().user()?.ok_or(CliError::NotSignedIn)?;
    let out = output::render_single(&global.output, &user, detail, |u| u.username.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn register(
    console: &Console,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::prompt_secret("Password: ")?;
    let confirm = util::prompt_secret("Confirm password: ")?;
    if password.expose_secret().is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    if password.expose_secret() != confirm.expose_secret() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }

    let request = RegisterRequest {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        username: args.username,
        password,
        dob: args.dob,
        gender: args.gender.map(|g| util::gender(g).to_string()),
    };
    let message = output::with_spinner(global, "Registering...", console.register(&request)).await?;

    if !global.quiet {
        eprintln!("✓ {message}");
    }
    Ok(())
}
