//! Command dispatch: bridges CLI args -> `Console` calls -> output formatting.

pub mod alerts;
pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod devices;
pub mod health;
pub mod theme;
pub mod users;
pub mod util;

use vitalwatch_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        // Session commands work signed out
        Command::Login(args) => auth::login(console, config, args, global).await,
        Command::Logout => auth::logout(console, global),
        Command::Whoami => auth::whoami(console, global),
        Command::Register(args) => auth::register(console, args, global).await,
        Command::Theme { theme } => theme::handle(console, theme, global),

        cmd => {
            util::require_session(console)?;
            match cmd {
                Command::Users(args) => users::handle(console, args, global).await,
                Command::Devices(args) => devices::handle(console, args, global).await,
                Command::Alerts(args) => alerts::handle(console, args, global).await,
                Command::Health(args) => health::handle(console, args, global).await,
                Command::Dashboard => dashboard::handle(console, global).await,
                // Handled above or before dispatch
                _ => unreachable!(),
            }
        }
    }
}
