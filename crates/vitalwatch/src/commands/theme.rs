//! Theme preference: stored in the session, survives logout.

use vitalwatch_core::{Console, Theme};

use crate::cli::{GlobalOpts, ThemeArg};
use crate::error::CliError;

pub fn handle(console: &Console, theme: Option<ThemeArg>, global: &GlobalOpts) -> Result<(), CliError> {
    let session = console.session();
    match theme {
        None => {
            let current = session.theme()?;
            crate::output::print_output(&current.to_string(), global.quiet);
        }
        Some(arg) => {
            let theme = match arg {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
                ThemeArg::System => Theme::System,
            };
            session.set_theme(theme)?;
            if !global.quiet {
                eprintln!("✓ Theme set to {theme}");
            }
        }
    }
    Ok(())
}
