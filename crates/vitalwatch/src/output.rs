//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use vitalwatch_core::format::fmt_pct_bar;
use vitalwatch_core::model::{DatabaseState, ServiceState};
use vitalwatch_core::{AlertSeverity, AlertStatus};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Status badge text, colored when `color` is set.
pub fn paint_alert_status(status: AlertStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        AlertStatus::New => text.red().bold().to_string(),
        AlertStatus::Viewed => text.yellow().to_string(),
        AlertStatus::Resolved => text.green().to_string(),
    }
}

pub fn paint_severity(severity: AlertSeverity, color: bool) -> String {
    let text = severity.to_string();
    if !color {
        return text;
    }
    match severity {
        AlertSeverity::High => text.red().bold().to_string(),
        AlertSeverity::Medium => text.yellow().to_string(),
        AlertSeverity::Low => text.cyan().to_string(),
    }
}

pub fn paint_service_state(state: ServiceState, color: bool) -> String {
    let text = state.to_string();
    if !color {
        return text;
    }
    match state {
        ServiceState::Running => text.green().to_string(),
        ServiceState::Warning => text.yellow().to_string(),
        ServiceState::Stopped => text.red().bold().to_string(),
    }
}

pub fn paint_database_state(state: DatabaseState, color: bool) -> String {
    let text = state.to_string();
    if !color {
        return text;
    }
    match state {
        DatabaseState::Connected => text.green().to_string(),
        DatabaseState::Disconnected => text.red().bold().to_string(),
    }
}

pub fn paint_flag(on: bool, yes: &str, no: &str, color: bool) -> String {
    match (on, color) {
        (true, true) => yes.green().to_string(),
        (false, true) => no.dimmed().to_string(),
        (true, false) => yes.to_owned(),
        (false, false) => no.to_owned(),
    }
}

/// A `width`-wide usage gauge followed by the percentage.
pub fn usage_bar(pct: f64, width: u16, color: bool) -> String {
    let (filled, empty) = fmt_pct_bar(pct, width);
    if !color {
        return format!("{filled}{empty} {pct:.1}%");
    }
    let filled = if pct > vitalwatch_core::dashboard::RESOURCE_WARNING_PCT {
        filled.red().to_string()
    } else {
        filled.green().to_string()
    };
    format!("{filled}{} {pct:.1}%", empty.dimmed())
}

// ── Progress ─────────────────────────────────────────────────────────

/// Run `fut` behind a stderr spinner when interactive.
pub async fn with_spinner<F: Future>(global: &GlobalOpts, message: &str, fut: F) -> F::Output {
    if global.quiet || !io::stderr().is_terminal() {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let out = fut.await;
    spinner.finish_and_clear();
    out
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Footer under a paged table: "Page 1 of 3 (27 total)".
pub fn print_pager(format: &OutputFormat, label: &str, total: u64, quiet: bool) {
    if quiet || !matches!(format, OutputFormat::Table) {
        return;
    }
    eprintln!("Page {label} ({total} total)");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    if compact {
        render_json_compact(data)
    } else {
        render_json_pretty(data)
    }
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
