//! Alert command handlers.

use tabled::Tabled;
use tracing::debug;
use vitalwatch_core::{Alert, AlertFilter, AlertId, AlertStatus, Console, ListView, Pager};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "HR")]
    heart_rate: String,
    #[tabled(rename = "SpO2")]
    spo2: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl AlertRow {
    fn new(a: &Alert, color: bool) -> Self {
        Self {
            id: a.id.to_string(),
            user: a.user_name.clone(),
            time: format_time(a, "%Y-%m-%d %H:%M"),
            heart_rate: format!("{:.0}", a.heart_rate),
            spo2: format!("{:.1}%", a.spo2),
            score: a.ml_score_display(),
            severity: output::paint_severity(a.severity, color),
            status: output::paint_alert_status(a.status, color),
        }
    }
}

fn format_time(a: &Alert, fmt: &str) -> String {
    a.timestamp
        .map_or_else(|| "unknown".into(), |t| t.format(fmt).to_string())
}

fn detail(a: &Alert) -> String {
    [
        format!("ID:         {}", a.id),
        format!("User:       {} ({})", a.user_name, a.user_id),
        format!("Time:       {}", format_time(a, "%Y-%m-%d %H:%M:%S UTC")),
        format!("Heart rate: {:.0} bpm", a.heart_rate),
        format!("SpO2:       {:.1}%", a.spo2),
        format!("ML score:   {}", a.ml_score_display()),
        format!("Severity:   {}", a.severity),
        format!("Status:     {}", a.status),
    ]
    .join("\n")
}

async fn fetch(console: &Console, id: &AlertId) -> Result<Alert, CliError> {
    console
        .get_alert(id)
        .await?
        .ok_or_else(|| CliError::not_found("alert", id.to_string(), "alerts list"))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: AlertsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        AlertsCommand::List {
            page,
            severity,
            status,
        } => {
            let request = util::page_request(console, page)?;
            let page =
                output::with_spinner(global, "Loading alerts...", console.list_alerts(&request))
                    .await?;
            let pager = Pager::from_page(&page);
            let view = ListView::new(
                page.content,
                AlertFilter {
                    severity: severity.map(util::severity),
                    status: status.map(util::status),
                },
            );
            let alerts = view.visible_cloned();
            let out = output::render_list(
                &global.output,
                &alerts,
                |a| AlertRow::new(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_pager(&global.output, &pager.label(), pager.total_elements, global.quiet);
            Ok(())
        }

        AlertsCommand::View { id } => {
            let id = AlertId::from(id);
            let mut alert = fetch(console, &id).await?;
            if alert.status == AlertStatus::New {
                console.mark_alert_viewed(&id).await?;
                alert.status = alert.status.advance(AlertStatus::Viewed);
            } else {
                debug!(alert_id = %id, status = %alert.status, "alert already seen");
            }
            let out = output::render_single(&global.output, &alert, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Resolve { id } => {
            let id = AlertId::from(id);
            let alert = fetch(console, &id).await?;
            if alert.status.is_resolved() {
                if !global.quiet {
                    eprintln!("Alert {id} is already resolved");
                }
                return Ok(());
            }
            if !util::confirm(
                &format!("Resolve {} alert for {}?", alert.severity, alert.user_name),
                global.yes,
            )? {
                return Ok(());
            }
            console.mark_alert_resolved(&id).await?;
            if !global.quiet {
                eprintln!("✓ Alert {id} resolved");
            }
            Ok(())
        }
    }
}
