//! System overview: one `/dashboard` fetch rendered as sections.

use chrono::Utc;
use tabled::Tabled;
use vitalwatch_core::model::ServiceStatus;
use vitalwatch_core::{Console, DashboardView};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

const BAR_WIDTH: u16 = 20;

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "Checked")]
    checked: String,
}

impl ServiceRow {
    fn new(s: &ServiceStatus, color: bool) -> Self {
        Self {
            name: s.name.clone(),
            state: output::paint_service_state(s.state, color),
            uptime: s.uptime.clone(),
            checked: s.last_check.format("%H:%M:%S").to_string(),
        }
    }
}

fn overview(v: &DashboardView, color: bool) -> String {
    let u = &v.users;
    let d = &v.devices;
    let s = &v.system;
    let db = &v.database;
    let api = &v.api;

    let sections = [
        format!(
            "Users\n  Total:     {}\n  Active:    {} ({:.1}%)\n  Inactive:  {}",
            u.total, u.active, u.active_pct, u.inactive
        ),
        format!(
            "Devices\n  Total:     {}\n  Active:    {} ({:.1}%)\n  Inactive:  {}",
            d.total, d.active, d.active_pct, d.inactive
        ),
        format!(
            "Server\n  Uptime:    {}\n  CPU:       {}\n  Memory:    {}  {}\n  Disk:      {}  {}",
            s.uptime,
            output::usage_bar(s.cpu_usage, BAR_WIDTH, color),
            output::usage_bar(s.memory_usage, BAR_WIDTH, color),
            s.memory_label,
            output::usage_bar(s.disk_usage, BAR_WIDTH, color),
            s.disk_label,
        ),
        format!(
            "Database\n  State:     {}\n  Response:  {:.0} ms\n  Pool:      {}/{} ({:.1}%)\n  Size:      {}",
            output::paint_database_state(db.state, color),
            db.response_time_ms,
            db.connections,
            db.max_connections,
            db.pool_usage_pct,
            db.size,
        ),
        format!(
            "API\n  Requests:  {:.0}/min\n  Latency:   {:.0} ms\n  Success:   {:.1}%\n  Errors:    {:.1}%",
            api.requests_per_minute, api.avg_response_time_ms, api.success_rate, api.error_rate
        ),
    ];

    let services: Vec<ServiceRow> = v.services.iter().map(|s| ServiceRow::new(s, color)).collect();
    let table = tabled::Table::new(services)
        .with(tabled::settings::Style::rounded())
        .to_string();

    format!(
        "{}\n\n{table}\nChecked at {}",
        sections.join("\n\n"),
        v.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let view = output::with_spinner(global, "Loading dashboard...", console.dashboard(Utc::now()))
        .await?;

    let out = output::render_single(
        &global.output,
        &view,
        |v| overview(v, color),
        |v| {
            v.services
                .iter()
                .map(|s| format!("{}\t{}", s.name, s.state))
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
