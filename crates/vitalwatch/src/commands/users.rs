//! User command handlers.

use chrono::Utc;
use secrecy::ExposeSecret;
use tabled::Tabled;
use vitalwatch_core::{
    ChangePasswordRequest, Console, Device, DeviceUuid, HealthMetric, HealthSeries, ListView,
    Pager, TimeRange, UpdateUserRequest, User, UserDetail, UserFilter, UserId,
};

use crate::cli::{GlobalOpts, OutputFormat, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::devices::DeviceRow;
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "BMI")]
    bmi: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Devices")]
    devices: usize,
}

impl UserRow {
    fn new(u: &User, color: bool) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.display_name().to_owned(),
            username: u.username.clone(),
            email: u.email.clone(),
            gender: util::or_dash(u.gender),
            bmi: u.bmi_display(),
            status: output::paint_flag(u.enabled, "Enabled", "Disabled", color),
            devices: u.devices.len(),
        }
    }
}

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Heart Rate")]
    heart_rate: String,
    #[tabled(rename = "SpO2")]
    spo2: String,
    #[tabled(rename = "Steps")]
    steps: String,
}

fn sample_row(m: &HealthMetric, range: TimeRange) -> SampleRow {
    SampleRow {
        time: range.tick_label(m.timestamp),
        heart_rate: m.heart_rate.map_or_else(|| "-".into(), |v| format!("{v:.0} bpm")),
        spo2: m.spo2.map_or_else(|| "-".into(), |v| format!("{v:.1}%")),
        steps: util::or_dash(m.step_count),
    }
}

fn detail(d: &UserDetail) -> String {
    let u = &d.user;
    let mut lines = vec![
        format!("ID:        {}", u.id),
        format!("Name:      {}", u.display_name()),
        format!("Username:  {}", u.username),
        format!("Email:     {}", u.email),
        format!("Born:      {}", util::or_dash(u.dob.as_deref())),
        format!("Gender:    {}", util::or_dash(u.gender)),
        format!(
            "Height:    {}",
            u.height_m.map_or_else(|| "-".into(), |h| format!("{h:.2} m"))
        ),
        format!(
            "Weight:    {}",
            u.weight_kg.map_or_else(|| "-".into(), |w| format!("{w:.1} kg"))
        ),
        format!("BMI:       {}", u.bmi_display()),
        format!("Status:    {}", if u.enabled { "Enabled" } else { "Disabled" }),
        format!("Picture:   {}", util::or_dash(u.profile_picture_url.as_deref())),
    ];
    if d.devices.is_empty() {
        lines.push("Devices:   none".into());
    } else {
        lines.push("Devices:".into());
        for dev in &d.devices {
            let state = if dev.active { "active" } else { "inactive" };
            lines.push(format!("  {} {} ({state})", dev.id, dev.name));
        }
    }
    lines.join("\n")
}

/// Averages printed above a health sample table.
fn health_summary(series: &HealthSeries) -> String {
    [
        format!("Device:      {}", series.device_uuid),
        format!("Samples:     {}", series.metrics.len()),
        format!(
            "Avg HR:      {}",
            series
                .average_heart_rate()
                .map_or_else(|| "-".into(), |v| format!("{v:.0} bpm"))
        ),
        format!(
            "Avg SpO2:    {}",
            series
                .average_spo2()
                .map_or_else(|| "-".into(), |v| format!("{v:.1}%"))
        ),
        format!("Total steps: {}", series.total_steps()),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(console: &Console, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        UsersCommand::List {
            page,
            search,
            enabled,
        } => {
            let request = util::page_request(console, page)?;
            let page =
                output::with_spinner(global, "Loading users...", console.list_users(&request))
                    .await?;
            let pager = Pager::from_page(&page);
            let view = ListView::new(
                page.content,
                UserFilter {
                    search: search.unwrap_or_default(),
                    enabled,
                },
            );
            let users = view.visible_cloned();

            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::new(u, color),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_pager(&global.output, &pager.label(), pager.total_elements, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id } => {
            let found = output::with_spinner(
                global,
                "Loading user...",
                console.user_detail(UserId(id)),
            )
            .await?;
            let Some(found) = found else {
                return Err(CliError::not_found("user", id.to_string(), "users list"));
            };
            let out = output::render_single(&global.output, &found, detail, |d| d.user.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Devices { id } => {
            let devices: Vec<Device> = console.user_devices(UserId(id)).await?;
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.uuid.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Update {
            id,
            email,
            full_name,
            profile_picture_url,
            dob,
            gender,
            weight_kg,
            height_m,
        } => {
            let nothing_to_change = email.is_none()
                && full_name.is_none()
                && profile_picture_url.is_none()
                && dob.is_none()
                && gender.is_none()
                && weight_kg.is_none()
                && height_m.is_none();
            if nothing_to_change {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one field flag".into(),
                });
            }
            if weight_kg.is_some_and(|w| w <= 0.0) || height_m.is_some_and(|h| h <= 0.0) {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "weight and height must be positive".into(),
                });
            }

            let request = UpdateUserRequest {
                id,
                email,
                full_name,
                profile_picture_url,
                dob,
                gender: gender.map(|g| util::gender(g).to_string()),
                weight_kg,
                height_m,
            };
            let user = console.update_user(&request).await?;
            if !global.quiet {
                eprintln!("✓ Updated {}", user.display_name());
            }
            Ok(())
        }

        UsersCommand::Password { id } => {
            let current_password = util::prompt_secret("Current password: ")?;
            let new_password = util::prompt_secret("New password: ")?;
            let confirm = util::prompt_secret("Confirm new password: ")?;
            if new_password.expose_secret().is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "cannot be empty".into(),
                });
            }
            if new_password.expose_secret() != confirm.expose_secret() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "passwords do not match".into(),
                });
            }

            let request = ChangePasswordRequest {
                current_password,
                new_password,
            };
            console.change_password(UserId(id), &request).await?;
            if !global.quiet {
                eprintln!("✓ Password changed");
            }
            Ok(())
        }

        UsersCommand::Health { id, device, range } => {
            let range = util::range(range);
            let device = DeviceUuid::from(device);
            let series = output::with_spinner(
                global,
                "Loading health data...",
                console.user_health(UserId(id), &device, range, Utc::now()),
            )
            .await?;

            if matches!(global.output, OutputFormat::Table) {
                if series.is_empty() {
                    if !global.quiet {
                        eprintln!("No health data for {device} ({range})");
                    }
                    return Ok(());
                }
                let table = output::render_list(
                    &global.output,
                    &series.metrics,
                    |m| sample_row(m, range),
                    |m| m.timestamp.to_rfc3339(),
                );
                output::print_output(
                    &format!("{}\n\n{table}", health_summary(&series)),
                    global.quiet,
                );
            } else {
                let out = output::render_single(&global.output, &series, health_summary, |s| {
                    s.metrics
                        .iter()
                        .map(|m| m.timestamp.to_rfc3339())
                        .collect::<Vec<_>>()
                        .join("\n")
                });
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }
    }
}
