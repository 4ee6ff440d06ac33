//! Device command handlers.

use tabled::Tabled;
use vitalwatch_core::{
    Console, Device, DeviceConfigRequest, DeviceFilter, DeviceId, DeviceUuid, ListView, Pager,
    RegisterDeviceRequest,
};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "State")]
    state: String,
}

impl DeviceRow {
    pub(super) fn new(d: &Device, color: bool) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            uuid: d.uuid.to_string(),
            owner: d.owner_name().unwrap_or("-").to_owned(),
            state: output::paint_flag(d.active, "Active", "Inactive", color),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("ID:     {}", d.id),
        format!("Name:   {}", d.name),
        format!("UUID:   {}", d.uuid),
        format!("Owner:  {}", d.owner_name().unwrap_or("-")),
        format!("State:  {}", if d.active { "Active" } else { "Inactive" }),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        DevicesCommand::List {
            page,
            search,
            active,
        } => {
            let request = util::page_request(console, page)?;
            let page =
                output::with_spinner(global, "Loading devices...", console.list_devices(&request))
                    .await?;
            let pager = Pager::from_page(&page);
            let view = ListView::new(
                page.content,
                DeviceFilter {
                    search: search.unwrap_or_default(),
                    active,
                },
            );
            let devices = view.visible_cloned();
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.uuid.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_pager(&global.output, &pager.label(), pager.total_elements, global.quiet);
            Ok(())
        }

        DevicesCommand::Register {
            name,
            username,
            uuid,
        } => {
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "cannot be empty".into(),
                });
            }
            let uuid = uuid.map_or_else(DeviceUuid::generate, DeviceUuid::from);
            let request = RegisterDeviceRequest {
                device_uuid: uuid.into_inner(),
                device_name: name,
                username,
            };
            let device = console.register_device(&request).await?;
            let out = output::render_single(&global.output, &device, detail, |d| d.uuid.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Config {
            id,
            uuid,
            name,
            username,
            active,
        } => {
            let request = DeviceConfigRequest {
                id,
                device_uuid: uuid,
                device_name: name,
                is_active: active,
                username,
            };
            let device = console.configure_device(DeviceId(id), &request).await?;
            if !global.quiet {
                eprintln!("✓ Device {} updated", device.name);
            }
            Ok(())
        }
    }
}
