//! Health data command handlers.

use vitalwatch_core::{Console, SyncHealthDataRequest};

use crate::cli::{GlobalOpts, HealthArgs, HealthCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(console: &Console, args: HealthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        HealthCommand::Sync { file } => {
            let request: SyncHealthDataRequest = util::read_json_file(&file)?;
            let count = request.data_points.len();
            output::with_spinner(
                global,
                "Uploading samples...",
                console.sync_health_data(&request),
            )
            .await?;
            if !global.quiet {
                eprintln!("✓ Synced {count} samples for {}", request.device_uuid);
            }
            Ok(())
        }
    }
}
