//! # droidcast - Android broadcast intents from your desk
//!
//! Wires the pieces together: load [`config`], locate adb, build a
//! [`BroadcastDispatcher`](droidcast_core::BroadcastDispatcher) over an
//! [`AdbEmitter`](droidcast_adb::AdbEmitter), run one command, print the
//! outcome via [`output`].
//!
//! The binary in `main.rs` only parses arguments; each subcommand body
//! lives here so integration tests can call it.

pub mod config;
pub mod output;

pub use config::{load_config, load_config_from, Config};

use droidcast_adb::{list_devices, AdbEmitter, ToolAvailability};
use droidcast_core::prelude::*;
use droidcast_core::BroadcastDispatcher;

/// Send one broadcast. Returns whether the dispatch succeeded; failures
/// are already printed as a report, never raised.
pub async fn run_send(
    config: &Config,
    action: &str,
    device: Option<&str>,
    json: bool,
) -> Result<bool> {
    let dispatcher = BroadcastDispatcher::new(AdbEmitter::new(resolve_adb(config).await));

    let action = config.resolve_action(action);
    let device = config.resolve_device(device);

    let report = dispatcher.dispatch(action, device).await;
    output::print_report(&report, json)?;
    Ok(report.is_success())
}

/// List devices known to the adb server
pub async fn run_devices(config: &Config, json: bool) -> Result<()> {
    let devices = list_devices(&resolve_adb(config).await).await?;
    output::print_devices(&devices, json)
}

/// Report adb availability. Returns whether adb was found.
pub async fn run_doctor(config: &Config, json: bool) -> Result<bool> {
    let availability = ToolAvailability::check(config.adb_path.as_deref()).await;
    output::print_doctor(&availability, json)?;
    Ok(availability.adb)
}

/// Pick the adb binary to run.
///
/// When discovery fails we still hand back a bare "adb": the spawn then
/// fails inside the emitter and flows into the normal failure reporting,
/// keeping the "every dispatch ends in a report" contract.
async fn resolve_adb(config: &Config) -> String {
    ToolAvailability::check(config.adb_path.as_deref())
        .await
        .adb_path
        .unwrap_or_else(|| "adb".to_string())
}
