//! Output rendering - human lines or JSON for scripts
//!
//! With `--json` every command prints exactly one JSON document to stdout
//! so wrapping scripts never have to scrape human formatting. A dispatch
//! report serializes as `{"success":bool,"message"?:string}`.

use droidcast_adb::{AdbDevice, ToolAvailability};
use droidcast_core::prelude::*;
use droidcast_core::DispatchReport;

/// Print a dispatch outcome
pub fn print_report(report: &DispatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    if report.is_success() {
        println!("✅ Broadcast sent");
    } else {
        println!(
            "❌ {}",
            report.message.as_deref().unwrap_or("Broadcast failed")
        );
    }
    Ok(())
}

/// Print the device list
pub fn print_devices(devices: &[AdbDevice], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No devices connected.");
        return Ok(());
    }

    for device in devices {
        let marker = if device.is_ready() { "✅" } else { "⚠️" };
        println!("{} {} [{:?}]", marker, device.display_name(), device.state);
    }
    Ok(())
}

/// Print the doctor summary
pub fn print_doctor(availability: &ToolAvailability, json: bool) -> Result<()> {
    if json {
        let doc = serde_json::json!({
            "adb": availability.adb,
            "adb_path": availability.adb_path,
        });
        println!("{}", serde_json::to_string(&doc)?);
        return Ok(());
    }

    match &availability.adb_path {
        Some(path) => println!("✅ adb found: {}", path),
        None => {
            println!("❌ adb not found");
            println!("   Install Android platform-tools, or set adb_path in");
            println!("   {}", crate::config::config_path().display());
        }
    }
    Ok(())
}
