//! Device discovery using `adb devices -l`

use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tokio::time::timeout;

use droidcast_core::prelude::*;

/// Default timeout for the adb devices command
const DEVICES_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection state as reported in the second column of `adb devices`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    /// Connected and ready for commands
    Device,
    /// Visible but not responding
    Offline,
    /// Connected but USB debugging not authorized on-device
    Unauthorized,
    /// Anything else adb may print (e.g. `recovery`, `sideload`)
    Other,
}

impl DeviceState {
    fn parse(raw: &str) -> Self {
        match raw {
            "device" => Self::Device,
            "offline" => Self::Offline,
            "unauthorized" => Self::Unauthorized,
            _ => Self::Other,
        }
    }
}

/// A device or emulator known to the adb server
#[derive(Debug, Clone, Serialize)]
pub struct AdbDevice {
    /// Serial used with `adb -s`
    pub serial: String,

    pub state: DeviceState,

    /// `model:` property from the long listing, underscores replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// `product:` property from the long listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl AdbDevice {
    /// Whether broadcasts can be sent to this device right now
    pub fn is_ready(&self) -> bool {
        self.state == DeviceState::Device
    }

    pub fn is_emulator(&self) -> bool {
        self.serial.starts_with("emulator-")
    }

    /// Get a display string for the device
    pub fn display_name(&self) -> String {
        match &self.model {
            Some(model) => format!("{} ({})", model, self.serial),
            None => self.serial.clone(),
        }
    }

    /// Check if device matches a specifier: exact serial, or
    /// case-insensitive substring of the model name.
    pub fn matches(&self, specifier: &str) -> bool {
        if self.serial == specifier {
            return true;
        }
        if let Some(model) = &self.model {
            if model.to_lowercase().contains(&specifier.to_lowercase()) {
                return true;
            }
        }
        false
    }
}

/// List devices known to the adb server
pub async fn list_devices(adb_path: &str) -> Result<Vec<AdbDevice>> {
    list_devices_with_timeout(adb_path, DEVICES_TIMEOUT).await
}

/// List devices with a custom timeout
pub async fn list_devices_with_timeout(
    adb_path: &str,
    timeout_duration: Duration,
) -> Result<Vec<AdbDevice>> {
    info!("Listing adb devices...");

    let output = timeout(
        timeout_duration,
        Command::new(adb_path)
            .args(["devices", "-l"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| Error::process("adb devices timed out"))?
    .map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::AdbNotFound
        } else {
            Error::process(format!("Failed to run adb devices: {}", e))
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::process(format!(
            "adb devices failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let devices = parse_devices_output(&stdout);
    info!("Found {} adb device(s)", devices.len());

    Ok(devices)
}

/// Parse the output of `adb devices -l`
///
/// One device per line after the header:
///
/// ```text
/// List of devices attached
/// emulator-5554   device product:sdk_gphone64_x86_64 model:sdk_gphone64_x86_64 transport_id:1
/// R58M12ABCDE     unauthorized usb:1-2 transport_id:2
/// ```
fn parse_devices_output(output: &str) -> Vec<AdbDevice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("List of devices") && !line.starts_with('*')
        })
        .filter_map(parse_device_line)
        .collect()
}

fn parse_device_line(line: &str) -> Option<AdbDevice> {
    let mut fields = line.split_whitespace();
    let serial = fields.next()?.to_string();
    let state = DeviceState::parse(fields.next()?);

    let mut model = None;
    let mut product = None;
    for field in fields {
        if let Some(value) = field.strip_prefix("model:") {
            model = Some(value.replace('_', " "));
        } else if let Some(value) = field.strip_prefix("product:") {
            product = Some(value.to_string());
        }
    }

    Some(AdbDevice {
        serial,
        state,
        model,
        product,
    })
}
