//! Broadcast emission through `adb shell am broadcast`
//!
//! The activity manager on the device is the actual broadcast facility;
//! this module only drives it. One emission maps to one adb invocation:
//!
//! ```text
//! adb [-s SERIAL] shell am broadcast -a ACTION --include-stopped-packages
//! ```
//!
//! `--include-stopped-packages` keeps delivery open to receivers whose
//! packages are in the stopped state, matching how broadcast-driven
//! automation apps expect to be reached.

use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;
use tokio::time::timeout;

use droidcast_core::prelude::*;
use droidcast_core::{BroadcastIntent, IntentEmitter};

/// Default bound on a single adb invocation. A hung adb server should
/// fail the dispatch, not wedge the caller.
const BROADCAST_TIMEOUT: Duration = Duration::from_secs(15);

/// `am broadcast` completion line, e.g. `Broadcast completed: result=0`
static RESULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Broadcast completed:\s*result=(-?\d+)").expect("Invalid result pattern regex")
});

/// Sends broadcast intents to a device through adb.
pub struct AdbEmitter {
    adb_path: String,
    timeout: Duration,
}

impl AdbEmitter {
    pub fn new(adb_path: impl Into<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
            timeout: BROADCAST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Argument list for one emission, minus the adb binary itself
    fn build_args(intent: &BroadcastIntent) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(serial) = intent.device() {
            args.push("-s".to_string());
            args.push(serial.to_string());
        }
        args.extend(
            ["shell", "am", "broadcast", "-a"]
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(quote_for_device_shell(intent.action()));
        args.push("--include-stopped-packages".to_string());
        args
    }

    async fn run_broadcast(&self, intent: &BroadcastIntent) -> Result<()> {
        let args = Self::build_args(intent);
        debug!("Running {} {}", self.adb_path, args.join(" "));

        let output = timeout(
            self.timeout,
            Command::new(&self.adb_path)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output(),
        )
        .await
        .map_err(|_| {
            Error::broadcast(format!(
                "adb did not respond within {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::AdbNotFound
            } else {
                Error::process(format!("Failed to run adb: {}", e))
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                format!("adb exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(classify_adb_error(&detail, intent.device()));
        }

        parse_am_output(&stdout)
    }
}

impl IntentEmitter for AdbEmitter {
    async fn emit(&self, intent: &BroadcastIntent) -> Result<()> {
        self.run_broadcast(intent).await
    }
}

/// Interpret the stdout of a zero-exit `am broadcast` call.
///
/// A completion line means the activity manager accepted the intent;
/// the numeric result code describes receiver behaviour, not delivery
/// failure, so any code counts as success. `am` reports its own errors
/// on stdout with the shell still exiting zero, so error markers are
/// checked first.
fn parse_am_output(stdout: &str) -> Result<()> {
    for line in stdout.lines() {
        let line = line.trim();
        if line.starts_with("Error:") || line.contains("Exception occurred while executing") {
            return Err(Error::broadcast(line.to_string()));
        }
    }

    if let Some(caps) = RESULT_PATTERN.captures(stdout) {
        let code = caps.get(1).map(|m| m.as_str()).unwrap_or("?");
        debug!("am broadcast completed with result={}", code);
        return Ok(());
    }

    // Older am builds print only the "Broadcasting:" line. Zero exit
    // with no error marker still counts as accepted.
    Ok(())
}

/// Map adb's own stderr complaints onto our error model.
fn classify_adb_error(detail: &str, device: Option<&str>) -> Error {
    let lower = detail.to_lowercase();
    if lower.contains("not found") && lower.contains("device") {
        return Error::no_such_device(device.unwrap_or("unknown"));
    }
    if lower.contains("no devices/emulators found") {
        return Error::broadcast("no devices/emulators found");
    }
    Error::broadcast(detail.to_string())
}

/// Quote an argument for the device-side shell.
///
/// `adb shell` re-joins its arguments into a single command line that the
/// device shell parses again, so anything outside the safe charset gets
/// single-quoted (with embedded quotes escaped the POSIX way).
fn quote_for_device_shell(arg: &str) -> String {
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':' | '/'));
    if safe && !arg.is_empty() {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_without_device() {
        let intent = BroadcastIntent::new("com.example.ACTION_REFRESH").unwrap();
        let args = AdbEmitter::build_args(&intent);
        assert_eq!(
            args,
            vec![
                "shell",
                "am",
                "broadcast",
                "-a",
                "com.example.ACTION_REFRESH",
                "--include-stopped-packages",
            ]
        );
    }

    #[test]
    fn test_build_args_with_device() {
        let intent = BroadcastIntent::new("com.tasker.RING_OFF")
            .unwrap()
            .with_device("emulator-5554");
        let args = AdbEmitter::build_args(&intent);
        assert_eq!(&args[..2], &["-s", "emulator-5554"]);
        assert!(args.contains(&"--include-stopped-packages".to_string()));
    }

    #[test]
    fn test_parse_am_output_completed() {
        let stdout = "Broadcasting: Intent { act=com.example.A flg=0x400020 }\n\
                      Broadcast completed: result=0\n";
        assert!(parse_am_output(stdout).is_ok());
    }

    #[test]
    fn test_parse_am_output_nonzero_result_is_still_delivery() {
        assert!(parse_am_output("Broadcast completed: result=-1\n").is_ok());
    }

    #[test]
    fn test_parse_am_output_error_line() {
        let stdout = "Error: Activity manager is shutting down\n";
        let err = parse_am_output(stdout).unwrap_err();
        assert!(err.to_string().contains("Activity manager is shutting down"));
    }

    #[test]
    fn test_parse_am_output_security_exception() {
        let stdout = "Broadcasting: Intent { act=android.intent.action.REBOOT }\n\
            Exception occurred while executing 'broadcast': java.lang.SecurityException: permission denied\n";
        let err = parse_am_output(stdout).unwrap_err();
        assert!(err.to_string().contains("SecurityException"));
    }

    #[test]
    fn test_classify_missing_device() {
        let err = classify_adb_error("error: device 'emulator-9999' not found", Some("emulator-9999"));
        assert!(matches!(err, Error::NoSuchDevice { .. }));
        assert!(err.to_string().contains("emulator-9999"));
    }

    #[test]
    fn test_classify_no_devices() {
        let err = classify_adb_error("adb: no devices/emulators found", None);
        assert_eq!(err.to_string(), "no devices/emulators found");
    }

    #[test]
    fn test_quote_plain_action_untouched() {
        assert_eq!(
            quote_for_device_shell("com.example.ACTION_REFRESH"),
            "com.example.ACTION_REFRESH"
        );
    }

    #[test]
    fn test_quote_action_with_spaces() {
        assert_eq!(quote_for_device_shell("has space"), "'has space'");
    }

    #[test]
    fn test_quote_action_with_single_quote() {
        assert_eq!(quote_for_device_shell("a'b"), r"'a'\''b'");
    }
}
