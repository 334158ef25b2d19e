//! Integration tests driving AdbEmitter against a scripted fake adb binary.
//!
//! Unix-only: the fake adb is a shell script dropped into a temp dir.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;

use droidcast_adb::AdbEmitter;
use droidcast_core::{BroadcastIntent, IntentEmitter};

/// Write an executable `adb` script into `dir` and return its path.
fn write_fake_adb(dir: &Path, body: &str) -> String {
    let path = dir.join("adb");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn emit_succeeds_on_completed_broadcast() {
    let dir = TempDir::new().unwrap();
    let adb = write_fake_adb(
        dir.path(),
        r#"echo "Broadcasting: Intent { act=$5 flg=0x400020 }"
echo "Broadcast completed: result=0""#,
    );

    let emitter = AdbEmitter::new(adb);
    let intent = BroadcastIntent::new("com.example.ACTION_REFRESH").unwrap();

    assert!(emitter.emit(&intent).await.is_ok());
}

#[tokio::test]
async fn emit_surfaces_am_error_line() {
    let dir = TempDir::new().unwrap();
    let adb = write_fake_adb(dir.path(), r#"echo "Error: permission denied""#);

    let emitter = AdbEmitter::new(adb);
    let intent = BroadcastIntent::new("com.example.A").unwrap();

    let err = emitter.emit(&intent).await.unwrap_err();
    assert!(err.to_string().contains("permission denied"));
}

#[tokio::test]
async fn emit_surfaces_adb_stderr_on_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let adb = write_fake_adb(
        dir.path(),
        r#"echo "adb: no devices/emulators found" >&2
exit 1"#,
    );

    let emitter = AdbEmitter::new(adb);
    let intent = BroadcastIntent::new("com.example.A").unwrap();

    let err = emitter.emit(&intent).await.unwrap_err();
    assert_eq!(err.to_string(), "no devices/emulators found");
}

#[tokio::test]
async fn emit_reports_missing_adb_binary() {
    let emitter = AdbEmitter::new("/nonexistent/path/to/adb");
    let intent = BroadcastIntent::new("com.example.A").unwrap();

    let err = emitter.emit(&intent).await.unwrap_err();
    assert!(matches!(err, droidcast_core::Error::AdbNotFound));
}

#[tokio::test]
async fn emit_passes_device_serial_through() {
    let dir = TempDir::new().unwrap();
    // Fail unless the first two args are `-s wanted-serial`.
    let adb = write_fake_adb(
        dir.path(),
        r#"if [ "$1" = "-s" ] && [ "$2" = "emulator-5554" ]; then
  echo "Broadcast completed: result=0"
else
  echo "Error: wrong serial: $1 $2"
fi"#,
    );

    let emitter = AdbEmitter::new(adb);
    let intent = BroadcastIntent::new("com.example.A")
        .unwrap()
        .with_device("emulator-5554");

    assert!(emitter.emit(&intent).await.is_ok());
}
