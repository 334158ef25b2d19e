//! adb availability checking
//!
//! Locates the `adb` binary via PATH, the Android SDK environment
//! variables, and the default SDK install locations, and verifies it
//! actually runs.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Cached availability of the adb binary
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    /// Whether a working `adb` was found
    pub adb: bool,

    /// Path to the adb binary if found
    pub adb_path: Option<String>,
}

impl ToolAvailability {
    /// Check adb availability (run once at startup)
    ///
    /// `override_path` wins when set (config `adb_path`); it is still
    /// verified with `adb version` before being trusted.
    pub async fn check(override_path: Option<&str>) -> Self {
        let candidates = match override_path {
            Some(path) => vec![PathBuf::from(path)],
            None => Self::candidate_paths(),
        };

        for candidate in candidates {
            let path = candidate.to_string_lossy().to_string();
            if Self::verify(&path).await {
                tracing::debug!("Using adb at {}", path);
                return Self {
                    adb: true,
                    adb_path: Some(path),
                };
            }
        }

        Self::default()
    }

    /// Candidate adb locations, most specific first
    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // PATH lookup
        if let Ok(path) = which::which("adb") {
            candidates.push(path);
        }

        // SDK environment variables
        for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
            if let Ok(sdk) = std::env::var(var) {
                candidates.push(PathBuf::from(sdk).join("platform-tools").join(adb_name()));
            }
        }

        // Default SDK install locations
        if let Some(home) = dirs::home_dir() {
            candidates.push(
                home.join("Android")
                    .join("Sdk")
                    .join("platform-tools")
                    .join(adb_name()),
            );
            #[cfg(target_os = "macos")]
            candidates.push(
                home.join("Library")
                    .join("Android")
                    .join("sdk")
                    .join("platform-tools")
                    .join(adb_name()),
            );
        }

        candidates
    }

    /// Check that the binary at `path` is a runnable adb
    async fn verify(path: &str) -> bool {
        Command::new(path)
            .arg("version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .inspect_err(|e| tracing::debug!("adb check failed for {}: {}", path, e))
            .unwrap_or(false)
    }
}

fn adb_name() -> &'static str {
    if cfg!(windows) {
        "adb.exe"
    } else {
        "adb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_candidate_paths_include_sdk_env() {
        std::env::set_var("ANDROID_HOME", "/opt/android-sdk");
        let candidates = ToolAvailability::candidate_paths();
        std::env::remove_var("ANDROID_HOME");

        assert!(candidates
            .iter()
            .any(|p| p.starts_with("/opt/android-sdk/platform-tools")));
    }

    #[tokio::test]
    #[serial]
    async fn test_check_with_bogus_override_reports_unavailable() {
        let availability = ToolAvailability::check(Some("/nonexistent/adb")).await;
        assert!(!availability.adb);
        assert_eq!(availability.adb_path, None);
    }
}
