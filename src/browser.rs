//! Locates an installed Chrome and reads its version, so a matching driver
//! can be requested without typing the version by hand.

use crate::error::InstallError;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Gets the version of the locally installed Chrome browser.
///
/// If `path_override` is provided, it is used directly. Otherwise the
/// browser is looked up in standard system locations. On Windows the
/// version comes from PowerShell's `Get-Command`; elsewhere from the
/// `--version` flag.
pub async fn detect_chrome_version(
    path_override: Option<&Path>,
) -> Result<String, InstallError> {
    let path = match path_override {
        Some(p) => p.to_path_buf(),
        None => find_chrome_path().ok_or(InstallError::BrowserNotFound)?,
    };
    version_on_platform(&path).await
}

#[cfg(target_os = "windows")]
fn find_chrome_path() -> Option<PathBuf> {
    let program_files = std::env::var("ProgramFiles").ok()?;
    let program_files_x86 = std::env::var("ProgramFiles(x86)").ok()?;
    let local_appdata = std::env::var("LOCALAPPDATA").ok()?;

    [program_files, program_files_x86, local_appdata]
        .into_iter()
        .map(|base| {
            Path::new(&base)
                .join("Google\\Chrome\\Application")
                .join("chrome.exe")
        })
        .find(|path| path.exists())
}

#[cfg(target_os = "macos")]
fn find_chrome_path() -> Option<PathBuf> {
    let path = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
    if path.exists() { Some(path) } else { None }
}

#[cfg(target_os = "linux")]
fn find_chrome_path() -> Option<PathBuf> {
    [
        "google-chrome",
        "google-chrome-stable",
        "chromium-browser",
        "chromium",
    ]
    .into_iter()
    .find_map(|name| which::which(name).ok())
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn find_chrome_path() -> Option<PathBuf> {
    None
}

#[cfg(target_os = "windows")]
async fn version_on_platform(path: &Path) -> Result<String, InstallError> {
    // `chrome.exe --version` prints nothing on Windows; read the file
    // version through PowerShell instead.
    let command_str = format!(
        "(Get-Command '{}').Version.ToString()",
        path.to_string_lossy()
    );
    let output = Command::new("powershell")
        .args(["-Command", &command_str])
        .output()
        .await
        .map_err(|e| InstallError::CommandExecution {
            command: command_str.clone(),
            source: e,
        })?;

    let version = String::from_utf8(output.stdout).map_err(|e| {
        InstallError::CommandOutputParsing {
            command: command_str,
            source: e,
        }
    })?;
    Ok(version.trim().to_string())
}

#[cfg(not(target_os = "windows"))]
async fn version_on_platform(path: &Path) -> Result<String, InstallError> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .await
        .map_err(|e| InstallError::CommandExecution {
            command: format!("'{}' --version", path.to_string_lossy()),
            source: e,
        })?;

    let stdout = String::from_utf8(output.stdout).map_err(|e| {
        InstallError::CommandOutputParsing {
            command: format!("'{}' --version", path.to_string_lossy()),
            source: e,
        }
    })?;

    parse_version_token(&stdout).ok_or(InstallError::BrowserVersionParsing { output: stdout })
}

/// Picks the first dotted numeric token out of version output such as
/// "Google Chrome 104.0.5112.79".
fn parse_version_token(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find(|token| {
            token.chars().next().is_some_and(|c| c.is_ascii_digit()) && token.contains('.')
        })
        .map(|token| token.to_string())
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_version_token_from_typical_output() {
        assert_eq!(
            parse_version_token("Google Chrome 104.0.5112.79 \n"),
            Some("104.0.5112.79".to_string())
        );
        assert_eq!(
            parse_version_token("Chromium 115.0.5790.102 snap"),
            Some("115.0.5790.102".to_string())
        );
    }

    #[test]
    fn rejects_output_without_a_version() {
        assert_eq!(parse_version_token("no version here"), None);
        assert_eq!(parse_version_token(""), None);
        // A bare number without dots is not a version.
        assert_eq!(parse_version_token("Chrome 104"), None);
    }

    // Attempts to find the installed Chrome; skipped when it is absent.
    #[tokio::test]
    async fn detects_the_local_chrome_when_present() {
        match detect_chrome_version(None).await {
            Ok(version) => {
                assert!(!version.is_empty());
                assert!(version.contains('.'));
            }
            Err(InstallError::BrowserNotFound) => {
                println!("Chrome not found, skipping test.");
            }
            Err(e) => panic!("An unexpected error occurred: {:?}", e),
        }
    }
}
