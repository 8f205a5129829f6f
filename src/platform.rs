//! Maps free-form OS identifiers to the canonical chromedriver platform tags.

use crate::error::InstallError;
use std::fmt;

// Alias sets accepted for each tag. Matching is case-insensitive and exact,
// no prefix or fuzzy matching.
const MAC_ALIASES: &[&str] = &["mac", "macintosh", "mac64", "os x", "x"];
const WIN_ALIASES: &[&str] = &["win", "windows", "win64", "win32"];
const LINUX_ALIASES: &[&str] = &["linux", "linux64"];

/// A supported operating-system/architecture pairing, as named by the
/// chromedriver distribution service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Mac64,
    Win32,
    Linux64,
}

impl Platform {
    /// Resolves an optional user-supplied OS string. `None` falls back to
    /// the platform the process is running on.
    pub fn resolve(input: Option<&str>) -> Result<Self, InstallError> {
        match input {
            Some(raw) => Self::from_alias(raw),
            None => Self::current(),
        }
    }

    fn from_alias(raw: &str) -> Result<Self, InstallError> {
        let needle = raw.trim().to_lowercase();
        if MAC_ALIASES.contains(&needle.as_str()) {
            Ok(Platform::Mac64)
        } else if WIN_ALIASES.contains(&needle.as_str()) {
            Ok(Platform::Win32)
        } else if LINUX_ALIASES.contains(&needle.as_str()) {
            Ok(Platform::Linux64)
        } else {
            Err(InstallError::UnresolvedPlatform(raw.to_string()))
        }
    }

    fn current() -> Result<Self, InstallError> {
        match std::env::consts::OS {
            "macos" => Ok(Platform::Mac64),
            "windows" => Ok(Platform::Win32),
            "linux" => Ok(Platform::Linux64),
            other => Err(InstallError::UnresolvedPlatform(other.to_string())),
        }
    }

    /// Canonical tag used in install-directory names and download URLs.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Mac64 => "mac64",
            Platform::Win32 => "win32",
            Platform::Linux64 => "linux64",
        }
    }

    /// Extension of the driver executable, ".exe" on Windows only.
    pub fn executable_suffix(&self) -> &'static str {
        match self {
            Platform::Win32 => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mac_alias_resolves() {
        for alias in ["mac", "macintosh", "mac64", "os x", "x"] {
            assert_eq!(Platform::resolve(Some(alias)).unwrap(), Platform::Mac64);
        }
    }

    #[test]
    fn every_win_alias_resolves() {
        for alias in ["win", "windows", "win64", "win32"] {
            assert_eq!(Platform::resolve(Some(alias)).unwrap(), Platform::Win32);
        }
    }

    #[test]
    fn every_linux_alias_resolves() {
        for alias in ["linux", "linux64"] {
            assert_eq!(Platform::resolve(Some(alias)).unwrap(), Platform::Linux64);
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(Platform::resolve(Some("Windows")).unwrap(), Platform::Win32);
        assert_eq!(Platform::resolve(Some("LINUX")).unwrap(), Platform::Linux64);
        assert_eq!(Platform::resolve(Some("OS X")).unwrap(), Platform::Mac64);
    }

    #[test]
    fn unknown_aliases_fail() {
        for bad in ["solaris", "lin", "windows 11", ""] {
            let err = Platform::resolve(Some(bad)).unwrap_err();
            assert!(matches!(err, InstallError::UnresolvedPlatform(_)));
        }
    }

    #[test]
    fn no_partial_matches() {
        // "winx" contains a valid alias as a prefix but must not resolve.
        assert!(Platform::resolve(Some("winx")).is_err());
        assert!(Platform::resolve(Some("linux64-arm")).is_err());
    }

    #[test]
    fn absent_input_uses_ambient_platform() {
        // The test host is always one of the supported platforms.
        let platform = Platform::resolve(None).unwrap();
        assert!(["mac64", "win32", "linux64"].contains(&platform.tag()));
    }

    #[test]
    fn executable_suffix_is_windows_only() {
        assert_eq!(Platform::Win32.executable_suffix(), ".exe");
        assert_eq!(Platform::Mac64.executable_suffix(), "");
        assert_eq!(Platform::Linux64.executable_suffix(), "");
    }
}
