//! Driver version selection.

use std::fmt;

/// Version installed when the caller does not request one.
pub const DEFAULT_VERSION: &str = "91.0.4472.77";

/// A dot-separated driver version string, e.g. "91.0.4472.77".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
    /// `None` resolves to [`DEFAULT_VERSION`]; anything else is taken as-is.
    /// Malformed strings are not rejected here, they surface later as a
    /// failed release-id lookup.
    pub fn resolve(input: Option<&str>) -> Self {
        match input {
            Some(raw) => Version(raw.to_string()),
            None => Version(DEFAULT_VERSION.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything up to the last dot segment, e.g. "91.0.4472" for
    /// "91.0.4472.77". A version without dots is used unchanged.
    pub fn major(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map(|(major, _)| major)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Tests ---
