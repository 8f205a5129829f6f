use std::path::PathBuf;
use thiserror::Error;

/// Error type for all possible failures in the library.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Could not resolve '{0}' to a supported platform (mac64, win32, linux64)")]
    UnresolvedPlatform(String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract archive '{path}': {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Driver executable not found under '{path}' after extraction")]
    DriverExecutableNotFound { path: PathBuf },

    #[error("Failed to execute command '{command}': {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' output could not be parsed: {source}")]
    CommandOutputParsing {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Browser not found. Please specify the path manually or ensure it's in a standard location.")]
    BrowserNotFound,

    #[error("Failed to parse browser version from output: '{output}'")]
    BrowserVersionParsing { output: String },

    #[error("Failed to read the overwrite answer: {0}")]
    Prompt(#[source] std::io::Error),
}
