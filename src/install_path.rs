//! Computes and creates the directory the driver is installed into.

use crate::error::InstallError;
use crate::platform::Platform;
use crate::version::Version;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Name of the per-install directory, e.g. `ChromeDriver_linux64_91.0.4472.77`.
pub fn install_dir_name(platform: Platform, version: &Version) -> String {
    format!("ChromeDriver_{}_{}", platform.tag(), version)
}

/// Resolves the install directory for this platform/version pair and makes
/// sure it exists on disk.
///
/// With no base the directory lives under the current working directory. An
/// unusable base (a path that is not a directory, or one that cannot be
/// created) falls back to the default location instead of failing the
/// install.
pub fn resolve_install_dir(
    base: Option<&Path>,
    platform: Platform,
    version: &Version,
) -> Result<PathBuf, InstallError> {
    let cwd = std::env::current_dir().map_err(|e| InstallError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    resolve_under(&cwd, base, platform, version)
}

fn resolve_under(
    cwd: &Path,
    base: Option<&Path>,
    platform: Platform,
    version: &Version,
) -> Result<PathBuf, InstallError> {
    let dir_name = install_dir_name(platform, version);
    let default_path = cwd.join(&dir_name);

    let Some(base) = base else {
        return make_dir(default_path);
    };

    let candidate = match std::path::absolute(base) {
        // Strip Windows verbatim prefixes so the path stays joinable and
        // printable.
        Ok(abs) => dunce::simplified(&abs).join(&dir_name),
        Err(err) => {
            warn!(
                "Could not resolve base path {}: {}; falling back to the default location",
                base.display(),
                err
            );
            return make_dir(default_path);
        }
    };

    if candidate.exists() && !candidate.is_dir() {
        warn!(
            "{} is not a directory; falling back to the default location",
            candidate.display()
        );
        return make_dir(default_path);
    }

    match make_dir(candidate) {
        Ok(path) => Ok(path),
        Err(err) => {
            warn!("Could not use the requested base path: {err}; falling back to the default location");
            make_dir(default_path)
        }
    }
}

/// Creates the directory (with parents) if needed and reports the one in
/// use. A pre-existing directory is reused as-is.
fn make_dir(path: PathBuf) -> Result<PathBuf, InstallError> {
    std::fs::create_dir_all(&path).map_err(|e| InstallError::Io {
        path: path.clone(),
        source: e,
    })?;
    info!("Using path: {}", path.display());
    Ok(path)
}

// --- Tests ---
