//! Extracts the downloaded archive into the install directory and cleans up
//! after itself.

use crate::error::InstallError;
use log::info;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extracts `archive_path` into `target_dir`, deletes the archive, and
/// returns the path of the driver executable.
///
/// Extraction failures leave already-written entries in place; there is no
/// rollback.
pub async fn install_archive(
    archive_path: &Path,
    target_dir: &Path,
    driver_file_name: &str,
) -> Result<PathBuf, InstallError> {
    info!("Extracting to {}", target_dir.display());
    unzip_file(archive_path, target_dir).await?;

    info!("Deleting the downloaded archive");
    tokio::fs::remove_file(archive_path)
        .await
        .map_err(|e| InstallError::Io {
            path: archive_path.to_path_buf(),
            source: e,
        })?;

    find_driver_executable(target_dir, driver_file_name)
}

/// Decompresses a .zip archive to a specified directory.
///
/// The core zip logic is synchronous, so we wrap it in `spawn_blocking` to
/// avoid blocking the Tokio runtime.
pub async fn unzip_file(archive_path: &Path, extract_to: &Path) -> Result<(), InstallError> {
    let archive_path = archive_path.to_path_buf();
    let extract_to = extract_to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive_path).map_err(|e| InstallError::Io {
            path: archive_path.clone(),
            source: e,
        })?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| InstallError::Extraction {
            path: archive_path.clone(),
            source: e,
        })?;

        std::fs::create_dir_all(&extract_to).map_err(|e| InstallError::Io {
            path: extract_to.clone(),
            source: e,
        })?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| InstallError::Extraction {
                path: archive_path.clone(),
                source: e,
            })?;

            // Entries with names escaping the target directory are skipped.
            let Some(relative) = entry.enclosed_name() else {
                continue;
            };
            let outpath = extract_to.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&outpath).map_err(|e| InstallError::Io {
                    path: outpath,
                    source: e,
                })?;
                continue;
            }

            if let Some(parent) = outpath.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| InstallError::Io {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
            }

            let mut outfile = std::fs::File::create(&outpath).map_err(|e| InstallError::Io {
                path: outpath.clone(),
                source: e,
            })?;

            std::io::copy(&mut entry, &mut outfile).map_err(|e| InstallError::Io {
                path: outpath.clone(),
                source: e,
            })?;

            // Restore executable bits recorded in the archive.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                        .map_err(|e| InstallError::Io {
                            path: outpath.clone(),
                            source: e,
                        })?;
                }
            }
        }

        Ok(())
    })
    .await
    .unwrap() // Propagate panics from the blocking task.
}

/// Searches `search_path` for the driver executable. Archives sometimes
/// carry a top-level directory, so the expected file is not necessarily at
/// the root.
fn find_driver_executable(
    search_path: &Path,
    driver_file_name: &str,
) -> Result<PathBuf, InstallError> {
    for entry in WalkDir::new(search_path) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(search_path).to_path_buf();
            InstallError::Io {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            }
        })?;

        if entry.path().file_name().and_then(|n| n.to_str()) == Some(driver_file_name) {
            return Ok(entry.path().to_path_buf());
        }
    }

    Err(InstallError::DriverExecutableNotFound {
        path: search_path.to_path_buf(),
    })
}

// --- Tests ---
