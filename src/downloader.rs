//! Streams a driver archive to disk, reporting progress as it goes.

use crate::error::InstallError;
use log::info;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Receives transfer progress. The total comes from the `content-length`
/// header and is absent when the server does not send one.
pub trait DownloadProgress {
    fn on_progress(&mut self, downloaded: u64, total: Option<u64>);
    fn on_complete(&mut self) {}
}

/// Progress sink for callers that do not display anything.
pub struct NullProgress;

impl DownloadProgress for NullProgress {
    fn on_progress(&mut self, _downloaded: u64, _total: Option<u64>) {}
}

/// Downloads `url` into `dest_path`, creating parent directories as needed.
///
/// The body is streamed in chunks; each chunk updates `progress` with the
/// cumulative byte count. No resumption and no integrity check.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest_path: &Path,
    progress: &mut dyn DownloadProgress,
) -> Result<(), InstallError> {
    info!("Fetching from {}", url);

    if let Some(parent) = dest_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| InstallError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
    }

    let mut response = client.get(url).send().await?.error_for_status()?;
    let total = response.content_length();

    let mut dest_file = File::create(dest_path).await.map_err(|e| InstallError::Io {
        path: dest_path.to_path_buf(),
        source: e,
    })?;

    let mut downloaded: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        dest_file
            .write_all(&chunk)
            .await
            .map_err(|e| InstallError::Io {
                path: dest_path.to_path_buf(),
                source: e,
            })?;
        downloaded += chunk.len() as u64;
        progress.on_progress(downloaded, total);
    }

    dest_file.flush().await.map_err(|e| InstallError::Io {
        path: dest_path.to_path_buf(),
        source: e,
    })?;

    progress.on_complete();
    Ok(())
}

// --- Tests ---
