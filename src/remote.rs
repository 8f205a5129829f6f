//! Endpoints of the chromedriver distribution service and the release-id
//! lookup.

use crate::error::InstallError;
use crate::platform::Platform;
use log::debug;

const DEFAULT_DOWNLOAD_BASE: &str = "https://chromedriver.storage.googleapis.com";
const DEFAULT_LATEST_RELEASE_BASE: &str =
    "https://chromedriver.storage.googleapis.com/LATEST_RELEASE_";

/// Base URLs of the distribution service. Overridable so tests can point
/// the install flow at a local server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base of the archive download URLs.
    pub download_base: String,
    /// Prefix of the release-id lookup URL; the major version is appended
    /// verbatim.
    pub latest_release_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            latest_release_base: DEFAULT_LATEST_RELEASE_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// URL of the driver archive for `release_id` on `platform`.
    pub fn download_url(&self, release_id: &str, driver_name: &str, platform: Platform) -> String {
        format!(
            "{}/{}/{}_{}.zip",
            self.download_base,
            release_id,
            driver_name,
            platform.tag()
        )
    }

    fn latest_release_url(&self, major_version: &str) -> String {
        format!("{}{}", self.latest_release_base, major_version)
    }
}

/// Fetches the exact release id to download for `major_version`.
///
/// A single GET with no retries; network and HTTP errors are fatal to the
/// caller. The response body is the release id.
pub async fn latest_release_id(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    major_version: &str,
) -> Result<String, InstallError> {
    let url = endpoints.latest_release_url(major_version);
    debug!("Looking up release id from {}", url);

    let body = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(body.trim().to_string())
}

// --- Tests ---
