//! Chromedriver resolution, download and installation.

use crate::DriverInstaller;
use crate::downloader::{self, DownloadProgress};
use crate::error::InstallError;
use crate::install_check::{self, OverwritePrompt};
use crate::install_path;
use crate::installer;
use crate::platform::Platform;
use crate::remote::{self, Endpoints};
use crate::version::Version;
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

/// Base name of the driver executable.
pub const DRIVER_NAME: &str = "chromedriver";

/// Resolves, downloads and installs a chromedriver binary.
///
/// Platform and version are fixed at construction; each instance describes
/// exactly one install.
#[derive(Debug)]
pub struct ChromeDriver {
    platform: Platform,
    version: Version,
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl ChromeDriver {
    /// Fixes the platform and version for this install. An absent `os`
    /// settles to the ambient platform and an absent `version` to the
    /// default.
    pub fn new(version: Option<&str>, os: Option<&str>) -> Result<Self, InstallError> {
        Ok(Self {
            platform: Platform::resolve(os)?,
            version: Version::resolve(version),
            endpoints: Endpoints::default(),
            client: reqwest::Client::new(),
        })
    }

    /// Replaces the default distribution endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// File name of the driver executable on the configured platform.
    pub fn driver_file_name(&self) -> String {
        format!("{}{}", DRIVER_NAME, self.platform.executable_suffix())
    }

    /// Runs the full install sequence and returns the driver executable
    /// path.
    ///
    /// The install directory is resolved (and created) first, then the
    /// existing-driver check decides whether the network is touched at all.
    /// A skipped install returns the path of the driver already in place.
    pub async fn get_driver(
        &self,
        base: Option<&Path>,
        overwrite: Option<bool>,
        prompt: &mut dyn OverwritePrompt,
        progress: &mut dyn DownloadProgress,
    ) -> Result<PathBuf, InstallError> {
        let install_dir = install_path::resolve_install_dir(base, self.platform, &self.version)?;
        let driver_path =
            install_check::expected_driver_path(&install_dir, DRIVER_NAME, self.platform);

        let decision = install_check::decide(&driver_path, overwrite, prompt)?;
        if !decision.should_download() {
            return Ok(driver_path);
        }

        let release_id = self.release_id().await?;
        let url = self.download_url(&release_id);

        let archive_path = install_dir.join(format!("{}.zip", DRIVER_NAME));
        downloader::download_file(&self.client, &url, &archive_path, progress).await?;

        let installed =
            installer::install_archive(&archive_path, &install_dir, &self.driver_file_name())
                .await?;
        info!("Installed driver at {}", installed.display());
        Ok(installed)
    }
}

#[async_trait]
impl DriverInstaller for ChromeDriver {
    fn driver_name(&self) -> &str {
        DRIVER_NAME
    }

    async fn release_id(&self) -> Result<String, InstallError> {
        remote::latest_release_id(&self.client, &self.endpoints, self.version.major()).await
    }

    fn download_url(&self, release_id: &str) -> String {
        self.endpoints
            .download_url(release_id, DRIVER_NAME, self.platform)
    }
}

// --- Tests ---
