// Top-level public modules
pub mod browser;
pub mod downloader;
pub mod drivers;
pub mod error;
pub mod install_check;
pub mod install_path;
pub mod installer;
pub mod platform;
pub mod remote;
pub mod version;

pub use error::InstallError;

use async_trait::async_trait;

/// Driver-specific knowledge needed by the install flow: what the binary is
/// called and where the distribution service keeps it.
#[async_trait]
pub trait DriverInstaller {
    /// Base name of the driver executable (e.g., "chromedriver").
    fn driver_name(&self) -> &str;

    /// Fetches the exact release id to download for the configured version.
    async fn release_id(&self) -> Result<String, InstallError>;

    /// Archive URL for a release id on the configured platform.
    fn download_url(&self, release_id: &str) -> String;
}
