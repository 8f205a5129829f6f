use anyhow::Result;
use chromedriver_installer::browser;
use chromedriver_installer::downloader::DownloadProgress;
use chromedriver_installer::drivers::chromedriver::ChromeDriver;
use chromedriver_installer::install_check::StdinPrompt;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Download and install a chromedriver binary matching a Chrome version.
///
/// Without flags the current platform and a fixed known-good version are
/// used and the driver lands in a ChromeDriver_<os>_<version> folder under
/// the current directory.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Target operating system (e.g. win, linux, mac); defaults to the current platform
    #[arg(long, short = 'o', value_name = "OS")]
    os: Option<String>,

    /// Driver version to install, e.g. 91.0.4472.77; defaults to a fixed known-good version
    #[arg(long = "driver-version", value_name = "VERSION", conflicts_with = "detect")]
    driver_version: Option<String>,

    /// Detect the installed Chrome version and install a matching driver
    #[arg(long)]
    detect: bool,

    /// Directory the install folder is created under; defaults to the current directory
    #[arg(long, short = 'p', value_name = "PATH")]
    path: Option<PathBuf>,

    /// Replace an existing driver without asking
    #[arg(long, conflicts_with = "keep_existing")]
    overwrite: bool,

    /// Keep an existing driver without asking
    #[arg(long = "keep-existing")]
    keep_existing: bool,

    /// Ask for OS, version and folder on the terminal instead of flags
    #[arg(long, short = 'i')]
    interactive: bool,
}

/// Renders transfer progress as a single self-updating stderr line.
struct ConsoleProgress;

impl DownloadProgress for ConsoleProgress {
    fn on_progress(&mut self, downloaded: u64, total: Option<u64>) {
        match total {
            Some(total) if total > 0 => eprint!(
                "\rDownloading... {:>3}% ({} / {})",
                downloaded * 100 / total,
                format_bytes(downloaded),
                format_bytes(total)
            ),
            _ => eprint!("\rDownloading... {}", format_bytes(downloaded)),
        }
        let _ = std::io::stderr().flush();
    }

    fn on_complete(&mut self) {
        eprintln!();
    }
}

fn format_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", n, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut cli = Cli::parse();

    if cli.interactive {
        prompt_for_missing(&mut cli)?;
    }

    let version = match (&cli.driver_version, cli.detect) {
        (Some(explicit), _) => Some(explicit.clone()),
        (None, true) => Some(browser::detect_chrome_version(None).await?),
        (None, false) => None,
    };

    let overwrite = if cli.overwrite {
        Some(true)
    } else if cli.keep_existing {
        Some(false)
    } else {
        None
    };

    let driver = ChromeDriver::new(version.as_deref(), cli.os.as_deref())?;
    let driver_path = driver
        .get_driver(
            cli.path.as_deref(),
            overwrite,
            &mut StdinPrompt,
            &mut ConsoleProgress,
        )
        .await?;

    println!("{}", driver_path.display());
    Ok(())
}

/// Asks for anything the flags left open, in the order os / version /
/// folder. Empty answers keep the defaults.
fn prompt_for_missing(cli: &mut Cli) -> Result<()> {
    if cli.os.is_none() {
        println!("[1] Windows");
        println!("[2] Linux");
        println!("[3] Macintosh");
        let choice = read_line("Operating system [press Enter for the current one]: ")?;
        cli.os = match choice.as_str() {
            "" => None,
            "1" => Some("win32".to_string()),
            "2" => Some("linux64".to_string()),
            "3" => Some("mac64".to_string()),
            other => Some(other.to_string()),
        };
    }

    if cli.driver_version.is_none() && !cli.detect {
        let version = read_line("Chrome version number [press Enter for the default]: ")?;
        if !version.is_empty() {
            cli.driver_version = Some(version);
        }
    }

    if cli.path.is_none() {
        let folder = read_line("Install folder [press Enter for the current directory]: ")?;
        if !folder.is_empty() {
            cli.path = Some(PathBuf::from(folder));
        }
    }

    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
