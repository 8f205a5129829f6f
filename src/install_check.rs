//! Decides whether an existing driver is kept, overwritten, or freshly
//! installed.

use crate::error::InstallError;
use crate::platform::Platform;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// How many unusable answers the overwrite prompt tolerates before the
/// install is skipped.
const MAX_PROMPT_ATTEMPTS: u32 = 3;

/// Outcome of inspecting the install directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDecision {
    /// No driver at the target path; download without asking.
    Fresh,
    /// A driver exists and will be replaced.
    Overwrite,
    /// A driver exists and stays untouched.
    Skip,
}

impl InstallDecision {
    pub fn should_download(self) -> bool {
        matches!(self, InstallDecision::Fresh | InstallDecision::Overwrite)
    }
}

/// A single answer read from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
    Unrecognized,
}

/// Capability for asking whether an existing driver may be replaced. Keeps
/// terminal interaction out of the decision logic so it can run in tests
/// without a real terminal.
pub trait OverwritePrompt {
    fn ask(&mut self, driver_path: &Path) -> Result<PromptAnswer, InstallError>;
}

/// Prompt wired to the process stdin/stdout.
pub struct StdinPrompt;

impl OverwritePrompt for StdinPrompt {
    fn ask(&mut self, driver_path: &Path) -> Result<PromptAnswer, InstallError> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        ask_with_io(driver_path, &mut stdin.lock(), &mut stdout)
    }
}

/// Testable core of [`StdinPrompt`], generic over the streams it talks to.
fn ask_with_io<R: BufRead, W: Write>(
    driver_path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<PromptAnswer, InstallError> {
    write!(
        output,
        "Overwrite the existing driver at {}? [y/n] ",
        driver_path.display()
    )
    .map_err(InstallError::Prompt)?;
    output.flush().map_err(InstallError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(InstallError::Prompt)?;

    Ok(match line.trim() {
        "y" | "Y" => PromptAnswer::Yes,
        "n" | "N" => PromptAnswer::No,
        _ => PromptAnswer::Unrecognized,
    })
}

/// Expected location of the driver executable inside `install_dir`.
pub fn expected_driver_path(
    install_dir: &Path,
    driver_name: &str,
    platform: Platform,
) -> PathBuf {
    install_dir.join(format!("{}{}", driver_name, platform.executable_suffix()))
}

/// Decides whether a download should happen for the driver at `driver_path`.
///
/// A missing driver is always a fresh install and asks nothing. For an
/// existing driver an explicit `overwrite` flag wins; without one the prompt
/// is asked up to [`MAX_PROMPT_ATTEMPTS`] times, and input that never
/// resolves to yes or no skips the install.
pub fn decide(
    driver_path: &Path,
    overwrite: Option<bool>,
    prompt: &mut dyn OverwritePrompt,
) -> Result<InstallDecision, InstallError> {
    if !driver_path.exists() {
        return Ok(InstallDecision::Fresh);
    }

    info!("Driver already exists at {}", driver_path.display());

    let overwrite = match overwrite {
        Some(explicit) => explicit,
        None => {
            let mut resolved = None;
            for _ in 0..MAX_PROMPT_ATTEMPTS {
                match prompt.ask(driver_path)? {
                    PromptAnswer::Yes => {
                        resolved = Some(true);
                        break;
                    }
                    PromptAnswer::No => {
                        resolved = Some(false);
                        break;
                    }
                    PromptAnswer::Unrecognized => warn!("Please answer 'y' or 'n'"),
                }
            }
            resolved.unwrap_or_else(|| {
                warn!(
                    "No usable answer after {MAX_PROMPT_ATTEMPTS} attempts; keeping the existing driver"
                );
                false
            })
        }
    };

    if overwrite {
        info!("Overwriting the existing driver");
        Ok(InstallDecision::Overwrite)
    } else {
        info!("Download skipped, keeping the existing driver");
        Ok(InstallDecision::Skip)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Prompt double that serves pre-scripted answers and counts calls.
    struct ScriptedPrompt {
        answers: Vec<PromptAnswer>,
        asked: usize,
    }

    impl ScriptedPrompt {
        fn new(answers: Vec<PromptAnswer>) -> Self {
            Self { answers, asked: 0 }
        }
    }

    impl OverwritePrompt for ScriptedPrompt {
        fn ask(&mut self, _driver_path: &Path) -> Result<PromptAnswer, InstallError> {
            let answer = self.answers[self.asked];
            self.asked += 1;
            Ok(answer)
        }
    }

    fn existing_driver() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("chromedriver");
        std::fs::write(&driver, b"driver").unwrap();
        (dir, driver)
    }

    #[test]
    fn missing_driver_is_a_fresh_install() {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("chromedriver");
        let mut prompt = ScriptedPrompt::new(vec![]);

        let decision = decide(&driver, None, &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Fresh);
        assert!(decision.should_download());
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn missing_driver_ignores_an_explicit_flag() {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("chromedriver");
        let mut prompt = ScriptedPrompt::new(vec![]);

        let decision = decide(&driver, Some(false), &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Fresh);
    }

    #[test]
    fn explicit_flag_wins_without_prompting() {
        let (_dir, driver) = existing_driver();
        let mut prompt = ScriptedPrompt::new(vec![]);

        let overwrite = decide(&driver, Some(true), &mut prompt).unwrap();
        let skip = decide(&driver, Some(false), &mut prompt).unwrap();

        assert_eq!(overwrite, InstallDecision::Overwrite);
        assert_eq!(skip, InstallDecision::Skip);
        assert!(!skip.should_download());
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn prompt_yes_overwrites() {
        let (_dir, driver) = existing_driver();
        let mut prompt = ScriptedPrompt::new(vec![PromptAnswer::Yes]);

        let decision = decide(&driver, None, &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Overwrite);
        assert_eq!(prompt.asked, 1);
    }

    #[test]
    fn prompt_no_skips() {
        let (_dir, driver) = existing_driver();
        let mut prompt = ScriptedPrompt::new(vec![PromptAnswer::No]);

        let decision = decide(&driver, None, &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Skip);
    }

    #[test]
    fn unrecognized_answers_are_retried() {
        let (_dir, driver) = existing_driver();
        let mut prompt =
            ScriptedPrompt::new(vec![PromptAnswer::Unrecognized, PromptAnswer::Yes]);

        let decision = decide(&driver, None, &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Overwrite);
        assert_eq!(prompt.asked, 2);
    }

    #[test]
    fn exhausted_retries_default_to_skip() {
        let (_dir, driver) = existing_driver();
        let mut prompt = ScriptedPrompt::new(vec![
            PromptAnswer::Unrecognized,
            PromptAnswer::Unrecognized,
            PromptAnswer::Unrecognized,
        ]);

        let decision = decide(&driver, None, &mut prompt).unwrap();

        assert_eq!(decision, InstallDecision::Skip);
        assert_eq!(prompt.asked, MAX_PROMPT_ATTEMPTS as usize);
    }

    #[test]
    fn expected_path_carries_the_platform_suffix() {
        let dir = Path::new("/tmp/install");
        assert_eq!(
            expected_driver_path(dir, "chromedriver", Platform::Win32),
            dir.join("chromedriver.exe")
        );
        assert_eq!(
            expected_driver_path(dir, "chromedriver", Platform::Linux64),
            dir.join("chromedriver")
        );
    }

    #[test]
    fn stdin_prompt_parses_answers_case_insensitively() {
        let driver = Path::new("/tmp/chromedriver");
        for (raw, expected) in [
            ("y\n", PromptAnswer::Yes),
            ("Y\n", PromptAnswer::Yes),
            ("n\n", PromptAnswer::No),
            ("N\n", PromptAnswer::No),
            ("yes\n", PromptAnswer::Unrecognized),
            ("maybe\n", PromptAnswer::Unrecognized),
            ("\n", PromptAnswer::Unrecognized),
        ] {
            let mut input = Cursor::new(raw.as_bytes());
            let mut output = Vec::new();
            let answer = ask_with_io(driver, &mut input, &mut output).unwrap();
            assert_eq!(answer, expected, "answer for input {raw:?}");
        }
    }

    #[test]
    fn stdin_prompt_writes_the_question_before_reading() {
        let driver = Path::new("/tmp/chromedriver");
        let mut input = Cursor::new(b"n\n");
        let mut output = Vec::new();

        let _ = ask_with_io(driver, &mut input, &mut output).unwrap();

        let written = String::from_utf8(output).unwrap();
        assert!(written.contains("/tmp/chromedriver"));
        assert!(written.contains("[y/n]"));
    }
}
