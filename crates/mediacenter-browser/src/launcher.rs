use crate::{Error, Platform, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use url::Url;

const MACOS_CHROME_APP: &str = "Google Chrome";
const WINDOWS_CHROME_EXE: &str = r"%ProgramFiles%\Google\Chrome\Application\chrome.exe";
const LINUX_CHROME_BINARIES: [&str; 2] = ["google-chrome", "chromium"];

/// What to open, and in which profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub profile_dir: PathBuf,
    pub target_url: String,
    pub fullscreen: bool,
}

impl LaunchSpec {
    pub fn new(profile_dir: impl Into<PathBuf>, target_url: impl Into<String>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            target_url: target_url.into(),
            fullscreen: true,
        }
    }

    /// Build the Chrome invocation for `platform`.
    ///
    /// The switches are the same everywhere; only the way Chrome itself is
    /// reached differs (`open -a` on macOS, `cmd /c start` on Windows, the
    /// binary on PATH on Linux).
    pub fn compose(&self, platform: Platform) -> LaunchCommand {
        let chrome_args = self.chrome_args();

        let (program, mut args, fallbacks) = match platform {
            Platform::MacOs => (
                "open".to_string(),
                vec![
                    "-a".to_string(),
                    MACOS_CHROME_APP.to_string(),
                    "--args".to_string(),
                ],
                vec![],
            ),
            Platform::Windows => (
                "cmd".to_string(),
                vec![
                    "/c".to_string(),
                    "start".to_string(),
                    // Window title; start treats the first quoted argument as one
                    String::new(),
                    WINDOWS_CHROME_EXE.to_string(),
                ],
                vec![],
            ),
            Platform::Linux => (
                LINUX_CHROME_BINARIES[0].to_string(),
                vec![],
                LINUX_CHROME_BINARIES[1..]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        };

        args.extend(chrome_args);

        LaunchCommand {
            platform,
            program,
            args,
            fallbacks,
        }
    }

    /// Chrome command-line switches
    fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--user-data-dir={}", self.profile_dir.display()),
            "--new-window".to_string(),
            self.target_url.clone(),
        ];

        if self.fullscreen {
            args.push("--start-fullscreen".to_string());
        }

        args
    }
}

/// A composed but not yet executed Chrome invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub platform: Platform,
    pub program: String,
    pub args: Vec<String>,
    /// Programs to try, with the same arguments, if `program` fails
    pub fallbacks: Vec<String>,
}

impl LaunchCommand {
    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Single command string for the platform shell, fallbacks chained with `||`
    pub fn shell_command(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.fallbacks.iter())
            .map(|program| self.render(program))
            .collect::<Vec<_>>()
            .join(" || ")
    }

    /// Arguments alone, quoted for the platform shell
    pub fn shell_args(&self) -> String {
        self.args
            .iter()
            .map(|arg| quote(self.platform, arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Refuse arguments the platform shell would rewrite.
    ///
    /// On Windows everything goes through `cmd`, which expands `%...%` even
    /// inside quotes; only the Chrome location relies on that expansion.
    pub fn check_shell_safe(&self) -> Result<()> {
        if self.platform != Platform::Windows {
            return Ok(());
        }

        match self
            .args
            .iter()
            .find(|arg| arg.as_str() != WINDOWS_CHROME_EXE && arg.contains('%'))
        {
            Some(arg) => Err(Error::Launch(format!(
                "'{}' contains '%', which cmd would expand; use a path without '%'",
                arg
            ))),
            None => Ok(()),
        }
    }

    fn render(&self, program: &str) -> String {
        let program = quote(self.platform, program);
        if self.args.is_empty() {
            program
        } else {
            format!("{} {}", program, self.shell_args())
        }
    }
}

fn quote(platform: Platform, arg: &str) -> String {
    match platform {
        Platform::Windows => quote_windows(arg),
        Platform::MacOs | Platform::Linux => quote_posix(arg),
    }
}

fn quote_posix(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Double-quote `arg` for the `cmd` command line.
///
/// `cmd` still expands `%VAR%` inside quotes and has no escape for it there,
/// so values containing `%` are refused by `LaunchCommand::check_shell_safe`
/// instead of being rewritten here.
fn quote_windows(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || "\"&|<>^()%".contains(c));

    if needs_quotes {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Normalize a user-supplied target into an absolute URL.
///
/// Bare hosts such as `hub.local` get an `https://` scheme; anything that
/// already names a scheme is validated and passed through unchanged.
pub fn normalize_target_url(input: &str) -> Result<String> {
    let input = input.trim();

    let candidate = if has_explicit_scheme(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    Url::parse(&candidate)
        .map_err(|e| Error::InvalidUrl(format!("'{}': {}", input, e)))?;

    Ok(candidate)
}

/// Whether `input` starts with `scheme://` or `about:`.
///
/// Only the part before the first `/`, `?` or `#` is considered, so a
/// `://` inside a path or query does not count.
fn has_explicit_scheme(input: &str) -> bool {
    if input.starts_with("about:") {
        return true;
    }

    let head_len = input
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(input.len());
    let (head, rest) = input.split_at(head_len);

    head.ends_with(':') && rest.starts_with("//")
}

/// Runs a composed launch command on this machine
pub struct Launcher;

impl Launcher {
    /// Execute `command`, trying fallbacks in order until one exits successfully.
    ///
    /// A missing program, a spawn error or a non-zero exit moves on to the
    /// next candidate; if all of them fail the last failure is returned.
    pub fn run(command: &LaunchCommand) -> Result<ExitStatus> {
        let host = Platform::current();
        if command.platform != host {
            return Err(Error::Launch(format!(
                "cannot run a {} launch command on {}",
                command.platform, host
            )));
        }

        command.check_shell_safe()?;

        let mut last_failure = String::from("no program to run");

        for program in std::iter::once(&command.program).chain(command.fallbacks.iter()) {
            let resolved = match which::which(program) {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("{} not found on PATH: {}", program, e);
                    last_failure = format!("{} not found", program);
                    continue;
                }
            };

            tracing::info!("Launching: {}", command.shell_command());

            match Self::spawn(&resolved, command).and_then(|mut child| child.wait()) {
                Ok(status) if status.success() => return Ok(status),
                Ok(status) => {
                    tracing::warn!("{} exited with {}", program, status);
                    last_failure = format!("{} exited with {}", program, status);
                }
                Err(e) => {
                    tracing::warn!("Failed to start {}: {}", program, e);
                    last_failure = format!("failed to start {}: {}", program, e);
                }
            }
        }

        Err(Error::Launch(format!("Failed to launch Chrome: {}", last_failure)))
    }

    #[cfg(windows)]
    fn spawn(program: &Path, command: &LaunchCommand) -> std::io::Result<std::process::Child> {
        use std::os::windows::process::CommandExt;

        // cmd parses its own command line, so hand it the quoted string as-is
        Command::new(program)
            .raw_arg(command.shell_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }

    #[cfg(not(windows))]
    fn spawn(program: &Path, command: &LaunchCommand) -> std::io::Result<std::process::Child> {
        Command::new(program)
            .args(&command.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}
