//! Open a URL in Chrome, full-screen, using the kiosk profile.
//!
//! This is how protected-content settings get toggled: Chrome runs against
//! the same profile directory the host uses, so anything changed there is
//! seen by the host on its next start.

use crate::OutputFormat;
use anyhow::{Result, bail};
use mediacenter_browser::{LaunchSpec, Launcher, Platform, ProfileDirectory, normalize_target_url};
use serde_json::json;

pub fn execute(
    profile: &ProfileDirectory,
    url: &str,
    platform: Option<Platform>,
    windowed: bool,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let target_url = normalize_target_url(url)?;
    let platform = platform.unwrap_or_else(Platform::current);

    let mut spec = LaunchSpec::new(profile.path(), target_url);
    spec.fullscreen = !windowed;
    let command = spec.compose(platform);

    if dry_run {
        if format.is_json() {
            let output = json!({
                "platform": platform.as_str(),
                "argv": command.argv(),
                "fallbacks": command.fallbacks,
                "shell": command.shell_command(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", command.shell_command());
        }
        return Ok(());
    }

    if !profile.exists() {
        bail!(
            "Profile dir not found: {}\nStart the app once or run 'mediacenter cdm install' to create it.",
            profile.path().display()
        );
    }

    println!("🚀 Launching Chrome...");
    Launcher::run(&command)?;
    println!("✅ Chrome launched");

    Ok(())
}
