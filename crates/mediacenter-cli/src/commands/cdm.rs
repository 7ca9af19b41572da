//! Widevine CDM commands.
//!
//! `install` copies a CDM (usually the `WidevineCdm` folder taken from a
//! Chrome installation) into the kiosk profile and records its version in
//! `widevine.json`. The host picks it up at its next start.
//!
//! # Examples
//!
//! ```bash
//! mediacenter cdm install --src "/Users/me/Downloads/WidevineCdm" --version 4.10.2557.0
//! mediacenter cdm show
//! mediacenter cdm locate /opt/google/chrome/WidevineCdm
//! ```

use crate::OutputFormat;
use anyhow::{Result, anyhow, bail};
use console::style;
use mediacenter_browser::{CdmFinder, CdmInstaller, ProfileDirectory};
use mediacenter_core::DescriptorStore;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Accept only absolute paths for `--src`, before anything touches the filesystem
pub fn parse_absolute_path(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if path.is_absolute() {
        Ok(path)
    } else {
        Err(format!(
            "'{}' is not an absolute path; please pass an absolute path for --src",
            value
        ))
    }
}

/// Install a CDM into the profile
pub fn install(profile: &ProfileDirectory, src: &Path, version: &str) -> Result<()> {
    let version = version.trim();
    if version.is_empty() {
        bail!("--version must not be empty");
    }

    println!("📁 Profile dir: {}", profile.path().display());

    let descriptor = CdmInstaller::new(profile).install(src, version)?;

    println!(
        "✅ Widevine files copied to: {}",
        descriptor.path().display()
    );
    println!("✅ widevine.json created with version: {}", version);

    match CdmFinder::locate(descriptor.path()) {
        Some(artifact) => println!("   CDM library: {}", artifact.display()),
        None => println!(
            "{}",
            style("⚠️  No Widevine CDM library found in the copied files; playback of protected content will stay disabled")
                .yellow()
        ),
    }

    println!("Restart the app. If compatible, Widevine will be loaded by Chrome.");

    Ok(())
}

/// Show the configured CDM and what it resolves to
pub fn show(profile: &ProfileDirectory, format: OutputFormat) -> Result<()> {
    let descriptor = DescriptorStore::load(profile.path());
    let artifact = descriptor
        .as_ref()
        .and_then(|d| CdmFinder::locate(d.path()));

    if format.is_json() {
        let output = json!({
            "profile": profile.path(),
            "descriptor": descriptor,
            "artifact": artifact,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style("Widevine CDM").bold());
    println!("Profile: {}", profile.path().display());

    let Some(descriptor) = descriptor else {
        println!("No CDM configured ({} missing or invalid)", profile.descriptor_path().display());
        return Ok(());
    };

    println!("Path: {}", descriptor.path().display());
    println!("Version: {}", descriptor.version().unwrap_or("-"));

    match artifact {
        Some(artifact) => println!("Library: {}", style(artifact.display()).green()),
        None => println!(
            "Library: {}",
            style("not found - protected playback unavailable").yellow()
        ),
    }

    Ok(())
}

/// Search a path for a CDM library
pub fn locate(path: &Path, format: OutputFormat) -> Result<()> {
    let artifact = CdmFinder::locate(path);

    if format.is_json() {
        let output = json!({
            "source": path,
            "artifact": artifact,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(artifact) = &artifact {
        println!("{}", artifact.display());
    }

    artifact
        .map(|_| ())
        .ok_or_else(|| anyhow!("No Widevine CDM found at {}", path.display()))
}
