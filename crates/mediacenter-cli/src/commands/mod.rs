//! Subcommands of the `mediacenter` binary.

pub mod cdm;
pub mod completion;
pub mod launch;
pub mod profile;
pub mod switches;

use anyhow::{Context, Result};
use mediacenter_browser::ProfileDirectory;
use std::path::Path;

/// Profile directory for this run: the explicit override if given, else the per-user default
pub fn resolve_profile(explicit: Option<&Path>) -> Result<ProfileDirectory> {
    let profile = match explicit {
        Some(path) => ProfileDirectory::at(path)
            .with_context(|| format!("Invalid profile directory: {}", path.display()))?,
        None => ProfileDirectory::resolve()
            .context("No persistent profile is possible without a user data directory")?,
    };

    tracing::debug!("Using profile directory {}", profile.path().display());
    Ok(profile)
}
