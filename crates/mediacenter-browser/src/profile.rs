use crate::{Error, Result};
use mediacenter_core::DescriptorStore;
use std::path::{Path, PathBuf};

/// Application directory name under the per-user data root
pub const APP_NAME: &str = "mediacenter";

/// Directory holding the Chrome profile inside the application directory
pub const PROFILE_DIR_NAME: &str = "chrome-profile";

/// Directory inside the profile that receives the installed CDM
pub const CDM_INSTALL_DIR_NAME: &str = "widevine-cdm";

/// The persistent Chrome profile shared by the host and external launches.
///
/// The same path has to be used by every component for the whole run, and
/// it must be fixed before any engine process starts. Nothing here deletes
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDirectory {
    path: PathBuf,
}

impl ProfileDirectory {
    /// Resolve `<user data root>/mediacenter/chrome-profile` for the current user.
    ///
    /// The user data root follows the platform convention:
    /// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows and
    /// `$XDG_CONFIG_HOME` (or `~/.config`) elsewhere.
    pub fn resolve() -> Result<Self> {
        let root = dirs::config_dir().ok_or_else(|| {
            Error::Profile("Could not determine the user data directory".to_string())
        })?;

        let profile = Self::under_user_data_root(&root);
        tracing::debug!("Resolved profile directory: {}", profile.path.display());

        Ok(profile)
    }

    /// Profile location below an explicit user data root
    pub fn under_user_data_root(root: &Path) -> Self {
        Self {
            path: root.join(APP_NAME).join(PROFILE_DIR_NAME),
        }
    }

    /// Use an explicit profile location, made absolute against the working directory
    pub fn at(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        Ok(Self { path })
    }

    /// Get the profile directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// Create the profile directory and any missing ancestors
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.path.exists() {
            tracing::debug!("Creating profile directory: {}", self.path.display());
            std::fs::create_dir_all(&self.path).map_err(|e| Error::Install {
                path: self.path.clone(),
                source: e,
            })?;
        }

        Ok(())
    }

    /// Where the CDM installer places its copy
    pub fn cdm_install_path(&self) -> PathBuf {
        self.path.join(CDM_INSTALL_DIR_NAME)
    }

    /// Where the Widevine descriptor lives
    pub fn descriptor_path(&self) -> PathBuf {
        DescriptorStore::path(&self.path)
    }
}
