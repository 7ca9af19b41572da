use super::types::CdmDescriptor;
use crate::{Error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the descriptor file inside the profile directory
pub const DESCRIPTOR_FILE_NAME: &str = "widevine.json";

pub struct DescriptorStore;

impl DescriptorStore {
    /// Location of the descriptor for a given profile
    pub fn path(profile_dir: &Path) -> PathBuf {
        profile_dir.join(DESCRIPTOR_FILE_NAME)
    }

    /// Load the descriptor for a profile.
    ///
    /// Returns `None` when the file is missing, unreadable, empty or does
    /// not hold a usable record. A broken descriptor means "no CDM", so the
    /// failure is logged and swallowed here.
    pub fn load(profile_dir: &Path) -> Option<CdmDescriptor> {
        let path = Self::path(profile_dir);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No Widevine descriptor at {}", path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable descriptor {}: {}", path.display(), e);
                return None;
            }
        };

        match Self::from_str(&content) {
            Ok(descriptor) => {
                tracing::debug!(
                    "Loaded Widevine descriptor from {}: {}",
                    path.display(),
                    descriptor.path().display()
                );
                Some(descriptor)
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed descriptor {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse and validate descriptor JSON
    pub fn from_str(content: &str) -> Result<CdmDescriptor> {
        if content.trim().is_empty() {
            return Err(Error::InvalidDescriptor("file is empty".to_string()));
        }

        let descriptor: CdmDescriptor = serde_json::from_str(content)?;
        descriptor.validate()?;

        Ok(descriptor)
    }

    /// Render the descriptor as pretty JSON with a trailing newline
    pub fn to_string(descriptor: &CdmDescriptor) -> Result<String> {
        let mut json = serde_json::to_string_pretty(descriptor)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the descriptor, replacing whatever was there before.
    ///
    /// The content goes to a temporary file in the profile directory first
    /// and is then renamed over the descriptor, so readers never observe a
    /// half-written file. Concurrent writers: last one wins.
    pub fn save(profile_dir: &Path, descriptor: &CdmDescriptor) -> Result<()> {
        descriptor.validate()?;

        let path = Self::path(profile_dir);
        tracing::debug!("Writing Widevine descriptor to: {}", path.display());

        let json = Self::to_string(descriptor)?;

        let mut file = NamedTempFile::new_in(profile_dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Wrote Widevine descriptor to {}", path.display());

        Ok(())
    }
}
