use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where an installed CDM lives and which version the engine should advertise.
///
/// `path` may point either at the native library itself or at a directory
/// that contains it somewhere below; resolution happens when the descriptor
/// is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdmDescriptor {
    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CdmDescriptor {
    pub fn new(path: impl Into<PathBuf>, version: Option<String>) -> Self {
        Self {
            path: path.into(),
            version,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared version, ignoring blank strings
    pub fn version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Reject records that deserialize but cannot name a CDM location
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::InvalidDescriptor(
                "'path' must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
