//! Engine switches the host applies before the browser engine starts.
//!
//! The host always pins the engine to the persistent profile. When the
//! profile carries a Widevine descriptor whose path resolves to a CDM
//! library, the library path and declared version are passed as two more
//! switches; otherwise protected playback is simply unavailable.

use crate::{CdmFinder, ProfileDirectory};
use mediacenter_core::{CdmDescriptor, DescriptorStore};
use std::path::PathBuf;

pub const USER_DATA_DIR_SWITCH: &str = "user-data-dir";
pub const CDM_PATH_SWITCH: &str = "widevine-cdm-path";
pub const CDM_VERSION_SWITCH: &str = "widevine-cdm-version";

/// A descriptor together with the library it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCdm {
    pub descriptor: CdmDescriptor,
    pub artifact: PathBuf,
}

impl ResolvedCdm {
    /// Load the profile's descriptor and locate the library it names
    pub fn load(profile: &ProfileDirectory) -> Option<Self> {
        let descriptor = DescriptorStore::load(profile.path())?;

        match CdmFinder::locate(descriptor.path()) {
            Some(artifact) => Some(Self {
                descriptor,
                artifact,
            }),
            None => {
                tracing::warn!(
                    "Widevine descriptor points at {}, but no CDM was found there",
                    descriptor.path().display()
                );
                None
            }
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.descriptor.version()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSwitch {
    pub name: &'static str,
    pub value: String,
}

impl EngineSwitch {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Render as a `--name=value` command-line argument
    pub fn to_arg(&self) -> String {
        format!("--{}={}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSwitches {
    switches: Vec<EngineSwitch>,
    cdm: Option<ResolvedCdm>,
}

impl EngineSwitches {
    /// Switches for a profile as found on disk right now
    pub fn for_profile(profile: &ProfileDirectory) -> Self {
        Self::new(profile, ResolvedCdm::load(profile))
    }

    pub fn new(profile: &ProfileDirectory, cdm: Option<ResolvedCdm>) -> Self {
        let mut switches = vec![EngineSwitch::new(
            USER_DATA_DIR_SWITCH,
            profile.path().display().to_string(),
        )];

        if let Some(cdm) = &cdm {
            tracing::info!("Using Widevine CDM path: {}", cdm.artifact.display());
            switches.push(EngineSwitch::new(
                CDM_PATH_SWITCH,
                cdm.artifact.display().to_string(),
            ));

            if let Some(version) = cdm.version() {
                switches.push(EngineSwitch::new(CDM_VERSION_SWITCH, version));
            }
        }

        Self { switches, cdm }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineSwitch> {
        self.switches.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.switches
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }

    pub fn cdm(&self) -> Option<&ResolvedCdm> {
        self.cdm.as_ref()
    }

    pub fn to_args(&self) -> Vec<String> {
        self.switches.iter().map(EngineSwitch::to_arg).collect()
    }
}
