//! Chrome profile binding and Widevine CDM provisioning for the mediacenter kiosk.

mod cdm_finder;
mod error;
mod installer;
mod launcher;
mod platform;
mod profile;
pub mod switches;

pub use cdm_finder::{CdmFinder, is_cdm_file_name};
pub use error::{Error, Result};
pub use installer::CdmInstaller;
pub use launcher::{LaunchCommand, LaunchSpec, Launcher, normalize_target_url};
pub use platform::Platform;
pub use profile::{APP_NAME, CDM_INSTALL_DIR_NAME, PROFILE_DIR_NAME, ProfileDirectory};
pub use switches::{EngineSwitch, EngineSwitches, ResolvedCdm};
