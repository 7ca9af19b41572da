use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Source path does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Source {} contains the profile directory; point --src at the CDM folder itself", .0.display())]
    SourceContainsProfile(PathBuf),

    #[error("Failed to install {}: {source}", .path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Descriptor error: {0}")]
    Descriptor(#[from] mediacenter_core::Error),

    #[error("Invalid target URL {0}")]
    InvalidUrl(String),

    #[error("Launch error: {0}")]
    Launch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
