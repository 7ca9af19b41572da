use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access descriptor file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse descriptor file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
