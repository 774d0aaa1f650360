use crate::platform::Platform;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing argument {0}")]
    MissingArgument(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Missing frame {0}")]
    MissingFrame(String),

    #[error("Not implemented: {0} ready-for-sale page")]
    UnsupportedPlatform(Platform),

    #[error("Something wrong with version {0}")]
    InvalidVersion(String),

    #[error("Missing option {0}")]
    MissingOption(String),

    #[error("Missing build version checkbox for build {0}")]
    MissingBuildCheckbox(String),

    #[error("Verification code unavailable: {0}")]
    Verification(String),

    #[error("Browser driver error: {0}")]
    Driver(String),

    #[error("Failed to access cookie file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse cookie file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
