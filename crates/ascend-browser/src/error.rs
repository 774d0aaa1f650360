use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Cookie conversion error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for ascend_core::Error {
    fn from(err: Error) -> Self {
        ascend_core::Error::Driver(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
