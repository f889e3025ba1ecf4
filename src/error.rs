use thiserror::Error;

#[derive(Error, Debug)]
pub enum RainwatchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Voice output failed: {0}")]
    Voice(String),
}

pub type Result<T> = std::result::Result<T, RainwatchError>;
