use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpargatError>;

#[derive(Error, Debug)]
pub enum SpargatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid map index: {message}")]
    InvalidIndex { message: String },

    #[error("Cannot derive a file name from URL: {url}")]
    InvalidUrl { url: String },

    #[error("Download incomplete: received {received} of {expected} bytes")]
    IncompleteDownload { expected: u64, received: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl SpargatError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        SpargatError::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_index<S: Into<String>>(message: S) -> Self {
        SpargatError::InvalidIndex {
            message: message.into(),
        }
    }
}
