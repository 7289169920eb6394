use thiserror::Error;

use crate::state::window::WindowId;

/// Window manager errors. Only caller mistakes end up here; disallowed
/// transitions (maximizing a window without the button, dragging a maximized
/// window) are silent no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window {0} not found")]
    NotFound(WindowId),
    #[error("window title must not be empty")]
    EmptyTitle,
    #[error("invalid window size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown application '{0}'")]
pub struct UnknownApplication(pub String);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to download asset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("zlib stream is corrupt: {0}")]
    Inflate(String),
    #[error("stylesheet is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("no icon named '{0}'")]
    UnknownIcon(String),
    #[error("invalid asset extension '{0}'")]
    InvalidExtension(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("desktop service has shut down")]
    Closed,
    #[error(transparent)]
    Window(#[from] WindowError),
}
