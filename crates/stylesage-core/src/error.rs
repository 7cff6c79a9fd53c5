//! Error types for the Style Sage client

use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No user is loaded yet")]
    MissingUser,

    #[error("Image URL is empty")]
    MissingImageUrl,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification a front-end can switch on without matching messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request never produced a usable HTTP response
    Transport,
    /// Backend answered with a non-success status
    Status,
    /// Body could not be read as the expected shape
    Decode,
    /// Guard rejected the call before any request was made
    Precondition,
    Config,
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Error::Status {
            status,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Status { .. } => ErrorKind::Status,
            Error::Decode(_) => ErrorKind::Decode,
            Error::MissingUser | Error::MissingImageUrl => ErrorKind::Precondition,
            Error::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// True when the call was rejected locally and nothing was sent
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}
