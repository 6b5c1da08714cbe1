use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection failure, or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text: {source}", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("{} has no file name", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("file name of {} is not valid UTF-8", .path.display())]
    NonUtf8FileName { path: PathBuf },

    #[error("{kind} name must not be empty")]
    InvalidName { kind: &'static str },

    #[error("invalid API server URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to serialize configmap: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The server answered with a `kind: Status` envelope.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server answered with a failing status and no recognizable envelope.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl Error {
    pub fn transport<E: Into<BoxError>>(err: E) -> Self {
        Error::Transport(err.into())
    }

    /// HTTP status code of the rejected request, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures raised while building the request document.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            Error::ReadFile { .. }
                | Error::InvalidUtf8 { .. }
                | Error::InvalidPath { .. }
                | Error::NonUtf8FileName { .. }
                | Error::Serialize(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
