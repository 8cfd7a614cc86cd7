use std::path::PathBuf;

use thiserror::Error;

use crate::api::RawResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Authentication reached the service but no token could be read back.
    #[error("Could not extract token: {reason}")]
    Extraction {
        reason: String,
        response: RawResponse,
    },

    #[error("Failed to write token to {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// Raw response attached to the error, if the service answered at all.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            ApiError::Extraction { response, .. } => Some(response),
            _ => None,
        }
    }
}
