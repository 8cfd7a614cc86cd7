//! Client configuration: where the service lives and where the token is kept.

use std::path::PathBuf;

use reqwest::Url;

use crate::error::ApiError;

/// Base address used when neither `--api-url` nor `SPLINTER_API_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Token file used when neither `--token-file` nor `SPLINTER_TOKEN_FILE` is set.
/// Relative, so it resolves against the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".token";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub token_path: PathBuf,
}

impl Config {
    pub fn new(base_url: &str, token_path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry path segments".into()));
        }
        Ok(Self {
            base_url: url,
            token_path: token_path.into(),
        })
    }
}
