//! Token persistence.
//!
//! The service hands out one opaque token per login. It lives in a plain
//! text file so that every later invocation can pick it up again.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Opaque credential issued by `/authenticate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File-backed holder of the current token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored token. The file ends with a newline.
    pub fn save(&self, token: &Token) -> Result<(), ApiError> {
        let store_err = |source| ApiError::Store {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(store_err)?;
            }
        }
        std::fs::write(&self.path, format!("{}\n", token.as_str())).map_err(store_err)?;
        debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    /// Read the stored token back.
    ///
    /// Any failure to read, an empty file, or content that is not a valid
    /// header value counts as "no token":
    /// callers then proceed without an `Authorization` header.
    pub fn load(&self) -> Option<Token> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    debug!(path = %self.path.display(), "Token file is empty");
                    None
                } else if HeaderValue::from_str(trimmed).is_err() {
                    // Would never make it into an Authorization header.
                    debug!(path = %self.path.display(), "Token file is corrupt");
                    None
                } else {
                    Some(Token::new(trimmed))
                }
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No usable token file");
                None
            }
        }
    }
}
