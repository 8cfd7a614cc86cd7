//! Command-line arguments.
//!
//! Every subcommand issues exactly one request. Values left off the command
//! line are asked for interactively.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_TOKEN_FILE};

/// Splinter - talk to a snippet sharing service from the terminal.
#[derive(Debug, Parser)]
#[command(name = "splinter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the service API.
    #[arg(long, env = "SPLINTER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// File holding the session token.
    #[arg(long, env = "SPLINTER_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the returned token.
    Authenticate {
        #[arg(long)]
        username: Option<String>,
    },

    /// Register a new account.
    CreateAccount {
        #[arg(long)]
        username: Option<String>,
    },

    /// Look up a user by id.
    User { id: Option<String> },

    /// Show the user the stored token belongs to.
    CurrentUser,

    /// Fetch a single snippet.
    Snippet { id: Option<String> },

    /// List snippets posted by a user.
    UserSnippets { user: Option<String> },

    /// List snippets written in a language.
    Language { language: Option<String> },

    /// Upload the contents of a file as a new snippet.
    PostSnippet {
        /// Source file to upload.
        file: PathBuf,

        #[arg(short, long)]
        language: Option<String>,
    },

    /// Delete a snippet.
    DeleteSnippet { id: Option<String> },

    /// Vote on a snippet. Negative values vote it down.
    Vote {
        id: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        delta: Option<i64>,
    },

    /// List the comments on a snippet.
    Comments { snippet: Option<String> },

    /// Comment on a snippet.
    PostComment {
        snippet: Option<String>,

        #[arg(short, long)]
        text: Option<String>,
    },

    /// Delete a comment.
    DeleteComment { id: Option<String> },
}
