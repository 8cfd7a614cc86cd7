// UI layer: collects whatever the command line left out using `dialoguer`,
// makes the single API call behind a spinner, and prints the body exactly as
// the service sent it. Diagnostics go to stderr so stdout stays pipeable.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::api::{ApiClient, RawResponse, Transport};
use crate::cli::Command;
use crate::error::ApiError;

/// Run one command. Returns `false` when the service answered with a
/// non-success status or a login produced no token.
pub fn run<T: Transport>(api: &ApiClient<T>, command: Command) -> Result<bool> {
    let response = match command {
        Command::Authenticate { username } => {
            let username = value_or_prompt(username, "username")?;
            let password: String = Password::new().with_prompt("password").interact()?;
            match with_spinner("Authenticating...", || api.authenticate(&username, &password)) {
                Ok(outcome) => outcome.response,
                Err(ApiError::Extraction { reason, response }) => {
                    print_body(&response);
                    eprintln!("Login failed, no token stored: {}", reason);
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::CreateAccount { username } => {
            let username = value_or_prompt(username, "username")?;
            let password: String = Password::new()
                .with_prompt("password")
                .with_confirmation("repeat password", "Passwords do not match")
                .interact()?;
            with_spinner("Creating account...", || {
                api.create_account(&username, &password)
            })?
        }
        Command::User { id } => {
            let id = value_or_prompt(id, "uid")?;
            with_spinner("Fetching user...", || api.get_user(&id))?
        }
        Command::CurrentUser => with_spinner("Fetching user...", || api.get_current_user())?,
        Command::Snippet { id } => {
            let id = value_or_prompt(id, "id")?;
            with_spinner("Fetching snippet...", || api.get_snippet(&id))?
        }
        Command::UserSnippets { user } => {
            let user = value_or_prompt(user, "uid")?;
            with_spinner("Fetching snippets...", || api.get_snippets_by_user(&user))?
        }
        Command::Language { language } => {
            let language = value_or_prompt(language, "language")?;
            with_spinner("Fetching snippets...", || {
                api.get_snippets_by_language(&language)
            })?
        }
        Command::PostSnippet { file, language } => {
            let contents = read_source(&file)?;
            let language = value_or_prompt(language, "language")?;
            with_spinner("Uploading...", || api.post_snippet(&language, &contents))?
        }
        Command::DeleteSnippet { id } => {
            let id = value_or_prompt(id, "id")?;
            with_spinner("Deleting...", || api.delete_snippet(&id))?
        }
        Command::Vote { id, delta } => {
            let id = value_or_prompt(id, "id")?;
            let delta = match delta {
                Some(d) => d,
                None => Input::<i64>::new().with_prompt("delta").interact_text()?,
            };
            with_spinner("Voting...", || api.vote_snippet(&id, delta))?
        }
        Command::Comments { snippet } => {
            let snippet = value_or_prompt(snippet, "snippet")?;
            with_spinner("Fetching comments...", || api.get_comments(&snippet))?
        }
        Command::PostComment { snippet, text } => {
            let snippet = value_or_prompt(snippet, "snippet")?;
            let text = value_or_prompt(text, "text")?;
            with_spinner("Posting...", || api.post_comment(&snippet, &text))?
        }
        Command::DeleteComment { id } => {
            let id = value_or_prompt(id, "comment")?;
            with_spinner("Deleting...", || api.delete_comment(&id))?
        }
    };

    print_body(&response);
    if let Some(err) = response.service_error() {
        warn!(status = response.status, "Service rejected the request");
        eprintln!("{}", err);
        return Ok(false);
    }
    Ok(true)
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snippet file {}", path.display()))
}

/// Show a spinner on stderr for the duration of `f`.
fn with_spinner<R>(message: &'static str, f: impl FnOnce() -> R) -> R {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

fn print_body(response: &RawResponse) {
    if response.body.ends_with('\n') {
        print!("{}", response.body);
    } else {
        println!("{}", response.body);
    }
}
