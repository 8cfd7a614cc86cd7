// Library root
// -----------
// This crate exposes a small library surface for the `splinter` CLI. The
// binary (`main.rs`) parses arguments and hands off to `ui`.
//
// Module responsibilities:
// - `api`: Blocking HTTP client for the snippet service, one method per
//   remote endpoint, plus the `Transport` seam used by tests.
// - `session`: Persists the single authentication token between runs.
// - `config`: Base URL and token file location.
// - `error`: The `ApiError` taxonomy shared by the modules above.
// - `models`: Typed views of the service's JSON payloads.
// - `cli` / `ui`: Argument definitions and the prompt-call-print flow.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use session::{SessionStore, Token};
