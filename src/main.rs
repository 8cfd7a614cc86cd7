// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build an API client, hand both to
//   the UI layer.
// - Exits nonzero when the service rejects the request or anything fails.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use splinter_cli::{cli::Cli, ui, ApiClient, Config};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr; `RUST_LOG` controls the level (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::new(&cli.api_url, &cli.token_file)?;
    let api = ApiClient::from_config(&config)?;
    debug!(
        base_url = %config.base_url,
        token_file = %api.session().path().display(),
        "Client configured"
    );

    if ui::run(&api, cli.command)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
