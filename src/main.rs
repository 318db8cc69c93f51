// Entrypoint for the apidoc CLI.
// - Keeps `main` small: parse flags, build the client, hand both to `cli::run`.
// - Transport failures escape as `anyhow` errors; validation failures map to
//   their own exit codes.

use apidoc_cli::{api::ApiClient, cli::{run, Cli, Outcome}};
use clap::Parser;
use std::io;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let api = ApiClient::new(&cli.base_url)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run(&cli, &api, stdin.lock(), &mut stdout.lock())?;
    if outcome != Outcome::Completed {
        process::exit(outcome.exit_code());
    }
    Ok(())
}

/// Logs go to stderr so stdout only carries the response line.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    tracing::debug!("log level: {}", level);
}
