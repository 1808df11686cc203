//! FlowLang CLI entry point.

use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flowlang_cli::Cli;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise warnings, or debug with --verbose.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, store = %cli.store.display(), "starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = flowlang_cli::run(&cli, &mut stdin.lock(), &mut stdout.lock()) {
        tracing::error!("{err:#}");
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
