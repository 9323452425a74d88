//! `pb` - project task board CLI.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use project_board::cli::Cli;
use project_board::cmd;
use project_board::config::resolve_data_dir;

fn main() {
    // Tracing is opt-in via RUST_LOG; the board TUI owns the terminal otherwise.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    let result = resolve_data_dir(cli.dir.as_deref()).and_then(|dir| cmd::run(cli.command, &dir));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
