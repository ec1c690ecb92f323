mod cli;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `YEARGRID_LOG=debug`
const LOG_ENV: &str = "YEARGRID_LOG";

/// Logging stays off unless asked for so the TUI screen is not overwritten
fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_ENV))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli.run()
}
