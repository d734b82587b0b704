use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod logfile;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so that JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recall=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.log_file.as_path();

    match &cli.command {
        Commands::Feed(command) => commands::feed::run(command, path, cli.format).await,
        Commands::Set(command) => commands::set::run(command, path, cli.format).await,
        Commands::Kv(command) => commands::kv::run(command, path, cli.format).await,
        Commands::Types => commands::types::run(cli.format),
    }
}
