//! brdx CLI - Extract structured features from Business Requirements Documents.

use brdx_cli::commands;
use brdx_cli::{load_config, Cli, Command, Formatter};
use brdx_client::ExtractionBackend;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Log to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let formatter = Formatter::new(cli.format, !cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> brdx_cli::Result<()> {
    let config = load_config(&cli.config, cli.collection)?;

    match cli.command {
        Command::Metadata => {
            commands::execute_metadata(&config, formatter).await?;
        }
        Command::Upload(args) => {
            let backend = ExtractionBackend::from_env(config.extract.settings.clone())?;
            commands::execute_upload(args, &backend, formatter).await?;
        }
        Command::Process(args) => {
            let backend = Arc::new(ExtractionBackend::from_env(
                config.extract.settings.clone(),
            )?);
            commands::execute_process(args, &config, backend, formatter).await?;
        }
    }

    Ok(())
}
