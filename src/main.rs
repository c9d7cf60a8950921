//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use fpl_optimiser::{
    cli::{Commands, FplOpt},
    commands::{current_squad::handle_current_squad, optimise::handle_optimise},
};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = FplOpt::parse();
    init_logging(app.verbose);

    match app.command {
        Commands::Optimise(args) => {
            let data = args.data.display().to_string();
            handle_optimise(args)
                .await
                .with_context(|| format!("optimising with projections from {}", data))?
        }
        Commands::CurrentSquad { source, data } => handle_current_squad(source, data)
            .await
            .context("reading the current squad")?,
    }

    Ok(())
}
