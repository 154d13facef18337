//! Fuzzy Friends of Endor customer-service chat entry point.
//!
//! Binary name: `ewog`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the chat
//! loop or the shell-completion generator.

mod cli;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,ewogchat=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { no_stream, config } => {
            cli::chat::run_chat_loop(&config, no_stream).await?;
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "ewog", &mut std::io::stdout());
        }
    }

    Ok(())
}
