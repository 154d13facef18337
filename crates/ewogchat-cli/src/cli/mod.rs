//! CLI command definitions for the `ewog` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Fuzzy Friends of Endor customer-service chat.
#[derive(Parser)]
#[command(name = "ewog", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive support chat session.
    Chat {
        /// Wait for whole replies instead of streaming fragments.
        #[arg(long)]
        no_stream: bool,

        /// Path to the configuration file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
