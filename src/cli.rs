//! Command-line interface definition for CareGP Chat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to run the gateway and inspect the session log.

use clap::{Parser, Subcommand};

/// CareGP Chat - knowledge-grounded chat gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "caregp-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "CAREGP_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve {
        /// Override the bind address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Inspect stored chat sessions
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// Session log inspection subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List all sessions
    List,

    /// Show the transcript of one session
    Show {
        /// Chat identifier
        chat_id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
