//! CLI command definitions for the `lobby` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod message;
pub mod participant;
pub mod sweep;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lobby_types::config::LobbyConfig;

/// Run and inspect a group chat room.
#[derive(Parser)]
#[command(name = "lobby", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "LOBBY_CONFIG", default_value = "lobby.toml")]
    pub config: PathBuf,

    /// Database URL, overriding the configuration file.
    #[arg(long, global = true, env = "LOBBY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server and the presence sweep.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "LOBBY_PORT")]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long, env = "LOBBY_HOST")]
        host: Option<String>,
    },

    /// List participants currently in the room.
    #[command(alias = "who")]
    Participants,

    /// Show messages visible to a participant.
    Messages {
        /// Participant whose view to render.
        #[arg(long = "as", value_name = "NAME")]
        viewer: String,

        /// Show at most this many of the most recent messages.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run one presence sweep immediately.
    Sweep,
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn,lobby=info",
            1 => "info,lobby=debug",
            _ => "trace",
        }
    }

    /// Apply command-line and environment overrides on top of the file config.
    pub fn apply_overrides(&self, mut config: LobbyConfig) -> LobbyConfig {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Commands::Serve { port, host } = &self.command {
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(host) = host {
                config.server.host = host.clone();
            }
        }
        config
    }
}
