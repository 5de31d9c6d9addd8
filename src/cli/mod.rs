//! Command-line interface.
//!
//! Parses arguments with clap and runs the one-shot commands. Running without a
//! subcommand starts the interactive terminal panel.

mod commands;
pub mod formatting;
mod types;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ListCommand, NowPlayingCommand};
pub use types::{CliError, Command, CommandResult};

use crate::{config::Config, services::mpris::ProtocolVersion};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mpris-panel")]
#[command(version, about = "Control MPRIS media players on the session bus")]
pub struct Cli {
    /// One-shot command; omit to start the interactive panel
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Talk to MPRIS2 (`org.mpris.MediaPlayer2.*`) players
    #[arg(long, global = true)]
    pub v2: bool,

    /// Player to attach to instead of the first one found
    #[arg(long, global = true, value_name = "NAME")]
    pub player: Option<String>,

    /// Metadata template, e.g. "%artist - %title"
    #[arg(long, global = true, value_name = "TEMPLATE")]
    pub format: Option<String>,

    /// Configuration file to read instead of the default one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// One-shot commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List players registered on the bus
    List {
        /// Print the names as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Render the current track of the selected player once
    NowPlaying,
}

impl Cli {
    /// Apply command-line values on top of the file configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.v2 {
            config.player.protocol = ProtocolVersion::V2;
        }
        if let Some(template) = &self.format {
            config.display.template = template.clone();
        }
    }
}
