//! Unit tests for CLI module
//!
//! Tests argument parsing, config overrides and formatting.
//! No bus access or actual command execution.

#![allow(clippy::unwrap_used)]

use clap::Parser;

use crate::{
    cli::{Cli, Commands, formatting::format_player_list},
    config::Config,
    services::mpris::ProtocolVersion,
};

#[test]
fn no_subcommand_means_interactive() {
    let cli = Cli::try_parse_from(["mpris-panel"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.v2);
}

#[test]
fn list_accepts_json_and_global_flags() {
    let cli = Cli::try_parse_from(["mpris-panel", "list", "--json", "--v2"]).unwrap();

    assert!(matches!(cli.command, Some(Commands::List { json: true })));
    assert!(cli.v2);
}

#[test]
fn overrides_replace_file_values() {
    let cli = Cli::try_parse_from([
        "mpris-panel",
        "now-playing",
        "--v2",
        "--player",
        "vlc",
        "--format",
        "%title",
    ])
    .unwrap();
    let mut config = Config::default();

    cli.apply_overrides(&mut config);

    assert_eq!(config.player.protocol, ProtocolVersion::V2);
    assert_eq!(config.display.template, "%title");
    assert_eq!(cli.player.as_deref(), Some("vlc"));
}

#[test]
fn absent_flags_keep_file_values() {
    let cli = Cli::try_parse_from(["mpris-panel"]).unwrap();
    let mut config = Config::from_toml("[player]\nprotocol = \"v2\"").unwrap();

    cli.apply_overrides(&mut config);

    assert_eq!(config.player.protocol, ProtocolVersion::V2);
    assert_eq!(config, Config::from_toml("[player]\nprotocol = \"v2\"").unwrap());
}

#[test]
fn player_list_is_numbered() {
    let names = vec!["vlc".to_string(), "mpv".to_string()];
    assert_eq!(format_player_list(&names), "  1. vlc\n  2. mpv");
    assert_eq!(format_player_list(&[]), "");
}
