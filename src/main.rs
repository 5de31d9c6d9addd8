//! mpris-panel - Main entry point
//!
//! Without a subcommand runs the interactive terminal panel; otherwise runs one
//! one-shot command and exits.

use std::{
    error::Error,
    io, process,
    sync::{Arc, RwLock},
};

use clap::Parser;
use mpris_panel::{
    cli::{
        Cli, Command, Commands, ListCommand, NowPlayingCommand,
        formatting::{format_error, format_hint},
    },
    config::{Config, ConfigPaths},
    panel::{self, SharedTemplate, TerminalPanel},
    services::mpris::{Controller, ControllerSettings, ZbusMediaBus},
    tracing_config,
};
use tokio::io::BufReader;
use tracing::{Instrument, info, info_span, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ConfigPaths::main_config()?,
    };
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    match &cli.command {
        None => {
            tracing_config::init_with_file(config.general.log_level)?;
            run_panel(&cli, config)
                .instrument(info_span!("mpris_panel"))
                .await
        }
        Some(command) => {
            tracing_config::init_stderr(config.general.log_level)?;
            run_command(&cli, command, &config).await
        }
    }
}

/// Runs the interactive terminal panel until the user quits or input ends.
///
/// The controller runs on this task; stdin is read by a second task that feeds
/// parsed commands into the controller's channel.
async fn run_panel(cli: &Cli, config: Config) -> Result<(), Box<dyn Error>> {
    info!("Starting mpris-panel");

    let bus = Arc::new(ZbusMediaBus::connect_session().await);
    if !bus.is_connected() {
        eprintln!(
            "{}",
            format_error("Session bus unavailable, no players will be found")
        );
    }

    let template: SharedTemplate = Arc::new(RwLock::new(config.display.template.clone()));
    let terminal = TerminalPanel::new(io::stdout(), Arc::clone(&template));

    let mut settings = ControllerSettings::from(&config);
    settings.player = cli.player.clone();

    let (mut controller, events) = Controller::new(bus, terminal, settings);
    println!("{}", format_hint("type 'help' for commands"));
    controller.start().await;

    let input = tokio::spawn(panel::run_input_loop(
        BufReader::new(tokio::io::stdin()),
        controller.sender(),
        template,
        |line| println!("{line}"),
    ));

    controller.run(events).await;

    if let Err(e) = input.await {
        warn!("Input loop ended abnormally: {e}");
    }
    Ok(())
}

/// Executes a one-shot command and prints its output.
///
/// # Errors
/// Command failures are printed and end the process with status 1.
async fn run_command(
    cli: &Cli,
    command: &Commands,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let bus = Arc::new(ZbusMediaBus::connect_session().await);
    let version = config.player.protocol;

    let result = match command {
        Commands::List { json } => ListCommand::new(bus, version, *json).execute().await,
        Commands::NowPlaying => {
            NowPlayingCommand::new(
                bus,
                version,
                cli.player.clone(),
                config.display.template.clone(),
            )
            .execute()
            .await
        }
    };

    match result {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
