use thiserror::Error;

use crate::services::mpris::UiCommand;

/// One line typed into the terminal panel, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelInput {
    /// Forward to the controller
    Command(UiCommand),

    /// Replace the metadata template
    SetTemplate(String),

    /// Print the command summary
    Help,

    /// Stop the panel
    Quit,

    /// Blank line
    Empty,
}

/// Reasons a line could not be parsed
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// First word is not a known command
    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    /// Command needs an argument that was not given
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// Command that was typed
        command: &'static str,
        /// What is missing
        argument: &'static str,
    },
}

/// Summary printed by `help`
pub const HELP: &str = "\
play             toggle play/pause
stop             stop playback
prev, next       previous / next track
player <name>    switch to another player
v1, v2           choose the protocol used for discovery
meta             show the current track
format <tpl>     change the metadata template
list             list players again
help             show this summary
quit             exit";

/// Parse one input line
///
/// # Errors
/// Returns [`InputError`] for unknown commands and missing arguments
pub fn parse_input(line: &str) -> Result<PanelInput, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => PanelInput::Empty,
        "play" | "pause" => PanelInput::Command(UiCommand::Play),
        "stop" => PanelInput::Command(UiCommand::Stop),
        "prev" | "previous" => PanelInput::Command(UiCommand::Prev),
        "next" => PanelInput::Command(UiCommand::Next),
        "v1" => PanelInput::Command(UiCommand::ToggleVersion(false)),
        "v2" => PanelInput::Command(UiCommand::ToggleVersion(true)),
        "meta" => PanelInput::Command(UiCommand::RefreshMetadata),
        "list" => PanelInput::Command(UiCommand::RefreshCandidates),
        "player" if rest.is_empty() => {
            return Err(InputError::MissingArgument {
                command: "player",
                argument: "a player name",
            });
        }
        "player" => PanelInput::Command(UiCommand::SelectPlayer(rest.to_string())),
        "format" if rest.is_empty() => {
            return Err(InputError::MissingArgument {
                command: "format",
                argument: "a template",
            });
        }
        "format" => PanelInput::SetTemplate(rest.to_string()),
        "help" | "?" => PanelInput::Help,
        "quit" | "exit" | "q" => PanelInput::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(input)
}
