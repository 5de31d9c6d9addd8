use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid arguments were provided to a command.
    ///
    /// Returned when a value passed on the command line cannot be used, such as a
    /// player name that is not registered on the bus.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Argument that was rejected
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// A service the command depends on failed.
    ///
    /// Wraps bus and player failures so the command can report them and exit.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Failure details
        details: String,
    },

    /// Output could not be serialized.
    #[error("Cannot serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for command execution results.
///
/// All CLI commands return this type, providing either the text to print
/// or a CliError describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Trait implemented by every one-shot CLI command.
///
/// Commands receive their dependencies and parsed arguments through their
/// constructors, so execution takes no arguments.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failures, including:
    /// - Invalid argument values
    /// - Service unavailability
    async fn execute(&self) -> CommandResult;
}
