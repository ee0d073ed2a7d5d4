//! Error types for the CLI application.

use ledger_engine::errors::GameError;
use ledger_sync::SyncError;
use std::fmt;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Request rejected by the game rules
    Engine(GameError),

    /// Shared slot failure: unknown game, stale snapshot, wrong turn, ...
    Sync(SyncError),

    /// A replayed or simulated step broke a snapshot invariant
    Invariant(BatchValidationError<usize>),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Rejected: {}", e),
            CliError::Sync(e) => write!(f, "{}", e),
            CliError::Invariant(e) => write!(f, "Invariant violated at step {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Sync(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

// Rule rejections surface the same way whether or not they went through a replica
impl From<SyncError> for CliError {
    fn from(error: SyncError) -> Self {
        match error {
            SyncError::Engine(e) => CliError::Engine(e),
            SyncError::Io(e) => CliError::Io(e),
            other => CliError::Sync(other),
        }
    }
}

/// A failure tied to one item of a batch, such as a line of a replay log.
///
/// # Examples
///
/// ```rust
/// use ledger_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "chip total changed from 2000 to 2010".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: chip total changed from 2000 to 2010");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
