/*!
 * Error types for the potrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the external translation capability itself
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The translation command exited unsuccessfully
    #[error("Command exited with status {status}: {stderr}")]
    CommandFailed {
        /// Exit code, `-1` when the process was terminated by a signal
        status: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The translation command could not be started or its output read
    #[error("Failed to run command: {0}")]
    Spawn(String),

    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },
}

/// Why a single record was not translated.
///
/// The `Display` text of each variant is the reason written to the log file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Nothing but whitespace was submitted
    #[error("Empty input")]
    EmptyInput,

    /// Command token, resource path or asset filename
    #[error("Command skipped")]
    Skipped,

    /// The provider reported a failure
    #[error("Translation command failed")]
    CommandFailed(String),

    /// The provider answered with blank text
    #[error("Empty translation result")]
    EmptyResult,

    /// The provider did not answer in time
    #[error("Translation timeout")]
    Timeout,

    /// The provider could not be reached at all
    #[error("Error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Outcomes where no translation was attempted on purpose
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::Skipped)
    }

    /// Failures that never reached a working provider
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<ProviderError> for GatewayError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::CommandFailed { .. } | ProviderError::ApiError { .. } => {
                Self::CommandFailed(error.to_string())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Errors that abort the scan of a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The translation log could not be written
    #[error("Failed to write translation log: {0}")]
    Journal(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The selected catalog does not exist
    #[error("File not found: {0}")]
    InputNotFound(String),

    /// The interactive selection was not a listed index
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Nothing to choose from in interactive mode
    #[error("No .po files found in {0}")]
    NoCatalogFiles(String),

    /// The translated catalog is already present
    #[error("Output already exists: {0} (use -f to force overwrite)")]
    OutputExists(String),

    /// Interrupted by the user before processing began
    #[error("Cancelled")]
    Cancelled,

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while scanning a catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit code reported for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_) => 2,
            Self::InvalidSelection(_) => 3,
            Self::NoCatalogFiles(_) => 4,
            Self::OutputExists(_) => 5,
            Self::Cancelled => 130,
            Self::Config(_) | Self::File(_) | Self::Catalog(_) | Self::Unknown(_) => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Keep the typed error when one travelled through anyhow
        match error.downcast::<AppError>() {
            Ok(app_error) => app_error,
            Err(error) => Self::Unknown(format!("{:#}", error)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
