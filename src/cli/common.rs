//! Shared plumbing for CLI commands.

use thiserror::Error;

/// Process exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully.
    Success,
    /// Command failed (validation, I/O, or internal error).
    Failure,
    /// Command line was malformed.
    UsageError,
}

impl ExitCode {
    /// The numeric code handed to the OS.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::UsageError => 2,
        }
    }
}

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// An error surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed arguments.
    #[error("{0}")]
    Usage(String),
    /// A value was rejected by the validator.
    #[error("{0}")]
    Validation(String),
    /// Reading or writing the settings file failed.
    #[error("{0}")]
    Io(String),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// The exit code this error maps to.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) => ExitCode::UsageError,
            Self::Validation(_) | Self::Io(_) => ExitCode::Failure,
        }
    }
}
