//! Error handling for the fob-mix CLI.
//!
//! `CliError` is the top-level type returned by commands. Domain errors
//! (`ConfigError`, `TaskError`, and the core's `MixError`) convert into it via
//! `#[from]`, and [`cli_error_to_miette`] renders it at the process boundary.
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_mix_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_mix_file(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Mix file discovery, parsing, or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configuration call was rejected, including missing optional packages
    #[error(transparent)]
    Mix(#[from] fob_mix::MixError),

    /// A queued task failed while the build driver ran it
    #[error("Task failed: {0}")]
    Task(#[from] TaskError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Mix file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No mix file in the project root and none given with `--config`
    #[error("No mix file found in {}\n\nHint: Create fob.mix.toml or fob.mix.json, or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// The mix file extension is not one we can read
    #[error("Unsupported mix file format: {}\n\nHint: Use a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The mix file failed to parse or has the wrong shape
    #[error("Invalid mix file: {message}\n\nHint: {hint}")]
    Invalid {
        /// Parser or extraction message
        message: String,
        /// Helpful hint for fixing the file
        hint: String,
    },

    /// A field holds a value of the wrong kind
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Errors raised while running queued tasks.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A literal copy source does not exist
    #[error("Copy source not found: {}\n\nHint: Paths are resolved from the project root", .0.display())]
    SourceNotFound(PathBuf),

    /// The `from` pattern is not a valid glob
    #[error("Invalid copy pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A glob matched several files but the destination names one file
    #[error("Pattern '{pattern}' matched {count} files but '{}' is a single file\n\nHint: End the destination with '/' to copy into a directory", .destination.display())]
    AmbiguousDestination {
        pattern: String,
        destination: PathBuf,
        count: usize,
    },

    /// Two matches would be flattened onto the same file in a directory destination
    #[error("Pattern '{pattern}' copies both {} and {} to {}\n\nHint: Narrow the pattern or split it into separate copy tasks", .first.display(), .second.display(), .destination.display())]
    DestinationCollision {
        pattern: String,
        destination: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// Reading or writing a file failed
    #[error("Failed to copy {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking a source directory failed
    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors raised by `then` shell hooks.
#[derive(Debug, Error)]
pub enum HookError {
    /// The shell could not be started
    #[error("Failed to run hook `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("Hook `{command}` exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    Failed { command: String, code: Option<i32> },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
