//! Error types for configuration accumulation and build events.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MixError>;

/// Error type returned by `build` event listeners.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum MixError {
    /// A feature was configured whose optional packages are not installed.
    ///
    /// Fatal by request: the caller must stop before the build phase.
    #[error(
        "{package} requires packages that are not installed: {}\n\nHint: run `npm install --save-dev {}` and try again",
        .missing.join(", "),
        .missing.join(" ")
    )]
    MissingDependency {
        package: String,
        missing: Vec<String>,
    },

    #[error("invalid value for option '{option}': {hint}")]
    InvalidOption { option: String, hint: String },

    /// A listener failed while an event was being dispatched.
    #[error("'{event}' listener failed: {source}")]
    Listener {
        event: String,
        #[source]
        source: ListenerError,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MixError {
    /// Names of the missing packages, if this is a dependency failure.
    pub fn missing_packages(&self) -> &[String] {
        match self {
            MixError::MissingDependency { missing, .. } => missing,
            _ => &[],
        }
    }
}
