//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, TaskError};
use fob_mix::MixError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Mix(e) => mix_error_to_miette(e),
        CliError::Task(e) => task_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert MixError to miette Report
pub fn mix_error_to_miette(err: MixError) -> Report {
    match err {
        MixError::MissingDependency { package, missing } => {
            miette::miette!(
                help = format!("npm install --save-dev {}", missing.join(" ")),
                "{} needs packages that are not installed: {}",
                package,
                missing.join(", ")
            )
        }
        MixError::Listener { event, source } => {
            miette::miette!("'{}' hook failed: {}", event, source)
        }
        _ => miette::miette!("{}", err),
    }
}

/// Convert TaskError to miette Report
pub fn task_error_to_miette(err: TaskError) -> Report {
    match err {
        TaskError::InvalidPattern { pattern, source } => {
            miette::miette!(
                help = "Patterns follow glob syntax: *, **, ?, [abc], {a,b}",
                "Invalid copy pattern '{}': {}",
                pattern,
                source
            )
        }
        _ => miette::miette!("Task failed: {}", err),
    }
}
