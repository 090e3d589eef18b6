//! fob-mix CLI - replay a mix file and drive the build.
//!
//! The binary is a thin bootstrap around [`fob_mix`]: it decides the
//! environment, replays a declarative mix file onto a [`fob_mix::Mix`]
//! session, runs the queued tasks, and emits the `build` event.
//!
//! - [`cli`] - Argument parsing
//! - [`config`] - Mix file loading and replay
//! - [`executor`] - Copy task execution
//! - [`hooks`] - Shell commands run as `build` listeners
//! - [`error`] - Error types and miette conversion
//! - [`logger`] - Tracing setup
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use fob_mix_cli::{cli::BuildArgs, commands, error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     commands::build_execute(BuildArgs::default())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod hooks;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, HookError, Result, ResultExt, TaskError};
