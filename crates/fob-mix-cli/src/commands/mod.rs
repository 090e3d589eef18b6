//! Command implementations for the fob-mix CLI.
//!
//! - [`build`] - Replay the mix file, run tasks, emit the `build` event
//! - [`inspect`] - Print the resolved configuration

pub mod build;
pub mod inspect;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use inspect::execute as inspect_execute;
