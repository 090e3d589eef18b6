//! Command-line interface definition for fob-mix.
//!
//! - `fob-mix build` - Replay the mix file, run copy tasks, emit the `build` event
//! - `fob-mix inspect` - Print the resolved build configuration

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{BuildArgs, Command, InspectArgs, ProjectArgs};
pub use enums::*;

/// fob-mix - fluent build configuration for the Fob bundler
#[derive(Parser, Debug)]
#[command(
    name = "fob-mix",
    version,
    about = "Fluent build configuration for the Fob bundler",
    long_about = "fob-mix replays a declarative mix file (fob.mix.toml or fob.mix.json)\n\
                  into a single build description: copy tasks, sourcemap policy, public path,\n\
                  bundler and transpiler fragments, custom options, and build hooks."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
