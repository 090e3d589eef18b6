use clap::{Args, Subcommand};
use fob_mix::Environment;
use std::path::PathBuf;

use crate::cli::enums::EnvironmentArg;

/// Available fob-mix subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay the mix file and run the build pass
    ///
    /// Queued copy tasks run in the order they were declared. The resolved
    /// configuration can be written for the bundler with --emit, and the
    /// `build` hooks run once everything else has finished.
    Build(BuildArgs),

    /// Print the resolved build configuration as JSON
    ///
    /// Replays the mix file without running tasks or hooks.
    Inspect(InspectArgs),
}

/// Options shared by every command that loads a mix file
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Path to the mix file (defaults to fob.mix.toml or fob.mix.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root; copy paths and node_modules are resolved from here
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Build environment (defaults to NODE_ENV)
    #[arg(short, long, value_enum, conflicts_with = "production")]
    pub env: Option<EnvironmentArg>,

    /// Shorthand for --env production
    #[arg(short, long)]
    pub production: bool,
}

impl ProjectArgs {
    /// Resolve the environment flag: explicit flags first, then `NODE_ENV`.
    pub fn environment(&self) -> Environment {
        if self.production {
            return Environment::Production;
        }
        match self.env {
            Some(env) => env.into(),
            None => Environment::from_env(),
        }
    }
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the resolved configuration to this file for the bundler
    #[arg(long, value_name = "FILE")]
    pub emit: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print only the merged bundler config
    #[arg(long)]
    pub webpack: bool,
}
