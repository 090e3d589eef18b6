//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::commands::utils;
use crate::error::Result;

/// Replay the mix file and print the resolved configuration to stdout.
///
/// Tasks and hooks are not run.
pub fn execute(args: InspectArgs) -> Result<()> {
    let project = utils::load_project(&args.project)?;
    let snapshot = project.mix.snapshot();

    let output = if args.webpack {
        serde_json::to_string_pretty(snapshot.config().bundler_config())?
    } else {
        snapshot.to_json_pretty()?
    };
    println!("{output}");
    Ok(())
}
