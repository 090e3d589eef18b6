//! Build command implementation.
//!
//! `fob-mix build` is the build driver: it ends the configuration phase, runs
//! the queued tasks, hands the resolved configuration to the bundler through
//! `--emit`, and finally emits the `build` event exactly once.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::executor::TaskRunner;
use crate::ui;
use fob_mix::{BUILD_EVENT, BuildSnapshot};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Execute the build command.
///
/// # Build Process
///
/// 1. Load the mix file and replay it onto a session
/// 2. Run copy tasks in the order they were queued
/// 3. Write the resolved configuration if `--emit` was given
/// 4. Emit `build` with `{ tasks, production, publicPath }`
///
/// Any failure stops the remaining steps.
pub fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let project = utils::load_project(&args.project)?;
    ui::info(&format!(
        "Loaded {} ({})",
        project.mix_file.display(),
        project.mix.environment()
    ));

    let root = project.root;
    let (snapshot, mut events) = project.mix.into_parts();

    let report = TaskRunner::new(&root).run_all(snapshot.tasks())?;
    info!(tasks = report.tasks, files = report.files.len(), "tasks finished");
    for pattern in &report.unmatched {
        ui::warning(&format!("Copy pattern {pattern} matched no files"));
    }
    ui::print_copy_summary(&report, &root);

    if let Some(emit) = &args.emit {
        let path = utils::resolve_path(emit, &root);
        write_snapshot(&snapshot, &path)?;
        ui::info(&format!("Wrote build config to {}", path.display()));
    }

    let payload = build_payload(&snapshot)?;
    let hooks = events.emit(BUILD_EVENT, &payload)?;
    if hooks > 0 {
        info!(hooks, "build hooks finished");
    }

    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));
    Ok(())
}

/// Payload delivered to `build` listeners.
pub fn build_payload(snapshot: &BuildSnapshot) -> Result<Value> {
    Ok(json!({
        "tasks": serde_json::to_value(snapshot.tasks())?,
        "production": snapshot.environment().is_production(),
        "publicPath": snapshot.config().public_path().to_string_lossy(),
    }))
}

fn write_snapshot(snapshot: &BuildSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    let contents = snapshot.to_json_pretty()?;
    fs::write(path, contents).context(format!("Failed to write {}", path.display()))
}
