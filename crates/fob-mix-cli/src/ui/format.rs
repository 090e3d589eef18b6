//! Formatting helpers for durations and task summaries.

use super::colors_enabled;
use crate::executor::RunReport;
use console::Term;
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use fob_mix_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// List copied files, relative to `root` when possible.
pub fn print_copy_summary(report: &RunReport, root: &Path) {
    if report.files.is_empty() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).min(80);
    let rule = "─".repeat(width);
    let header = format!(
        "Copied {} file{} in {} task{}",
        report.files.len(),
        plural(report.files.len()),
        report.tasks,
        plural(report.tasks)
    );

    if colors_enabled() {
        eprintln!("\n{}", header.bold());
    } else {
        eprintln!("\n{header}");
    }
    eprintln!("{rule}");
    for file in &report.files {
        let shown = file.strip_prefix(root).unwrap_or(file).display().to_string();
        if colors_enabled() {
            eprintln!("  {} {}", "▸".blue(), shown.dimmed());
        } else {
            eprintln!("  ▸ {shown}");
        }
    }
    eprintln!("{rule}");
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
