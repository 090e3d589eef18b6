//! Runs queued tasks against the project directory.
//!
//! Copy sources are resolved from the project root. A source is one of:
//!
//! - an existing file, copied as-is
//! - an existing directory, copied recursively keeping its layout
//! - a glob pattern, expanded from its longest literal prefix
//!
//! Glob matches land in a Directory destination by file name. A File
//! destination accepts exactly one match.

use crate::error::TaskError;
use fob_mix::task::{CopyFilesTask, Destination, Task};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Summary of a task run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tasks executed
    pub tasks: usize,
    /// Destination of every file written, in copy order
    pub files: Vec<PathBuf>,
    /// Copy patterns that matched nothing
    pub unmatched: Vec<String>,
}

/// Executes tasks relative to a project root.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    root: PathBuf,
}

impl TaskRunner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Run every task in order, stopping at the first failure.
    pub fn run_all(&self, tasks: &[Task]) -> Result<RunReport, TaskError> {
        let mut report = RunReport::default();
        for task in tasks {
            self.run(task, &mut report)?;
            report.tasks += 1;
        }
        Ok(report)
    }

    /// Run one task, recording its outcome in `report`.
    pub fn run(&self, task: &Task, report: &mut RunReport) -> Result<(), TaskError> {
        match task {
            Task::CopyFiles(copy) => self.copy_files(copy, report),
        }
    }

    fn copy_files(&self, task: &CopyFilesTask, report: &mut RunReport) -> Result<(), TaskError> {
        let source = self.root.join(task.from());
        let target = self.root.join(task.to().path());
        debug!(from = task.from(), to = %target.display(), "copying");

        if source.is_file() {
            let dest = if task.to().is_directory() {
                target.join(file_name(&source)?)
            } else {
                target
            };
            copy_file(&source, &dest)?;
            report.files.push(dest);
            return Ok(());
        }

        if source.is_dir() {
            report.files.extend(copy_tree(&source, &target)?);
            return Ok(());
        }

        if task.from().contains(GLOB_META) {
            let pattern = task.from().replace('\\', "/");
            let written = self.copy_glob(&pattern, task.to(), &target)?;
            if written.is_empty() {
                report.unmatched.push(pattern);
            }
            report.files.extend(written);
            return Ok(());
        }

        Err(TaskError::SourceNotFound(PathBuf::from(task.from())))
    }

    fn copy_glob(
        &self,
        pattern: &str,
        destination: &Destination,
        target: &Path,
    ) -> Result<Vec<PathBuf>, TaskError> {
        let matcher = compile(pattern)?;
        let base = literal_prefix(pattern);
        let matches = self.expand(&matcher, &base)?;

        if matches.is_empty() {
            debug!(%pattern, "copy pattern matched no files");
            return Ok(Vec::new());
        }

        if !destination.is_directory() {
            if matches.len() > 1 {
                return Err(TaskError::AmbiguousDestination {
                    pattern: pattern.to_string(),
                    destination: destination.path().to_path_buf(),
                    count: matches.len(),
                });
            }
            copy_file(&matches[0], target)?;
            return Ok(vec![target.to_path_buf()]);
        }

        let mut planned: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(matches.len());
        for source in matches {
            let dest = target.join(file_name(&source)?);
            if let Some((first, _)) = planned.iter().find(|(_, planned)| *planned == dest) {
                return Err(TaskError::DestinationCollision {
                    pattern: pattern.to_string(),
                    destination: dest,
                    first: first.clone(),
                    second: source,
                });
            }
            planned.push((source, dest));
        }

        let mut written = Vec::with_capacity(planned.len());
        for (source, dest) in planned {
            copy_file(&source, &dest)?;
            written.push(dest);
        }
        Ok(written)
    }

    /// Files under `base` whose pattern-relative path matches, sorted by path.
    fn expand(&self, matcher: &GlobMatcher, base: &str) -> Result<Vec<PathBuf>, TaskError> {
        let dir = if base.is_empty() {
            self.root.clone()
        } else {
            self.root.join(base)
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            let candidate = if base.is_empty() {
                relative
            } else {
                format!("{base}/{relative}")
            };
            if matcher.is_match(&candidate) {
                matches.push(entry.into_path());
            }
        }
        Ok(matches)
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, TaskError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| TaskError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Leading path components of `pattern` that contain no glob syntax.
fn literal_prefix(pattern: &str) -> String {
    let normalized = pattern.replace('\\', "/");
    let mut components: Vec<&str> = normalized
        .split('/')
        .take_while(|component| !component.contains(GLOB_META))
        .collect();
    // The last literal component is only a directory if something follows it.
    if components.len() == normalized.split('/').count() {
        components.pop();
    }
    components.join("/")
}

fn copy_tree(source: &Path, target: &Path) -> Result<Vec<PathBuf>, TaskError> {
    let mut written = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dest = target.join(relative);
        copy_file(entry.path(), &dest)?;
        written.push(dest);
    }
    Ok(written)
}

fn copy_file(source: &Path, dest: &Path) -> Result<(), TaskError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| TaskError::Copy {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::copy(source, dest).map_err(|err| TaskError::Copy {
        path: source.to_path_buf(),
        source: err,
    })?;
    debug!(from = %source.display(), to = %dest.display(), "copied");
    Ok(())
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr, TaskError> {
    path.file_name()
        .ok_or_else(|| TaskError::SourceNotFound(path.to_path_buf()))
}
