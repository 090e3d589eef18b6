//! Deferred work recorded during configuration.
//!
//! The registry only records intent. Tasks are executed later by the build
//! driver, which reads them in insertion order.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

/// Kind tag of a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    CopyFiles,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::CopyFiles => "copy-files",
        }
    }
}

/// Whether a copy destination names a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    File,
    Directory,
}

/// Where copied files land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    path: PathBuf,
    kind: DestinationKind,
}

impl Destination {
    /// Infer the destination kind from the raw string.
    ///
    /// A trailing separator means a directory. Otherwise a final component with
    /// an extension means a file, and anything else is a directory.
    ///
    /// ```
    /// use fob_mix::task::{Destination, DestinationKind};
    ///
    /// assert_eq!(Destination::parse("public/js/").kind(), DestinationKind::Directory);
    /// assert_eq!(Destination::parse("public/app.js").kind(), DestinationKind::File);
    /// assert_eq!(Destination::parse("public/fonts").kind(), DestinationKind::Directory);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let path = PathBuf::from(raw);
        let kind = if raw.ends_with('/') || raw.ends_with('\\') {
            DestinationKind::Directory
        } else if path.extension().is_some() {
            DestinationKind::File
        } else {
            DestinationKind::Directory
        };

        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    pub fn is_directory(&self) -> bool {
        self.kind == DestinationKind::Directory
    }
}

/// Copy files matching a glob-style pattern to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyFilesTask {
    from: String,
    to: Destination,
}

impl CopyFilesTask {
    pub fn new(from: impl Into<String>, to: &str) -> Self {
        Self {
            from: from.into(),
            to: Destination::parse(to),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &Destination {
        &self.to
    }
}

/// A unit of deferred work. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Task {
    CopyFiles(CopyFilesTask),
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::CopyFiles(_) => TaskKind::CopyFiles,
        }
    }

    pub fn as_copy_files(&self) -> Option<&CopyFilesTask> {
        match self {
            Task::CopyFiles(task) => Some(task),
        }
    }
}

impl From<CopyFilesTask> for Task {
    fn from(task: CopyFilesTask) -> Self {
        Task::CopyFiles(task)
    }
}

/// Ordered queue of deferred tasks.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(&mut self, task: impl Into<Task>) {
        let task = task.into();
        debug!(kind = task.kind().as_str(), position = self.tasks.len(), "task queued");
        self.tasks.push(task);
    }

    pub fn add_copy_task(&mut self, from: impl Into<String>, to: &str) {
        self.add_task(CopyFilesTask::new(from, to));
    }

    /// All tasks in insertion order. Reading does not drain the queue.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a TaskRegistry {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
