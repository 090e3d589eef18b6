//! Shared helpers for command implementations.

use crate::cli::ProjectArgs;
use crate::config::{self, MixFile};
use crate::error::{CliError, Result};
use fob_mix::{Mix, NodeModulesVerifier};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory with a readable error.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {}", e),
        ))
    })
}

/// Resolve the project root: `--cwd` when given, else the process directory.
pub fn resolve_project_root(explicit_cwd: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let Some(explicit) = explicit_cwd else {
        return Ok(cwd);
    };

    let root = resolve_path(explicit, &cwd);
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--cwd is not a directory: {}",
            root.display()
        )));
    }
    Ok(root)
}

/// A configuration session replayed from the project's mix file.
#[derive(Debug)]
pub struct LoadedProject {
    pub root: PathBuf,
    pub mix_file: PathBuf,
    pub mix: Mix,
}

/// Load the mix file for `args` and replay it onto a fresh session.
///
/// Optional packages are looked up under the project root's `node_modules`.
pub fn load_project(args: &ProjectArgs) -> Result<LoadedProject> {
    let root = resolve_project_root(args.cwd.as_deref())?;
    let explicit = args.config.as_deref().map(|path| resolve_path(path, &root));
    let (file, mix_file) = MixFile::load(&root, explicit.as_deref())?;

    let environment = args.environment();
    debug!(%environment, root = %root.display(), "replaying mix file");

    let mut mix = Mix::with_verifier(environment, NodeModulesVerifier::new(&root));
    config::apply(&file, &mut mix, &root)?;

    Ok(LoadedProject {
        root,
        mix_file,
        mix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_absolute() {
        let cwd = Path::new("/project");
        let abs = if cfg!(windows) { "C:\\abs\\mix.json" } else { "/abs/mix.json" };
        assert_eq!(resolve_path(Path::new(abs), cwd), PathBuf::from(abs));
    }

    #[test]
    fn test_resolve_path_relative() {
        assert_eq!(
            resolve_path(Path::new("mix/fob.mix.toml"), Path::new("/project")),
            PathBuf::from("/project/mix/fob.mix.toml")
        );
    }

    #[test]
    fn test_explicit_cwd_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(resolve_project_root(Some(&missing)).is_err());
        assert_eq!(resolve_project_root(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn test_load_project_replays_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("fob.mix.toml"),
            "public_path = \"web/\"\n[[copy]]\nfrom = \"a\"\nto = \"b/\"\n",
        )
        .unwrap();

        let args = ProjectArgs {
            cwd: Some(dir.path().to_path_buf()),
            production: true,
            ..ProjectArgs::default()
        };
        let project = load_project(&args).unwrap();

        assert_eq!(project.mix_file, dir.path().join("fob.mix.toml"));
        assert!(project.mix.in_production());
        assert_eq!(project.mix.config().public_path(), Path::new("web"));
        assert_eq!(project.mix.tasks().len(), 1);
    }
}
