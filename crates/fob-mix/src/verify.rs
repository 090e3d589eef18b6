//! Presence checks for optional packages.
//!
//! Features such as CSS purging rely on packages that are not installed by
//! default. The verifier is asked before the feature is recorded. When `abort`
//! is set a missing package is returned as [`MixError::MissingDependency`] and
//! the caller is expected to stop the run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{MixError, Result};

pub trait DependencyVerifier {
    /// Check that every package in `peers` is installed for `package`.
    fn verify(&self, package: &str, peers: &[&str], abort: bool) -> Result<()>;
}

fn report(package: &str, missing: Vec<String>, abort: bool) -> Result<()> {
    if missing.is_empty() {
        debug!(%package, "dependencies present");
        return Ok(());
    }

    if abort {
        return Err(MixError::MissingDependency {
            package: package.to_string(),
            missing,
        });
    }

    warn!(%package, missing = %missing.join(", "), "optional dependencies missing");
    Ok(())
}

/// Looks for `<root>/node_modules/<peer>/package.json`.
#[derive(Debug, Clone)]
pub struct NodeModulesVerifier {
    root: PathBuf,
}

impl NodeModulesVerifier {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_installed(&self, peer: &str) -> bool {
        self.root
            .join("node_modules")
            .join(peer)
            .join("package.json")
            .is_file()
    }
}

impl DependencyVerifier for NodeModulesVerifier {
    fn verify(&self, package: &str, peers: &[&str], abort: bool) -> Result<()> {
        let missing = peers
            .iter()
            .filter(|peer| !self.is_installed(peer))
            .map(|peer| peer.to_string())
            .collect();
        report(package, missing, abort)
    }
}

/// Verifier backed by a fixed set of installed package names.
///
/// Useful when embedding the configuration front-end somewhere without a
/// `node_modules` tree.
#[derive(Debug, Clone, Default)]
pub struct StaticVerifier {
    installed: Option<BTreeSet<String>>,
}

impl StaticVerifier {
    /// Every package counts as installed.
    pub fn all_installed() -> Self {
        Self { installed: None }
    }

    pub fn with_installed<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            installed: Some(packages.into_iter().map(Into::into).collect()),
        }
    }
}

impl DependencyVerifier for StaticVerifier {
    fn verify(&self, package: &str, peers: &[&str], abort: bool) -> Result<()> {
        let Some(installed) = &self.installed else {
            return Ok(());
        };
        let missing = peers
            .iter()
            .filter(|peer| !installed.contains(**peer))
            .map(|peer| peer.to_string())
            .collect();
        report(package, missing, abort)
    }
}
