use crate::config::MixFile;
use crate::error::{CliError, ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names looked up in the project root, in priority order.
pub const MIX_FILE_NAMES: [&str; 2] = ["fob.mix.toml", "fob.mix.json"];

/// Prefix for environment overrides (`FOB_MIX_PUBLIC_PATH`, ...).
pub const ENV_PREFIX: &str = "FOB_MIX_";

/// Keys that may be overridden from the environment.
const ENV_KEYS: [&str; 2] = ["public_path", "resource_root"];

/// Find the mix file in `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    MIX_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Layer the mix file at `path` with environment overrides.
///
/// Priority: environment > file.
pub fn figment_for(path: &Path) -> Result<Figment> {
    let file = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Figment::from(Toml::file(path)),
        Some("json") => Figment::from(Json::file(path)),
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf()).into()),
    };

    Ok(file.merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS)))
}

impl MixFile {
    /// Load the mix file for a project.
    ///
    /// An explicit path must exist. Without one, [`MIX_FILE_NAMES`] are tried
    /// in `root`. Returns the parsed file and the path it came from.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => return Err(CliError::FileNotFound(path.to_path_buf())),
            None => discover(root).ok_or_else(|| ConfigError::NotFound(root.to_path_buf()))?,
        };

        debug!(path = %path.display(), "loading mix file");
        let file = Self::from_figment(figment_for(&path)?)?;
        Ok((file, path))
    }

    /// Extract a mix file from an already layered figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().map_err(|e| {
            ConfigError::Invalid {
                message: e.to_string(),
                hint: "Check the mix file syntax and field types".to_string(),
            }
            .into()
        })
    }
}
