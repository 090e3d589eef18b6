//! The accumulated build configuration record.
//!
//! One [`MixConfig`] lives for a whole configuration session. Each field has
//! its own update rule: sourcemaps, public path, resource root and transpiler
//! config are replaced, the bundler tree is structurally merged, and custom
//! options are shallow merged. Setters for different fields never interact.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::bundler::{BundlerApi, BundlerConfig};
use crate::environment::Environment;
use crate::error::Result;
use crate::merge::merge_into;
use crate::sourcemap::SourceMapMode;

pub(crate) fn default_public_path() -> PathBuf {
    PathBuf::from("public")
}

pub(crate) fn default_resource_root() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixConfig {
    #[serde(rename = "sourcemaps")]
    source_maps: SourceMapMode,

    public_path: PathBuf,

    resource_root: String,

    #[serde(rename = "webpackConfig")]
    bundler_config: Value,

    #[serde(rename = "babelConfig", skip_serializing_if = "Option::is_none")]
    transpiler_config: Option<Value>,

    options: Map<String, Value>,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            source_maps: SourceMapMode::Disabled,
            public_path: default_public_path(),
            resource_root: default_resource_root(),
            bundler_config: Value::Object(Map::new()),
            transpiler_config: None,
            options: Map::new(),
        }
    }
}

impl MixConfig {
    pub fn source_maps(&self) -> &SourceMapMode {
        &self.source_maps
    }

    pub fn public_path(&self) -> &Path {
        &self.public_path
    }

    pub fn resource_root(&self) -> &str {
        &self.resource_root
    }

    pub fn bundler_config(&self) -> &Value {
        &self.bundler_config
    }

    pub fn transpiler_config(&self) -> Option<&Value> {
        self.transpiler_config.as_ref()
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn set_source_maps(
        &mut self,
        environment: Environment,
        production_too: bool,
        dev_value: &str,
    ) {
        self.source_maps = SourceMapMode::resolve(environment, production_too, dev_value);
        debug!(mode = ?self.source_maps, %environment, "sourcemaps configured");
    }

    /// Store a public path with one trailing separator removed and `.`/`..`
    /// segments collapsed. Empty input is accepted and stored as `.`.
    pub fn set_public_path(&mut self, raw: &str) {
        self.public_path = normalize_public_path(raw);
        debug!(public_path = %self.public_path.display(), "public path set");
    }

    pub fn set_resource_root(&mut self, root: impl Into<String>) {
        self.resource_root = root.into();
        debug!(resource_root = %self.resource_root, "resource root set");
    }

    /// Resolve `fragment` and fold it into the accumulated bundler tree.
    pub fn merge_bundler_config(&mut self, fragment: BundlerConfig, api: &BundlerApi) {
        let tree = fragment.resolve(api);
        merge_into(&mut self.bundler_config, tree);
        debug!("bundler config fragment merged");
    }

    pub fn set_transpiler_config(&mut self, config: Value) {
        self.transpiler_config = Some(config);
        debug!("transpiler config replaced");
    }

    /// Shallow merge: every incoming key replaces the stored one.
    pub fn merge_options(&mut self, options: Map<String, Value>) {
        for (key, value) in options {
            debug!(option = %key, "option set");
            self.options.insert(key, value);
        }
    }

    /// Serialize the record with the keys the bundler engine reads.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn normalize_public_path(raw: &str) -> PathBuf {
    if raw.trim().is_empty() {
        warn!("empty public path, using the current directory");
    }

    let trimmed = raw
        .strip_suffix('/')
        .or_else(|| raw.strip_suffix('\\'))
        .unwrap_or(raw);

    PathBuf::from(trimmed).clean()
}
