//! Mix file handling.
//!
//! A mix file is the declarative form of a configuration session. It is read
//! from `fob.mix.toml` or `fob.mix.json`, layered with `FOB_MIX_*` environment
//! variables, and then replayed call by call onto a [`fob_mix::Mix`].
//!
//! ```toml
//! public_path = "public/"
//! source_maps = { production = false, type = "cheap-module-source-map" }
//! then = ["echo built"]
//!
//! [[webpack]]
//! resolve = { extensions = [".vue"] }
//!
//! [options]
//! processCssUrls = false
//!
//! [[copy]]
//! from = "resources/images"
//! to = "public/images/"
//! ```

mod apply;
mod loading;

use fob_mix::DEFAULT_DEV_SOURCE_MAP;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use apply::apply;
pub use loading::{ENV_PREFIX, MIX_FILE_NAMES, discover, figment_for};

/// Parsed mix file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixFile {
    /// Output directory for compiled assets
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_string"
    )]
    pub public_path: Option<String>,

    /// Prefix for generated asset URLs
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_string"
    )]
    pub resource_root: Option<String>,

    /// Sourcemap request: `true`, or a table with `production` and `type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_maps: Option<SourceMapsSetting>,

    /// One bundler fragment or an array of fragments, merged in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpack: Option<Value>,

    /// Transpiler config, replaces any earlier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub babel: Option<Value>,

    /// Custom options, shallow-merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,

    /// Copy tasks in the order they should run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub copy: Vec<CopyEntry>,

    /// Shell commands run after the build
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub then: Vec<String>,
}

/// Accept any scalar as a string. Environment overrides arrive parsed, so
/// `FOB_MIX_PUBLIC_PATH=2024` is an integer by the time it is extracted.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}

/// One `[[copy]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyEntry {
    pub from: String,
    pub to: String,
}

/// The `source_maps` key.
///
/// `true` is shorthand for production maps with the default devtool, and
/// `false` leaves sourcemaps disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceMapsSetting {
    Enabled(bool),
    Detailed {
        #[serde(default = "default_production")]
        production: bool,
        #[serde(rename = "type", default = "default_devtool")]
        devtool: String,
    },
}

fn default_production() -> bool {
    true
}

fn default_devtool() -> String {
    DEFAULT_DEV_SOURCE_MAP.to_string()
}

impl SourceMapsSetting {
    /// Arguments for [`fob_mix::Mix::source_maps`], or `None` when disabled.
    pub fn request(&self) -> Option<(bool, &str)> {
        match self {
            SourceMapsSetting::Enabled(false) => None,
            SourceMapsSetting::Enabled(true) => Some((true, DEFAULT_DEV_SOURCE_MAP)),
            SourceMapsSetting::Detailed {
                production,
                devtool,
            } => Some((*production, devtool.as_str())),
        }
    }
}
