//! Sourcemap strategy selection.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::environment::Environment;

/// Devtool used in development when the caller does not pick one.
pub const DEFAULT_DEV_SOURCE_MAP: &str = "eval-source-map";

/// Devtool emitted for production builds that keep sourcemaps.
pub const PRODUCTION_SOURCE_MAP: &str = "source-map";

/// Sourcemap strategy handed to the bundler.
///
/// Serializes to the bundler's devtool value: `false` when disabled, otherwise
/// the devtool string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceMapMode {
    #[default]
    Disabled,
    /// `eval-source-map`, the development default.
    EvalDevelopment,
    /// Separate `.map` files for production builds.
    ProductionFile,
    /// Any other devtool string.
    Custom(String),
}

impl SourceMapMode {
    /// Pick the mode for an environment.
    ///
    /// Production builds ignore `dev_value`: they get separate map files when
    /// `production_too` is set and no sourcemaps otherwise. Development builds
    /// always use `dev_value`.
    ///
    /// ```
    /// use fob_mix::{Environment, SourceMapMode};
    ///
    /// let mode = SourceMapMode::resolve(Environment::Production, false, "eval-source-map");
    /// assert_eq!(mode, SourceMapMode::Disabled);
    /// ```
    pub fn resolve(environment: Environment, production_too: bool, dev_value: &str) -> Self {
        if environment.is_production() {
            if production_too {
                SourceMapMode::ProductionFile
            } else {
                SourceMapMode::Disabled
            }
        } else {
            Self::from_devtool(dev_value)
        }
    }

    /// Development devtool: the eval default or any other string verbatim.
    pub fn from_devtool(devtool: &str) -> Self {
        match devtool {
            DEFAULT_DEV_SOURCE_MAP => SourceMapMode::EvalDevelopment,
            other => SourceMapMode::Custom(other.to_string()),
        }
    }

    /// The devtool string, or `None` when sourcemaps are disabled.
    pub fn devtool(&self) -> Option<&str> {
        match self {
            SourceMapMode::Disabled => None,
            SourceMapMode::EvalDevelopment => Some(DEFAULT_DEV_SOURCE_MAP),
            SourceMapMode::ProductionFile => Some(PRODUCTION_SOURCE_MAP),
            SourceMapMode::Custom(devtool) => Some(devtool),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SourceMapMode::Disabled)
    }

    /// The value the bundler expects in its `devtool` field.
    pub fn to_value(&self) -> Value {
        match self.devtool() {
            Some(devtool) => Value::String(devtool.to_string()),
            None => Value::Bool(false),
        }
    }
}

impl Serialize for SourceMapMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.devtool() {
            Some(devtool) => serializer.serialize_str(devtool),
            None => serializer.serialize_bool(false),
        }
    }
}
