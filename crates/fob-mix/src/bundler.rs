//! Bundler capability handle and config fragment variants.

use serde_json::{Map, Value, json};

use crate::environment::Environment;

/// Handle passed to config factories so they can build plugin nodes and
/// inspect the environment without reaching for globals.
#[derive(Debug, Clone, Copy)]
pub struct BundlerApi {
    environment: Environment,
}

impl BundlerApi {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn in_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Version of the configuration front-end that produced the tree.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Describe a bundler plugin instance.
    ///
    /// ```
    /// use fob_mix::{BundlerApi, Environment};
    /// use serde_json::json;
    ///
    /// let api = BundlerApi::new(Environment::Development);
    /// assert_eq!(
    ///     api.plugin("BannerPlugin", json!({ "banner": "v1" })),
    ///     json!({ "plugin": "BannerPlugin", "options": { "banner": "v1" } })
    /// );
    /// ```
    pub fn plugin(&self, name: &str, options: Value) -> Value {
        json!({ "plugin": name, "options": options })
    }

    /// Compile-time constant replacements.
    pub fn define_plugin(&self, definitions: Map<String, Value>) -> Value {
        self.plugin("DefinePlugin", Value::Object(definitions))
    }

    /// Identifiers injected as module imports wherever they are referenced.
    pub fn provide_plugin(&self, provides: Map<String, Value>) -> Value {
        self.plugin("ProvidePlugin", Value::Object(provides))
    }
}

type Factory = Box<dyn FnOnce(&BundlerApi) -> Value>;

/// A bundler config fragment: either a literal tree or a generator resolved
/// against the [`BundlerApi`] right before merging.
pub enum BundlerConfig {
    Tree(Value),
    Factory(Factory),
}

impl BundlerConfig {
    pub fn factory<F>(f: F) -> Self
    where
        F: FnOnce(&BundlerApi) -> Value + 'static,
    {
        BundlerConfig::Factory(Box::new(f))
    }

    /// Produce the literal tree, invoking the factory if needed.
    pub fn resolve(self, api: &BundlerApi) -> Value {
        match self {
            BundlerConfig::Tree(tree) => tree,
            BundlerConfig::Factory(factory) => factory(api),
        }
    }
}

impl From<Value> for BundlerConfig {
    fn from(tree: Value) -> Self {
        BundlerConfig::Tree(tree)
    }
}

impl std::fmt::Debug for BundlerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundlerConfig::Tree(tree) => f.debug_tuple("Tree").field(tree).finish(),
            BundlerConfig::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
