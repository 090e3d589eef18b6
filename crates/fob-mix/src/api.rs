//! The fluent configuration surface.
//!
//! A [`Mix`] is the configuration session for one run. It owns the accumulated
//! [`MixConfig`], the task queue and the event listeners, and is handed to the
//! build driver once configuration is done.
//!
//! # Example
//!
//! ```
//! use fob_mix::{Environment, Mix};
//! use serde_json::json;
//!
//! let mut mix = Mix::new(Environment::Development);
//! mix.copy("resources/images", "public/images/")
//!     .source_maps_default()
//!     .set_public_path("public/")
//!     .webpack_config(json!({ "resolve": { "extensions": [".vue"] } }))
//!     .then(|_| Ok(()));
//!
//! assert_eq!(mix.tasks().len(), 1);
//! assert_eq!(mix.config().public_path(), std::path::Path::new("public"));
//! ```

use serde_json::Value;
use tracing::debug;

use crate::bundler::{BundlerApi, BundlerConfig};
use crate::config::MixConfig;
use crate::environment::Environment;
use crate::error::{ListenerError, MixError, Result};
use crate::events::{BUILD_EVENT, EventBus};
use crate::purify::{PURIFY_CSS_OPTION, PURIFY_CSS_PACKAGE, PURIFY_CSS_PEERS, PurifyPaths};
use crate::snapshot::BuildSnapshot;
use crate::sourcemap::DEFAULT_DEV_SOURCE_MAP;
use crate::task::{Task, TaskRegistry};
use crate::verify::{DependencyVerifier, NodeModulesVerifier};

pub struct Mix {
    environment: Environment,
    config: MixConfig,
    tasks: TaskRegistry,
    events: EventBus,
    verifier: Box<dyn DependencyVerifier>,
    purify: PurifyPaths,
}

impl Mix {
    /// Start a session that checks optional packages under `./node_modules`.
    pub fn new(environment: Environment) -> Self {
        Self::with_verifier(environment, NodeModulesVerifier::new("."))
    }

    pub fn with_verifier(
        environment: Environment,
        verifier: impl DependencyVerifier + 'static,
    ) -> Self {
        debug!(%environment, "configuration session started");
        Self {
            environment,
            config: MixConfig::default(),
            tasks: TaskRegistry::new(),
            events: EventBus::new(),
            verifier: Box::new(verifier),
            purify: PurifyPaths,
        }
    }

    /// Copy one or more files to a new location.
    pub fn copy(&mut self, from: impl Into<String>, to: &str) -> &mut Self {
        self.tasks.add_copy_task(from, to);
        self
    }

    /// Copy a directory to a new location. Identical to [`Mix::copy`].
    pub fn copy_directory(&mut self, from: impl Into<String>, to: &str) -> &mut Self {
        self.copy(from, to)
    }

    /// Enable sourcemaps.
    ///
    /// In production `dev_value` is ignored: maps are written to separate files
    /// when `production_too` is set and disabled otherwise.
    pub fn source_maps(&mut self, production_too: bool, dev_value: &str) -> &mut Self {
        self.config
            .set_source_maps(self.environment, production_too, dev_value);
        self
    }

    /// [`Mix::source_maps`] with production maps on and `eval-source-map`.
    pub fn source_maps_default(&mut self) -> &mut Self {
        self.source_maps(true, DEFAULT_DEV_SOURCE_MAP)
    }

    pub fn set_public_path(&mut self, path: &str) -> &mut Self {
        self.config.set_public_path(path);
        self
    }

    /// Prefix for every generated asset URL.
    pub fn set_resource_root(&mut self, root: impl Into<String>) -> &mut Self {
        self.config.set_resource_root(root);
        self
    }

    /// Merge a literal fragment into the bundler config.
    pub fn webpack_config(&mut self, fragment: Value) -> &mut Self {
        self.merge_fragment(BundlerConfig::Tree(fragment))
    }

    /// Merge a fragment produced from the bundler capability handle.
    pub fn webpack_config_with<F>(&mut self, factory: F) -> &mut Self
    where
        F: FnOnce(&BundlerApi) -> Value + 'static,
    {
        self.merge_fragment(BundlerConfig::factory(factory))
    }

    fn merge_fragment(&mut self, fragment: BundlerConfig) -> &mut Self {
        let api = BundlerApi::new(self.environment);
        self.config.merge_bundler_config(fragment, &api);
        self
    }

    /// Replace the transpiler config.
    pub fn babel_config(&mut self, config: Value) -> &mut Self {
        self.config.set_transpiler_config(config);
        self
    }

    /// Shallow-merge custom options.
    ///
    /// A truthy `purifyCss` is expanded into a path list and requires the
    /// purge packages to be installed. If they are not, nothing is stored and
    /// [`MixError::MissingDependency`] is returned; the run must stop there.
    pub fn options(&mut self, options: Value) -> Result<&mut Self> {
        let Value::Object(mut options) = options else {
            return Err(MixError::InvalidOption {
                option: "options".to_string(),
                hint: "expected an object of option names to values".to_string(),
            });
        };

        let purify = options
            .get(PURIFY_CSS_OPTION)
            .filter(|value| PurifyPaths::is_requested(value))
            .map(|value| self.purify.build(value))
            .transpose()?;

        if let Some(paths) = purify {
            self.verifier
                .verify(PURIFY_CSS_PACKAGE, &PURIFY_CSS_PEERS, true)?;
            options.insert(PURIFY_CSS_OPTION.to_string(), paths);
        }

        self.config.merge_options(options);
        Ok(self)
    }

    /// Run `callback` when the build driver emits the `build` event.
    pub fn then<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&Value) -> std::result::Result<(), ListenerError> + 'static,
    {
        self.events.on(BUILD_EVENT, callback);
        self
    }

    pub fn in_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn snapshot(&self) -> BuildSnapshot {
        BuildSnapshot::new(self.environment, self.config.clone(), self.tasks.clone())
    }

    /// End the configuration phase, handing the record and listeners to the
    /// build driver.
    pub fn into_parts(self) -> (BuildSnapshot, EventBus) {
        let snapshot = BuildSnapshot::new(self.environment, self.config, self.tasks);
        (snapshot, self.events)
    }
}

impl std::fmt::Debug for Mix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mix")
            .field("environment", &self.environment)
            .field("config", &self.config)
            .field("tasks", &self.tasks)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sourcemap::SourceMapMode;
    use crate::verify::StaticVerifier;
    use serde_json::json;

    #[test]
    fn chain_returns_same_session() {
        let mut mix = Mix::with_verifier(Environment::Development, StaticVerifier::all_installed());
        mix.copy("a", "b")
            .copy_directory("c", "d/")
            .set_resource_root("/static")
            .babel_config(json!({ "presets": ["env"] }));
        assert_eq!(mix.tasks().len(), 2);
        assert_eq!(mix.config().resource_root(), "/static");
    }

    #[test]
    fn source_maps_follow_environment() {
        let mut prod = Mix::new(Environment::Production);
        prod.source_maps(false, DEFAULT_DEV_SOURCE_MAP);
        assert_eq!(prod.config().source_maps(), &SourceMapMode::Disabled);

        let mut dev = Mix::new(Environment::Development);
        dev.source_maps_default();
        assert_eq!(dev.config().source_maps(), &SourceMapMode::EvalDevelopment);
    }

    #[test]
    fn factory_sees_session_environment() {
        let mut mix = Mix::new(Environment::Production);
        mix.webpack_config_with(|api| json!({ "production": api.in_production() }));
        assert_eq!(mix.config().bundler_config(), &json!({ "production": true }));
    }

    #[test]
    fn options_must_be_an_object() {
        let mut mix = Mix::new(Environment::Development);
        assert!(matches!(
            mix.options(json!(["processCssUrls"])),
            Err(MixError::InvalidOption { .. })
        ));
    }

    #[test]
    fn purify_false_skips_verification() {
        let mut mix = Mix::with_verifier(
            Environment::Development,
            StaticVerifier::with_installed(Vec::<String>::new()),
        );
        mix.options(json!({ "purifyCss": false })).unwrap();
        assert_eq!(mix.config().option("purifyCss"), Some(&json!(false)));
    }

    #[test]
    fn empty_purify_string_skips_verification() {
        let mut mix = Mix::with_verifier(
            Environment::Development,
            StaticVerifier::with_installed(Vec::<String>::new()),
        );
        mix.options(json!({ "purifyCss": "", "other": 0 })).unwrap();
        mix.options(json!({ "purifyCss": 0 })).unwrap();
        assert_eq!(mix.config().option("purifyCss"), Some(&json!(0)));
    }

    #[test]
    fn purify_options_survive_expansion() {
        let mut mix = Mix::with_verifier(Environment::Production, StaticVerifier::all_installed());
        mix.options(json!({
            "purifyCss": {
                "paths": ["views/*.html"],
                "purifyOptions": { "whitelist": ["*modal*"] }
            }
        }))
        .unwrap();
        let stored = mix.config().option("purifyCss").unwrap();
        assert_eq!(stored["paths"], json!(["views/*.html"]));
        assert_eq!(stored["purifyOptions"], json!({ "whitelist": ["*modal*"] }));
    }

    #[test]
    fn purify_is_expanded_before_storage() {
        let mut mix = Mix::with_verifier(Environment::Development, StaticVerifier::all_installed());
        mix.options(json!({ "purifyCss": ["views/**/*.html"], "clearConsole": false }))
            .unwrap();
        assert_eq!(
            mix.config().option("purifyCss"),
            Some(&json!({ "paths": ["views/**/*.html"] }))
        );
        assert_eq!(mix.config().option("clearConsole"), Some(&json!(false)));
    }

    #[test]
    fn missing_purify_packages_store_nothing() {
        let mut mix = Mix::with_verifier(
            Environment::Development,
            StaticVerifier::with_installed(["purify-css"]),
        );
        let err = mix
            .options(json!({ "purifyCss": true, "processCssUrls": false }))
            .unwrap_err();
        assert_eq!(err.missing_packages(), ["purifycss-webpack".to_string()]);
        assert!(mix.config().options().is_empty());
    }

    #[test]
    fn into_parts_keeps_listeners() {
        let mut mix = Mix::new(Environment::Development);
        mix.then(|_| Ok(())).then(|_| Ok(()));
        let (snapshot, events) = mix.into_parts();
        assert_eq!(events.listener_count(BUILD_EVENT), 2);
        assert!(snapshot.tasks().is_empty());
    }
}
