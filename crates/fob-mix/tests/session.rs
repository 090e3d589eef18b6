//! End-to-end behaviour of a configuration session.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fob_mix::{
    BUILD_EVENT, DestinationKind, Environment, Mix, MixError, NodeModulesVerifier, SourceMapMode,
    StaticVerifier, Task,
};
use serde_json::{Value, json};
use tempfile::TempDir;

fn session(environment: Environment) -> Mix {
    Mix::with_verifier(environment, StaticVerifier::all_installed())
}

fn copies(mix: &Mix) -> Vec<(String, PathBuf)> {
    mix.tasks()
        .iter()
        .filter_map(Task::as_copy_files)
        .map(|task| (task.from().to_string(), task.to().path().to_path_buf()))
        .collect()
}

#[test]
fn copy_tasks_keep_call_order() {
    let mut mix = session(Environment::Development);
    mix.copy("a", "b").copy("c", "d");

    assert_eq!(
        copies(&mix),
        vec![
            ("a".to_string(), PathBuf::from("b")),
            ("c".to_string(), PathBuf::from("d")),
        ]
    );
}

#[test]
fn copy_directory_is_a_copy() {
    let mut mix = session(Environment::Development);
    mix.copy_directory("resources/fonts", "public/fonts/");

    let task = mix.tasks()[0].as_copy_files().unwrap();
    assert_eq!(task.from(), "resources/fonts");
    assert_eq!(task.to().kind(), DestinationKind::Directory);
}

#[test]
fn build_listeners_run_in_order() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut mix = session(Environment::Development);

    let log = calls.clone();
    mix.then(move |_| {
        log.borrow_mut().push("f1 start");
        log.borrow_mut().push("f1 end");
        Ok(())
    });
    let log = calls.clone();
    mix.then(move |_| {
        log.borrow_mut().push("f2");
        Ok(())
    });

    let (_, mut events) = mix.into_parts();
    events.emit(BUILD_EVENT, &json!({})).unwrap();

    assert_eq!(*calls.borrow(), vec!["f1 start", "f1 end", "f2"]);
}

#[test]
fn same_listener_registered_twice_runs_twice() {
    let count = Rc::new(RefCell::new(0));
    let mut mix = session(Environment::Development);
    for _ in 0..2 {
        let count = count.clone();
        mix.then(move |_| {
            *count.borrow_mut() += 1;
            Ok(())
        });
    }

    let (_, mut events) = mix.into_parts();
    assert_eq!(events.emit(BUILD_EVENT, &Value::Null).unwrap(), 2);
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn options_shallow_merge() {
    let mut mix = session(Environment::Development);
    mix.options(json!({ "a": 1 })).unwrap();
    mix.options(json!({ "a": 2, "b": 3 })).unwrap();

    assert_eq!(
        Value::Object(mix.config().options().clone()),
        json!({ "a": 2, "b": 3 })
    );
}

#[test]
fn sourcemap_table() {
    let cases = [
        (Environment::Production, true, SourceMapMode::ProductionFile),
        (Environment::Production, false, SourceMapMode::Disabled),
        (Environment::Development, true, SourceMapMode::EvalDevelopment),
        (Environment::Development, false, SourceMapMode::EvalDevelopment),
    ];

    for (environment, production_too, expected) in cases {
        let mut mix = session(environment);
        mix.source_maps(production_too, "eval-source-map");
        assert_eq!(mix.config().source_maps(), &expected, "{environment}");
    }
}

#[test]
fn public_path_trailing_separator() {
    let mut mix = session(Environment::Development);
    mix.set_public_path("dist/assets/");
    assert_eq!(mix.config().public_path(), Path::new("dist/assets"));
}

#[test]
fn purify_failure_stops_configuration() {
    let project = TempDir::new().unwrap();
    let mut mix = Mix::with_verifier(
        Environment::Production,
        NodeModulesVerifier::new(project.path()),
    );

    let outcome = (|| -> fob_mix::Result<()> {
        mix.options(json!({ "purifyCss": ["resources/views/**/*.php"] }))?
            .copy("resources/images", "public/images/");
        Ok(())
    })();

    let err = outcome.unwrap_err();
    assert!(matches!(err, MixError::MissingDependency { .. }));
    assert!(err.to_string().contains("purify-css"));
    assert!(mix.tasks().is_empty());
    assert!(mix.config().option("purifyCss").is_none());
}

#[test]
fn snapshot_carries_everything() {
    let mut mix = session(Environment::Production);
    mix.source_maps_default()
        .set_public_path("web/")
        .set_resource_root("https://cdn.example.com/")
        .webpack_config(json!({ "resolve": { "extensions": [".js"] } }))
        .webpack_config_with(|api| {
            json!({
                "resolve": { "extensions": [".vue"] },
                "plugins": [api.plugin("BannerPlugin", json!({ "banner": "hi" }))]
            })
        })
        .babel_config(json!({ "presets": ["env"] }))
        .copy("img/*.png", "web/img/");

    let value = mix.snapshot().to_value().unwrap();
    assert_eq!(value["environment"], json!("production"));
    assert_eq!(value["config"]["sourcemaps"], json!("source-map"));
    assert_eq!(value["config"]["publicPath"], json!("web"));
    assert_eq!(value["config"]["resourceRoot"], json!("https://cdn.example.com/"));
    assert_eq!(
        value["config"]["webpackConfig"]["resolve"]["extensions"],
        json!([".js", ".vue"])
    );
    assert_eq!(
        value["config"]["webpackConfig"]["plugins"][0]["plugin"],
        json!("BannerPlugin")
    );
    assert_eq!(value["config"]["babelConfig"], json!({ "presets": ["env"] }));
    assert_eq!(value["tasks"][0]["kind"], json!("copy-files"));
}

#[test]
fn in_production_reads_environment() {
    assert!(session(Environment::Production).in_production());
    assert!(!session(Environment::Development).in_production());
}
