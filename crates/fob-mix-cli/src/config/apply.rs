//! Replaying a mix file onto a configuration session.

use crate::config::MixFile;
use crate::error::{ConfigError, Result};
use crate::hooks::ShellHook;
use fob_mix::Mix;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Replay `file` onto `mix`.
///
/// Calls are made in a fixed order: sourcemaps, public path, resource root,
/// bundler fragments, transpiler config, options, copies, hooks. Options come
/// before copies so a rejected `purifyCss` leaves the task queue empty.
/// Hook commands run with `root` as their working directory.
pub fn apply(file: &MixFile, mix: &mut Mix, root: &Path) -> Result<()> {
    if let Some((production_too, devtool)) = file.source_maps.as_ref().and_then(|s| s.request()) {
        mix.source_maps(production_too, devtool);
    }

    if let Some(path) = &file.public_path {
        mix.set_public_path(path);
    }

    if let Some(resource_root) = &file.resource_root {
        mix.set_resource_root(resource_root.as_str());
    }

    for fragment in webpack_fragments(file.webpack.as_ref())? {
        mix.webpack_config(fragment);
    }

    if let Some(babel) = &file.babel {
        mix.babel_config(babel.clone());
    }

    if let Some(options) = &file.options {
        mix.options(options.clone())?;
    }

    for entry in &file.copy {
        mix.copy(entry.from.as_str(), &entry.to);
    }

    for command in &file.then {
        let hook = ShellHook::new(command.as_str(), root);
        mix.then(hook.into_listener());
    }

    debug!(
        tasks = mix.tasks().len(),
        hooks = file.then.len(),
        "mix file replayed"
    );
    Ok(())
}

fn webpack_fragments(webpack: Option<&Value>) -> Result<Vec<Value>> {
    match webpack {
        None => Ok(Vec::new()),
        Some(fragment @ Value::Object(_)) => Ok(vec![fragment.clone()]),
        Some(Value::Array(fragments)) => fragments
            .iter()
            .map(|fragment| match fragment {
                Value::Object(_) => Ok(fragment.clone()),
                other => Err(invalid_fragment(other)),
            })
            .collect(),
        Some(other) => Err(invalid_fragment(other)),
    }
}

fn invalid_fragment(value: &Value) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: "webpack".to_string(),
        value: value.to_string(),
        hint: "Use a table, or an array of tables merged in order".to_string(),
    }
    .into()
}
