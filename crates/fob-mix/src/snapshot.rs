//! Read-only view of a finished configuration session.

use serde::Serialize;
use serde_json::Value;

use crate::config::MixConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::task::{Task, TaskRegistry};

/// Everything the build driver and bundler engine consume.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSnapshot {
    environment: Environment,
    config: MixConfig,
    tasks: TaskRegistry,
}

impl BuildSnapshot {
    pub(crate) fn new(environment: Environment, config: MixConfig, tasks: TaskRegistry) -> Self {
        Self {
            environment,
            config,
            tasks,
        }
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

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
