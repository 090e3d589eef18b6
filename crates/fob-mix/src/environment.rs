//! Production vs development flag supplied by the bootstrap.

use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`Environment::from_env`].
pub const NODE_ENV: &str = "NODE_ENV";

/// Build environment. Fixed for the lifetime of a configuration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Interpret a `NODE_ENV` style value. Only `production` selects production.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Read the environment from `NODE_ENV`.
    pub fn from_env() -> Self {
        Self::from_node_env(std::env::var(NODE_ENV).ok().as_deref())
    }

    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Environment {
    fn from(production: bool) -> Self {
        if production {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}
