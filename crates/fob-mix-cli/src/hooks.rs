//! Shell commands registered as `build` listeners.

use crate::error::HookError;
use fob_mix::ListenerError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Event name exported to hook commands.
pub const EVENT_VAR: &str = "FOB_MIX_EVENT";

/// JSON payload exported to hook commands.
pub const PAYLOAD_VAR: &str = "FOB_MIX_PAYLOAD";

/// A `then` entry from the mix file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellHook {
    command: String,
    cwd: PathBuf,
}

impl ShellHook {
    pub fn new(command: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the command through the platform shell and wait for it.
    ///
    /// Inherits stdio so hook output appears inline with the build.
    pub fn run(&self, event: &str, payload: &Value) -> Result<(), HookError> {
        info!(command = %self.command, "running {event} hook");

        let status = shell(&self.command)
            .current_dir(&self.cwd)
            .env(EVENT_VAR, event)
            .env(PAYLOAD_VAR, payload.to_string())
            .status()
            .map_err(|source| HookError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        debug!(command = %self.command, %status, "hook finished");
        if status.success() {
            Ok(())
        } else {
            Err(HookError::Failed {
                command: self.command.clone(),
                code: status.code(),
            })
        }
    }

    /// Adapt the hook to the `build` listener signature.
    pub fn into_listener(self) -> impl FnMut(&Value) -> Result<(), ListenerError> + 'static {
        move |payload| {
            self.run(fob_mix::BUILD_EVENT, payload)
                .map_err(ListenerError::from)
        }
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
