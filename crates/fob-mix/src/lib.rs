//! Fluent build configuration for the Fob bundler.
//!
//! A [`Mix`] session accumulates file copies, sourcemap policy, public path
//! overrides, raw bundler and transpiler fragments, custom options, and build
//! callbacks. When configuration is done the session is split into a
//! [`BuildSnapshot`] and an [`EventBus`] for the build driver.

pub mod api;
pub mod bundler;
pub mod config;
pub mod environment;
pub mod error;
pub mod events;
pub mod merge;
pub mod purify;
pub mod snapshot;
pub mod sourcemap;
pub mod task;
pub mod verify;

// Re-export main types
pub use api::Mix;
pub use bundler::{BundlerApi, BundlerConfig};
pub use config::MixConfig;
pub use environment::Environment;
pub use error::{ListenerError, MixError, Result};
pub use events::{BUILD_EVENT, EventBus};
pub use snapshot::BuildSnapshot;
pub use sourcemap::{DEFAULT_DEV_SOURCE_MAP, SourceMapMode};
pub use task::{CopyFilesTask, Destination, DestinationKind, Task, TaskKind, TaskRegistry};
pub use verify::{DependencyVerifier, NodeModulesVerifier, StaticVerifier};
