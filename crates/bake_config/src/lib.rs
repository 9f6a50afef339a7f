//! Parsing and validation of `bake.toml` project manifests.
//!
//! This crate reads the project manifest and produces a strongly-typed
//! [`ProjectConfig`] covering project metadata and build settings (include
//! paths, extra compiler/linker flags, default worker count).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{is_valid_project_name, load_config, load_config_from_str};
pub use types::*;

/// The manifest file name looked up in a project root.
pub const MANIFEST_NAME: &str = "bake.toml";
