//! Manifest types deserialized from `bake.toml`.

use serde::Deserialize;

/// The top-level project manifest parsed from `bake.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata (name, version, description, authors).
    pub project: ProjectMeta,
    /// Build settings (include paths, extra flags, default worker count).
    #[serde(default)]
    pub build: BuildSettings,
}

/// Core project metadata required in every `bake.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name. Also names the produced executable.
    pub name: String,
    /// The project version string.
    #[serde(default = "default_version")]
    pub version: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
    /// List of project authors.
    #[serde(default)]
    pub authors: Vec<String>,
}

/// Build settings from the `[build]` section.
#[derive(Debug, Default, Deserialize)]
pub struct BuildSettings {
    /// External include directories searched (in order) after `src/` when
    /// resolving `#include` directives.
    #[serde(default)]
    pub include_paths: Vec<String>,
    /// Extra flags appended to every compiler invocation, both profiles.
    #[serde(default)]
    pub cflags: Vec<String>,
    /// Extra flags appended to the linker invocation.
    #[serde(default)]
    pub ldflags: Vec<String>,
    /// Default number of parallel compile workers. Overridden by `--jobs`;
    /// falls back to available parallelism when absent.
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}
