//! Manifest file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use crate::MANIFEST_NAME;
use std::path::Path;

/// Loads and validates a `bake.toml` manifest from a project directory.
///
/// Reads `<project_dir>/bake.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let manifest_path = project_dir.join(MANIFEST_NAME);
    let content = std::fs::read_to_string(&manifest_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `bake.toml` manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and manifest values are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if !is_valid_project_name(&config.project.name) {
        return Err(ConfigError::ValidationError(format!(
            "'{}' is not a valid project name",
            config.project.name
        )));
    }
    if config.build.jobs == Some(0) {
        return Err(ConfigError::ValidationError(
            "build.jobs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Checks whether a string is a valid project name.
///
/// Names must start with an ASCII letter or underscore, followed by ASCII
/// letters, digits, hyphens, or underscores. The name becomes a directory
/// and an executable file name, so anything else is rejected.
pub fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[project]
name = "hello"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "hello");
        assert_eq!(config.project.version, "0.1.0");
        assert!(config.build.include_paths.is_empty());
    }

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
[project]
name = "raytracer"
version = "1.2.0"
description = "A toy path tracer"
authors = ["Alice", "Bob"]

[build]
include_paths = ["vendor/include", "third_party"]
cflags = ["-Wall", "-Wextra"]
ldflags = ["-lm"]
jobs = 4
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "raytracer");
        assert_eq!(config.project.version, "1.2.0");
        assert_eq!(config.project.authors.len(), 2);
        assert_eq!(
            config.build.include_paths,
            vec!["vendor/include", "third_party"]
        );
        assert_eq!(config.build.cflags, vec!["-Wall", "-Wextra"]);
        assert_eq!(config.build.ldflags, vec!["-lm"]);
        assert_eq!(config.build.jobs, Some(4));
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn missing_project_section_errors() {
        let toml = r#"
[build]
jobs = 2
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_name_errors() {
        let toml = r#"
[project]
name = "2fast"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_jobs_errors() {
        let toml = r#"
[project]
name = "hello"

[build]
jobs = 0
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let toml = "this is not valid toml {{{}}}";
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn valid_project_names() {
        assert!(is_valid_project_name("hello"));
        assert!(is_valid_project_name("_scratch"));
        assert!(is_valid_project_name("ray-tracer_2"));
        assert!(is_valid_project_name("A"));
    }

    #[test]
    fn invalid_project_names() {
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("2fast"));
        assert!(!is_valid_project_name("-dash"));
        assert!(!is_valid_project_name("has space"));
        assert!(!is_valid_project_name("dot.name"));
        assert!(!is_valid_project_name("sub/dir"));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
