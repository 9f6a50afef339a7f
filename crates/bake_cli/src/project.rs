//! Project root resolution shared by the `build` and `run` commands.

use bake_config::MANIFEST_NAME;
use std::path::{Path, PathBuf};

/// Walks up from `start` looking for the nearest directory containing
/// `bake.toml`.
///
/// Returns the directory containing the manifest, or an error if none is
/// found up to the filesystem root.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(MANIFEST_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {} in {} or any parent directory",
                MANIFEST_NAME,
                start.display()
            )
            .into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_project_root_in_current_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bake.toml"), "[project]\nname=\"t\"\n").unwrap();
        let root = find_project_root(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_in_parent() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bake.toml"), "[project]\nname=\"t\"\n").unwrap();
        let sub = tmp.path().join("src").join("sub");
        fs::create_dir_all(&sub).unwrap();
        let root = find_project_root(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn find_project_root_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = find_project_root(tmp.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("could not find bake.toml"));
    }
}
