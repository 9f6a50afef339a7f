//! Mapping from project structure to the `bin/<profile>/` artifact tree.
//!
//! Pure path construction; nothing here touches the filesystem. Object files
//! keep their source file name with `.o` appended (`main.c` becomes
//! `main.c.o`), which keeps a unit's language visible in the artifact tree.

use crate::profile::Profile;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The directory layout of a bake project.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Creates a layout rooted at the given project directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The source directory: `<root>/src`.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// The artifact directory for a profile: `<root>/bin/<profile>`.
    ///
    /// Created on demand by the orchestrator; never assumed to pre-exist.
    pub fn bin_dir(&self, profile: Profile) -> PathBuf {
        self.root.join("bin").join(profile.dir_name())
    }

    /// The object artifact path for a compilation unit:
    /// `bin/<profile>/<file name>.o`.
    pub fn object_path(&self, source: &Path, profile: Profile) -> PathBuf {
        let mut name: OsString = source.file_name().unwrap_or_default().to_os_string();
        name.push(".o");
        self.bin_dir(profile).join(name)
    }

    /// The executable artifact path: `bin/<profile>/<project name>`.
    pub fn executable_path(&self, project_name: &str, profile: Profile) -> PathBuf {
        self.bin_dir(profile).join(project_name)
    }
}
