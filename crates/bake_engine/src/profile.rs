//! Build profiles: debug and release.

use serde::Serialize;
use std::fmt;

/// A named build configuration producing an isolated output tree.
///
/// The profile selects the `bin/<profile>/` subdirectory and the
/// optimization flags passed to the compiler. The two profiles never share
/// artifacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Unoptimized build with debug info (`-O0 -g`). The default.
    #[default]
    Debug,
    /// Optimized build (`-O3 -g`).
    Release,
}

impl Profile {
    /// The output subdirectory name under `bin/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Profile::Debug => "debug",
            Profile::Release => "release",
        }
    }

    /// Compiler flags implied by this profile.
    ///
    /// Debug info is emitted in both profiles so release binaries stay
    /// debuggable.
    pub fn cflags(self) -> &'static [&'static str] {
        match self {
            Profile::Debug => &["-O0", "-g"],
            Profile::Release => &["-O3", "-g"],
        }
    }

    /// The optimization flag alone, forwarded to the link step.
    pub fn opt_flag(self) -> &'static str {
        match self {
            Profile::Debug => "-O0",
            Profile::Release => "-O3",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
