//! Error types for the build engine.

use std::path::PathBuf;

/// Errors that can occur while building a project.
///
/// Every variant carries enough context (which file, which stage) for the
/// CLI layer to report a human-readable message. Compile and link failures
/// additionally carry the tool's captured diagnostic output; callers that
/// stream diagnostics through a [`BuildObserver`](crate::BuildObserver)
/// will already have rendered it.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The project has no `src/` directory.
    #[error("source directory '{path}' does not exist")]
    MissingSourceDir {
        /// The expected source directory.
        path: PathBuf,
    },

    /// The source directory contains no recognized compilation units.
    #[error("no source files found in '{path}'")]
    NoSources {
        /// The searched source directory.
        path: PathBuf,
    },

    /// A source or header file could not be read during graph construction.
    ///
    /// Fatal before any compilation starts: a partial dependency graph must
    /// never drive staleness decisions.
    #[error("failed to read '{path}': {source}")]
    SourceRead {
        /// The unreadable file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Two compilation units share a file name and would collide in
    /// `bin/<profile>/`.
    #[error("duplicate unit name '{name}': '{first}' and '{second}' would both produce '{name}.o'")]
    DuplicateUnitName {
        /// The colliding file name.
        name: String,
        /// The first unit with this name.
        first: PathBuf,
        /// The second unit with this name.
        second: PathBuf,
    },

    /// Directory creation or another artifact-tree operation failed.
    #[error("filesystem error at '{path}': {source}")]
    Filesystem {
        /// The path the operation targeted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An external tool could not be started at all.
    #[error("failed to invoke '{tool}': {source}")]
    ToolSpawn {
        /// The command that failed to start.
        tool: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A compiler invocation exited unsuccessfully.
    #[error("failed to compile '{unit}'")]
    Compile {
        /// The compilation unit that failed.
        unit: PathBuf,
        /// The compiler's captured diagnostic output.
        diagnostics: String,
    },

    /// The linker invocation exited unsuccessfully.
    #[error("failed to link '{output}'")]
    Link {
        /// The executable that was being produced.
        output: PathBuf,
        /// The linker's captured diagnostic output.
        diagnostics: String,
    },

    /// The compile worker pool could not be created.
    #[error("failed to create compile worker pool: {reason}")]
    WorkerPool {
        /// Description of the pool creation failure.
        reason: String,
    },
}

impl BuildError {
    /// Returns the captured tool diagnostics for compile/link failures.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            BuildError::Compile { diagnostics, .. } | BuildError::Link { diagnostics, .. } => {
                Some(diagnostics)
            }
            _ => None,
        }
    }
}
