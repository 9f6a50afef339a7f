//! The bake incremental build engine.
//!
//! Given a project layout (`src/` sources, `bin/<profile>/` artifacts) this
//! crate decides which compilation units must be recompiled and whether the
//! executable must be relinked, then drives the external compiler and linker
//! to do exactly that work and no more.
//!
//! The pipeline is a fixed two-stage shape: a fan-out of independent compile
//! invocations joined by a single link invocation. Staleness is rederived
//! from filesystem modification times on every build; no build database is
//! persisted between runs.

#![warn(missing_docs)]

pub mod build;
pub mod error;
pub mod fsmeta;
pub mod graph;
pub mod layout;
pub mod profile;
pub mod stale;
pub mod toolchain;

pub use build::{run_build, BuildObserver, BuildOptions, BuildOutcome, BuildReport, SilentObserver};
pub use error::BuildError;
pub use fsmeta::FsSnapshot;
pub use graph::{build_graph, DependencyGraph, SourceUnit};
pub use layout::Layout;
pub use profile::Profile;
pub use stale::{evaluate, Evaluation};
pub use toolchain::{Language, ToolOutput, Toolchain};
