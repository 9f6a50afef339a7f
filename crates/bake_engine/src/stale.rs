//! Staleness evaluation: which units must recompile, and must we relink.
//!
//! Evaluation is a pure function of the dependency graph and a captured
//! [`FsSnapshot`]; given the same filesystem state it always produces the
//! same answer. Comparisons use strict "older than" semantics: an object
//! whose timestamp equals its source's is fresh. On filesystems with coarse
//! timestamps (1-second granularity is the supported minimum) this means an
//! edit landing in the same second as the previous compile is not picked up
//! until the clock advances.

use crate::fsmeta::FsSnapshot;
use crate::graph::DependencyGraph;
use crate::layout::Layout;
use crate::profile::Profile;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The result of staleness evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Stale unit paths, in graph (sorted) order.
    pub stale: Vec<PathBuf>,
    /// Whether the link step must run.
    pub link_required: bool,
}

impl Evaluation {
    /// Returns whether there is nothing to do at all.
    pub fn is_up_to_date(&self) -> bool {
        self.stale.is_empty() && !self.link_required
    }
}

/// Classifies every unit as stale or fresh and decides whether linking is
/// required.
///
/// The link step is required if any unit will be recompiled, the executable
/// artifact is absent, or the executable is older than any existing object
/// (covering objects replaced outside of bake).
pub fn evaluate(
    graph: &DependencyGraph,
    layout: &Layout,
    project_name: &str,
    profile: Profile,
    fs: &FsSnapshot,
) -> Evaluation {
    let empty = BTreeSet::new();
    let stale: Vec<PathBuf> = graph
        .units()
        .iter()
        .filter(|unit| {
            let object = layout.object_path(&unit.path, profile);
            let headers = graph.dependencies_of(&unit.path).unwrap_or(&empty);
            unit_is_stale(&unit.path, headers, &object, fs)
        })
        .map(|unit| unit.path.clone())
        .collect();

    let executable = layout.executable_path(project_name, profile);
    let link_required = !stale.is_empty()
        || match fs.mtime(&executable) {
            None => true,
            Some(exe_time) => graph.units().iter().any(|unit| {
                fs.mtime(&layout.object_path(&unit.path, profile))
                    .is_some_and(|t| t > exe_time)
            }),
        };

    Evaluation {
        stale,
        link_required,
    }
}

/// Decides whether one compilation unit is stale.
///
/// A unit is stale if its object is absent, or strictly older than the
/// source, or strictly older than any header in the unit's transitive
/// dependency set. A header with no captured timestamp (deleted between
/// graph construction and snapshot capture) is treated as newer,
/// conservatively forcing a rebuild.
pub fn unit_is_stale(
    unit: &Path,
    headers: &BTreeSet<PathBuf>,
    object: &Path,
    fs: &FsSnapshot,
) -> bool {
    let Some(object_time) = fs.mtime(object) else {
        return true;
    };
    match fs.mtime(unit) {
        None => return true,
        Some(source_time) if source_time > object_time => return true,
        Some(_) => {}
    }
    headers
        .iter()
        .any(|header| match fs.mtime(header) {
            None => true,
            Some(t) => t > object_time,
        })
}
