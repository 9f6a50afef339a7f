//! The build orchestrator.
//!
//! Drives a full build for one profile:
//! 1. Build the include graph from `src/`
//! 2. Capture filesystem timestamps
//! 3. Evaluate staleness
//! 4. Ensure `bin/<profile>/` exists
//! 5. Compile stale units on a bounded worker pool
//! 6. Link if required
//!
//! Compilation units are independent, so stale units compile in parallel.
//! After a compile failure no new compilations are scheduled; units already
//! in flight drain to completion (their objects are individually correct and
//! reused next run) and the build fails without linking. A failed build
//! never updates the executable artifact.

use crate::error::BuildError;
use crate::fsmeta::{self, FsSnapshot};
use crate::graph::{build_graph, DependencyGraph};
use crate::layout::Layout;
use crate::profile::Profile;
use crate::stale;
use crate::toolchain::{Language, ToolOutput, Toolchain};
use bake_config::ProjectConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Options controlling a single build invocation.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// The profile to build.
    pub profile: Profile,
    /// Worker-count override from the command line. Falls back to the
    /// manifest's `build.jobs`, then to available parallelism.
    pub jobs: Option<usize>,
}

/// Distinguishes a build that did work from one with nothing to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildOutcome {
    /// Every artifact was already current; no tool was invoked.
    UpToDate,
    /// At least the link step ran.
    Built,
}

/// Summary of a completed (successful) build.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    /// Whether any work was performed.
    pub outcome: BuildOutcome,
    /// The profile that was built.
    pub profile: Profile,
    /// Total number of compilation units in the project.
    pub total_units: usize,
    /// Units recompiled by this build, in deterministic (sorted) order.
    pub compiled: Vec<PathBuf>,
    /// Whether the link step ran.
    pub linked: bool,
    /// The executable artifact path.
    pub executable: PathBuf,
}

/// Receives progress notifications during a build.
///
/// The engine performs no output of its own; callers inject an observer to
/// render progress. Compile notifications arrive from worker threads, so
/// implementations must be `Sync`. Default method bodies ignore everything.
pub trait BuildObserver: Sync {
    /// A unit's compilation is starting.
    fn compiling(&self, _unit: &Path) {}
    /// The link step is starting.
    fn linking(&self, _executable: &Path) {}
    /// An external tool produced diagnostic output (warnings or errors).
    fn tool_diagnostics(&self, _text: &str) {}
    /// A non-fatal condition worth reporting (e.g. an orphaned object).
    fn warning(&self, _message: &str) {}
}

/// An observer that ignores every notification.
pub struct SilentObserver;

impl BuildObserver for SilentObserver {}

/// Executes a full build of the project rooted at `root`.
///
/// Returns a report on success. On failure the executable artifact is left
/// untouched; objects from compilations that succeeded before the failure
/// are kept for reuse.
pub fn run_build(
    config: &ProjectConfig,
    root: &Path,
    options: &BuildOptions,
    toolchain: &Toolchain,
    observer: &dyn BuildObserver,
) -> Result<BuildReport, BuildError> {
    let layout = Layout::new(root);
    let profile = options.profile;
    let project_name = config.project.name.as_str();

    // Step 1: build the include graph.
    let include_paths: Vec<PathBuf> = config
        .build
        .include_paths
        .iter()
        .map(|p| root.join(p))
        .collect();
    let graph = build_graph(&layout.src_dir(), &include_paths)?;
    if graph.is_empty() {
        return Err(BuildError::NoSources {
            path: layout.src_dir(),
        });
    }

    // Step 2: capture filesystem timestamps.
    let snapshot = capture_snapshot(&graph, &layout, project_name, profile);

    // Step 3: evaluate staleness.
    let evaluation = stale::evaluate(&graph, &layout, project_name, profile, &snapshot);

    warn_orphans(&graph, &layout, profile, observer);

    let executable = layout.executable_path(project_name, profile);
    if evaluation.is_up_to_date() {
        return Ok(BuildReport {
            outcome: BuildOutcome::UpToDate,
            profile,
            total_units: graph.len(),
            compiled: Vec::new(),
            linked: false,
            executable,
        });
    }

    // Step 4: ensure the artifact directory exists.
    fsmeta::ensure_dir(&layout.bin_dir(profile))?;

    // Step 5: compile stale units in parallel.
    let jobs = worker_count(options, config);
    let compiled = compile_stale(
        &evaluation.stale,
        &layout,
        config,
        profile,
        toolchain,
        jobs,
        observer,
    )?;

    // Step 6: link all objects into the executable.
    observer.linking(&executable);
    let objects: Vec<PathBuf> = graph
        .units()
        .iter()
        .map(|u| layout.object_path(&u.path, profile))
        .collect();
    let link_language = if graph.has_cpp() {
        Language::Cpp
    } else {
        Language::C
    };
    let mut ldflags = vec![profile.opt_flag().to_string()];
    ldflags.extend(config.build.ldflags.iter().cloned());
    let output = toolchain.link(&objects, &executable, link_language, &ldflags)?;
    if !output.diagnostics.is_empty() {
        observer.tool_diagnostics(&output.diagnostics);
    }
    if !output.success {
        return Err(BuildError::Link {
            output: executable,
            diagnostics: output.diagnostics,
        });
    }

    Ok(BuildReport {
        outcome: BuildOutcome::Built,
        profile,
        total_units: graph.len(),
        compiled,
        linked: true,
        executable,
    })
}

/// Resolves the compile worker count: `--jobs`, then the manifest, then
/// available parallelism.
fn worker_count(options: &BuildOptions, config: &ProjectConfig) -> usize {
    options
        .jobs
        .or(config.build.jobs)
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1)
}

/// Captures every timestamp staleness evaluation will consult: sources,
/// their transitive headers, objects, and the executable.
fn capture_snapshot(
    graph: &DependencyGraph,
    layout: &Layout,
    project_name: &str,
    profile: Profile,
) -> FsSnapshot {
    let mut snapshot = FsSnapshot::new();
    for unit in graph.units() {
        snapshot.record(&unit.path);
        snapshot.record(&layout.object_path(&unit.path, profile));
        if let Some(headers) = graph.dependencies_of(&unit.path) {
            for header in headers {
                snapshot.record(header);
            }
        }
    }
    snapshot.record(&layout.executable_path(project_name, profile));
    snapshot
}

/// Reports objects in `bin/<profile>/` with no surviving source. They are
/// excluded from the link set and never deleted.
fn warn_orphans(
    graph: &DependencyGraph,
    layout: &Layout,
    profile: Profile,
    observer: &dyn BuildObserver,
) {
    let expected: BTreeSet<PathBuf> = graph
        .units()
        .iter()
        .map(|u| layout.object_path(&u.path, profile))
        .collect();
    for file in fsmeta::list_files(&layout.bin_dir(profile)) {
        let is_object = file.extension().is_some_and(|ext| ext == "o");
        if is_object && !expected.contains(&file) {
            observer.warning(&format!(
                "orphaned object '{}' has no matching source; excluded from the link",
                file.display()
            ));
        }
    }
}

/// Compiles the stale units on a pool of `jobs` workers.
///
/// The first failure sets a latch that stops new units from being scheduled;
/// units already running finish and keep their objects. Results are
/// inspected in deterministic order, so the reported failure is stable.
fn compile_stale(
    stale: &[PathBuf],
    layout: &Layout,
    config: &ProjectConfig,
    profile: Profile,
    toolchain: &Toolchain,
    jobs: usize,
    observer: &dyn BuildObserver,
) -> Result<Vec<PathBuf>, BuildError> {
    if stale.is_empty() {
        return Ok(Vec::new());
    }

    let mut cflags: Vec<String> = profile.cflags().iter().map(|s| s.to_string()).collect();
    cflags.extend(config.build.cflags.iter().cloned());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| BuildError::WorkerPool {
            reason: e.to_string(),
        })?;

    let failed = AtomicBool::new(false);
    let results: Vec<(PathBuf, Result<ToolOutput, BuildError>)> = pool.install(|| {
        stale
            .par_iter()
            .filter_map(|unit| {
                if failed.load(Ordering::SeqCst) {
                    return None;
                }
                observer.compiling(unit);
                let language = Language::from_path(unit).unwrap_or(Language::C);
                let object = layout.object_path(unit, profile);
                let result = toolchain.compile(unit, &object, language, &cflags);
                if !matches!(&result, Ok(output) if output.success) {
                    failed.store(true, Ordering::SeqCst);
                }
                Some((unit.clone(), result))
            })
            .collect()
    });

    let mut compiled = Vec::new();
    for (unit, result) in results {
        let output = result?;
        if !output.diagnostics.is_empty() {
            observer.tool_diagnostics(&output.diagnostics);
        }
        if !output.success {
            return Err(BuildError::Compile {
                unit,
                diagnostics: output.diagnostics,
            });
        }
        compiled.push(unit);
    }
    Ok(compiled)
}
