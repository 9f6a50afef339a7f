//! Dependency graph construction from `#include` directives.
//!
//! For every compilation unit under `src/` this module computes the full set
//! of local headers whose modification affects the unit, by lexically
//! scanning include directives and chasing them transitively. Includes that
//! resolve to no local file (system headers) are ignored; they are not
//! staleness triggers.
//!
//! Traversal uses a visited set per compilation unit, so circular or diamond
//! include patterns terminate, and memoizes each file's direct include list
//! so no file is read more than once per build.

use crate::error::BuildError;
use crate::toolchain::Language;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// A compilation unit discovered under `src/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path to the source file.
    pub path: PathBuf,
    /// The unit's language, which selects the compiler driver.
    pub language: Language,
}

/// The include graph of a project: every compilation unit mapped to the
/// transitive closure of local headers it depends on.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    units: Vec<SourceUnit>,
    deps: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl DependencyGraph {
    /// The compilation units, sorted by path.
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    /// The transitive header set of a unit, or `None` for unknown paths.
    pub fn dependencies_of(&self, unit: &Path) -> Option<&BTreeSet<PathBuf>> {
        self.deps.get(unit)
    }

    /// The number of compilation units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns whether the graph has no compilation units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns whether any compilation unit is C++.
    ///
    /// Decides which driver performs the link step.
    pub fn has_cpp(&self) -> bool {
        self.units.iter().any(|u| u.language == Language::Cpp)
    }
}

/// Builds the dependency graph for the sources under `src_dir`.
///
/// `include_paths` is the ordered list of external include directories
/// searched after `src_dir` itself. Fails fast if any source or resolved
/// header cannot be read: a partial graph must never drive staleness
/// decisions. Also rejects units whose file names collide, since object
/// names are derived from basenames.
pub fn build_graph(
    src_dir: &Path,
    include_paths: &[PathBuf],
) -> Result<DependencyGraph, BuildError> {
    if !src_dir.is_dir() {
        return Err(BuildError::MissingSourceDir {
            path: src_dir.to_path_buf(),
        });
    }

    let units = discover_units(src_dir)?;
    check_unique_names(&units)?;

    let mut scanner = IncludeScanner::new(src_dir, include_paths);
    let mut deps = BTreeMap::new();
    for unit in &units {
        let closure = scanner.transitive_headers(&unit.path)?;
        deps.insert(unit.path.clone(), closure);
    }

    Ok(DependencyGraph { units, deps })
}

/// Recursively collects compilation units under `dir`, sorted by path.
fn discover_units(dir: &Path) -> Result<Vec<SourceUnit>, BuildError> {
    let mut units = Vec::new();
    walk_dir(dir, &mut units)?;
    units.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(units)
}

fn walk_dir(dir: &Path, units: &mut Vec<SourceUnit>) -> Result<(), BuildError> {
    let entries = std::fs::read_dir(dir).map_err(|e| BuildError::SourceRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::SourceRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, units)?;
        } else if let Some(language) = Language::from_path(&path) {
            units.push(SourceUnit { path, language });
        }
    }
    Ok(())
}

/// Rejects unit sets where two files share a basename, which would collide
/// in `bin/<profile>/`.
fn check_unique_names(units: &[SourceUnit]) -> Result<(), BuildError> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for unit in units {
        let name = unit
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(first) = seen.insert(name.clone(), &unit.path) {
            return Err(BuildError::DuplicateUnitName {
                name,
                first: first.to_path_buf(),
                second: unit.path.clone(),
            });
        }
    }
    Ok(())
}

/// Chases include directives, memoizing each file's direct include list.
struct IncludeScanner<'a> {
    src_dir: &'a Path,
    include_paths: &'a [PathBuf],
    direct: HashMap<PathBuf, Vec<PathBuf>>,
}

impl<'a> IncludeScanner<'a> {
    fn new(src_dir: &'a Path, include_paths: &'a [PathBuf]) -> Self {
        Self {
            src_dir,
            include_paths,
            direct: HashMap::new(),
        }
    }

    /// Computes the transitive header closure of one file.
    ///
    /// Uses a visited set local to this root, so mutually-including headers
    /// and diamond patterns terminate.
    fn transitive_headers(&mut self, root: &Path) -> Result<BTreeSet<PathBuf>, BuildError> {
        let mut visited = BTreeSet::new();
        let mut pending = self.direct_includes(root)?;
        while let Some(header) = pending.pop() {
            if !visited.insert(header.clone()) {
                continue;
            }
            for dep in self.direct_includes(&header)? {
                if !visited.contains(&dep) {
                    pending.push(dep);
                }
            }
        }
        Ok(visited)
    }

    /// The resolved direct includes of a file, parsed at most once.
    fn direct_includes(&mut self, file: &Path) -> Result<Vec<PathBuf>, BuildError> {
        if let Some(cached) = self.direct.get(file) {
            return Ok(cached.clone());
        }
        let content = std::fs::read_to_string(file).map_err(|e| BuildError::SourceRead {
            path: file.to_path_buf(),
            source: e,
        })?;
        let resolved: Vec<PathBuf> = scan_include_names(&content)
            .iter()
            .filter_map(|name| self.resolve(name))
            .collect();
        self.direct.insert(file.to_path_buf(), resolved.clone());
        Ok(resolved)
    }

    /// Resolves an include name against `src/` first, then the external
    /// include paths in order. Unresolved names (system headers) yield
    /// `None` and are silently ignored.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let local = self.src_dir.join(name);
        if local.is_file() {
            return Some(local);
        }
        for dir in self.include_paths {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

/// Lexically scans C/C++ source text for `#include` directives.
///
/// Returns the referenced names for both the `"..."` and `<...>` forms;
/// resolution decides which are local. No preprocessing is performed, so
/// directives inside disabled conditional blocks or block comments are still
/// reported. That over-approximation can only cause extra rebuilds, never
/// missed ones.
pub fn scan_include_names(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in content.lines() {
        let Some(rest) = line.trim_start().strip_prefix('#') else {
            continue;
        };
        let Some(rest) = rest.trim_start().strip_prefix("include") else {
            continue;
        };
        let rest = rest.trim_start();
        let close = match rest.chars().next() {
            Some('"') => '"',
            Some('<') => '>',
            _ => continue,
        };
        let rest = &rest[1..];
        if let Some(end) = rest.find(close) {
            if end > 0 {
                names.push(rest[..end].to_string());
            }
        }
    }
    names
}
