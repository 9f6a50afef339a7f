//! `bake build` — incremental build of the project in the current directory.
//!
//! Resolves the project root, loads `bake.toml`, and hands off to the build
//! engine. Progress and compiler diagnostics are rendered as they happen;
//! the final report is printed as text or JSON.

use std::path::Path;

use bake_engine::{BuildObserver, BuildOptions, BuildOutcome, BuildReport, Profile, Toolchain};

use crate::project::find_project_root;
use crate::status::Status;
use crate::{BuildArgs, GlobalArgs, ReportFormat};

/// Runs the `bake build` command. Returns exit code 0 on success.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let status = Status::from_global(global);
    let report = execute(args.release, args.jobs, &status)?;

    match args.format {
        ReportFormat::Text => render_text(&report, &status),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(0)
}

/// Builds the project in the current directory and returns the report.
///
/// Shared with `bake run`, which builds before executing.
pub(crate) fn execute(
    release: bool,
    jobs: Option<usize>,
    status: &Status,
) -> Result<BuildReport, Box<dyn std::error::Error>> {
    let root = find_project_root(&std::env::current_dir()?)?;
    let config = bake_config::load_config(&root)?;

    status.verb(
        "Building",
        &format!("{} v{}", config.project.name, config.project.version),
    );

    let profile = if release {
        Profile::Release
    } else {
        Profile::Debug
    };
    let options = BuildOptions { profile, jobs };
    let toolchain = Toolchain::from_env();
    let observer = StatusObserver { status };

    let report = bake_engine::run_build(&config, &root, &options, &toolchain, &observer)?;
    Ok(report)
}

/// Renders the final status line for the text format.
fn render_text(report: &BuildReport, status: &Status) {
    status.verbose_verb("Artifact", &report.executable.display().to_string());
    match report.outcome {
        BuildOutcome::UpToDate => status.verb(
            "Finished",
            &format!("{} profile, nothing to do", report.profile),
        ),
        BuildOutcome::Built => status.verb(
            "Finished",
            &format!(
                "{} profile, compiled {} of {} unit(s)",
                report.profile,
                report.compiled.len(),
                report.total_units
            ),
        ),
    }
}

/// Streams engine progress through the status renderer.
///
/// Tool diagnostics bypass `--quiet`: compiler errors and warnings must
/// reach the user even in quiet mode.
pub(crate) struct StatusObserver<'a> {
    /// The status renderer for this invocation.
    pub status: &'a Status,
}

impl BuildObserver for StatusObserver<'_> {
    fn compiling(&self, unit: &Path) {
        self.status.verb("Compiling", &unit.display().to_string());
    }

    fn linking(&self, executable: &Path) {
        self.status.verb("Linking", &executable.display().to_string());
    }

    fn tool_diagnostics(&self, text: &str) {
        eprintln!("{text}");
    }

    fn warning(&self, message: &str) {
        self.status.warning(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(outcome: BuildOutcome) -> BuildReport {
        BuildReport {
            outcome,
            profile: Profile::Debug,
            total_units: 3,
            compiled: match outcome {
                BuildOutcome::UpToDate => Vec::new(),
                BuildOutcome::Built => vec![PathBuf::from("src/a.c")],
            },
            linked: outcome == BuildOutcome::Built,
            executable: PathBuf::from("bin/debug/app"),
        }
    }

    #[test]
    fn render_text_does_not_panic() {
        let status = Status {
            quiet: false,
            verbose: true,
            color: false,
        };
        render_text(&report(BuildOutcome::UpToDate), &status);
        render_text(&report(BuildOutcome::Built), &status);
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_string_pretty(&report(BuildOutcome::Built)).unwrap();
        assert!(json.contains("\"outcome\": \"built\""));
        assert!(json.contains("src/a.c"));

        let json = serde_json::to_string_pretty(&report(BuildOutcome::UpToDate)).unwrap();
        assert!(json.contains("\"outcome\": \"up-to-date\""));
    }
}
