//! `bake run` — build the project, then execute the result.

use std::process::Command;

use crate::build;
use crate::status::Status;
use crate::{GlobalArgs, RunArgs};

/// Runs the `bake run` command.
///
/// Builds the selected profile, then executes the produced binary with any
/// pass-through arguments, forwarding its exit code.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let status = Status::from_global(global);
    let report = build::execute(args.release, args.jobs, &status)?;

    status.verb("Running", &report.executable.display().to_string());
    let exit = Command::new(&report.executable)
        .args(&args.args)
        .status()
        .map_err(|e| format!("failed to run '{}': {e}", report.executable.display()))?;

    // A signal-terminated child has no code; report failure.
    Ok(exit.code().unwrap_or(1))
}
