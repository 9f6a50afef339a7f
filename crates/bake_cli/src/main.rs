//! Bake CLI — the command-line interface for the bake build tool.
//!
//! Provides `bake new` for project scaffolding, `bake build` for incremental
//! builds of the project in the current directory, and `bake run` for
//! building and executing the result.

#![warn(missing_docs)]

mod build;
mod new;
mod project;
mod run;
mod status;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Bake — an incremental build orchestrator for C and C++ projects.
#[derive(Parser, Debug)]
#[command(name = "bake", version, about = "A build orchestrator for C/C++ projects")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print extra build information.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new bake project.
    New {
        /// Project name (creates a subdirectory).
        name: String,
    },
    /// Build the project in the current directory.
    Build(BuildArgs),
    /// Build and run the project in the current directory.
    Run(RunArgs),
}

/// Arguments for the `bake build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Build with optimizations into `bin/release/`.
    #[arg(short, long)]
    pub release: bool,

    /// Number of parallel compile workers.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Output format for the build report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `bake run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Build with optimizations and run the release executable.
    #[arg(short, long)]
    pub release: bool,

    /// Number of parallel compile workers.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Arguments passed through to the executable.
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Build report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print extra build information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => stderr_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
    };

    let result = match cli.command {
        Command::New { ref name } => new::run(name, &global),
        Command::Build(ref args) => build::run(args, &global),
        Command::Run(ref args) => run::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection for the `auto` color choice.
///
/// Honors the `NO_COLOR` convention and otherwise checks the TERM env var;
/// good enough without pulling in a terminal-detection crate.
fn stderr_is_terminal() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new() {
        let cli = Cli::parse_from(["bake", "new", "my_project"]);
        match cli.command {
            Command::New { name } => assert_eq!(name, "my_project"),
            _ => panic!("expected New command"),
        }
    }

    #[test]
    fn parse_build_default() {
        let cli = Cli::parse_from(["bake", "build"]);
        match cli.command {
            Command::Build(ref args) => {
                assert!(!args.release);
                assert!(args.jobs.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_release() {
        let cli = Cli::parse_from(["bake", "build", "--release"]);
        match cli.command {
            Command::Build(ref args) => assert!(args.release),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_jobs() {
        let cli = Cli::parse_from(["bake", "build", "--jobs", "4"]);
        match cli.command {
            Command::Build(ref args) => assert_eq!(args.jobs, Some(4)),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_json_format() {
        let cli = Cli::parse_from(["bake", "build", "--format", "json"]);
        match cli.command {
            Command::Build(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_run_with_passthrough_args() {
        let cli = Cli::parse_from(["bake", "run", "--release", "--", "input.txt", "-x"]);
        match cli.command {
            Command::Run(ref args) => {
                assert!(args.release);
                assert_eq!(args.args, vec!["input.txt", "-x"]);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["bake", "--quiet", "--color", "never", "build"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["bake", "--verbose", "build"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_color_always() {
        let cli = Cli::parse_from(["bake", "--color", "always", "build"]);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["bake", "build", "-r", "-j", "2"]);
        match cli.command {
            Command::Build(ref args) => {
                assert!(args.release);
                assert_eq!(args.jobs, Some(2));
            }
            _ => panic!("expected Build command"),
        }
    }
}
