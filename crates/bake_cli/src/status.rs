//! Aligned, optionally colored status output on stderr.

use crate::GlobalArgs;

/// Renders status verbs (`Compiling`, `Linking`, ...) the way cargo does:
/// right-aligned, bold green when color is enabled, suppressed by `--quiet`.
pub struct Status {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print extra build information.
    pub verbose: bool,
    /// Whether to use ANSI colors.
    pub color: bool,
}

impl Status {
    /// Creates a status renderer from the global CLI flags.
    pub fn from_global(global: &GlobalArgs) -> Self {
        Self {
            quiet: global.quiet,
            verbose: global.verbose,
            color: global.color,
        }
    }

    /// Prints an aligned status verb followed by a message.
    pub fn verb(&self, verb: &str, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("\x1b[1;32m{verb:>12}\x1b[0m {message}");
        } else {
            eprintln!("{verb:>12} {message}");
        }
    }

    /// Prints a warning line.
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("\x1b[1;33mwarning:\x1b[0m {message}");
        } else {
            eprintln!("warning: {message}");
        }
    }

    /// Prints a status verb only when `--verbose` is set.
    pub fn verbose_verb(&self, verb: &str, message: &str) {
        if self.verbose {
            self.verb(verb, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Status {
        Status {
            quiet: false,
            verbose: false,
            color: false,
        }
    }

    #[test]
    fn from_global_copies_flags() {
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: true,
        };
        let status = Status::from_global(&global);
        assert!(status.quiet);
        assert!(!status.verbose);
        assert!(status.color);
    }

    #[test]
    fn verb_does_not_panic() {
        // Output goes to stderr; just exercise both color paths.
        plain().verb("Compiling", "src/main.c");
        let colored = Status {
            color: true,
            ..plain()
        };
        colored.verb("Linking", "bin/debug/app");
        colored.warning("orphaned object");
    }
}
