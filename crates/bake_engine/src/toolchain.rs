//! Invocation of the external compiler and linker.
//!
//! The engine does not compile anything itself; it shells out to the system
//! toolchain. The C compiler defaults to `cc` and the C++ compiler to `c++`,
//! overridable through the `CC` and `CXX` environment variables, resolved
//! once per invocation of the tool.

use crate::error::BuildError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source language of a compilation unit, detected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// A C translation unit (`.c`).
    C,
    /// A C++ translation unit (`.cc`, `.cxx`, `.cpp`, `.c++`).
    Cpp,
}

impl Language {
    /// Detects the language from a path's extension.
    ///
    /// Returns `None` for anything that is not a recognized compilation
    /// unit; such files are candidate headers.
    pub fn from_path(path: &Path) -> Option<Language> {
        match path.extension()?.to_str()? {
            "c" => Some(Language::C),
            "cc" | "cxx" | "cpp" | "c++" => Some(Language::Cpp),
            _ => None,
        }
    }
}

/// Captured result of one external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the tool exited with status zero.
    pub success: bool,
    /// The tool's diagnostic output (stderr followed by stdout).
    pub diagnostics: String,
}

/// The external compiler/linker pair used for a build.
#[derive(Debug, Clone)]
pub struct Toolchain {
    cc: String,
    cxx: String,
}

impl Toolchain {
    /// Resolves the toolchain from the `CC`/`CXX` environment variables,
    /// falling back to `cc` and `c++`.
    pub fn from_env() -> Self {
        Self {
            cc: std::env::var("CC").unwrap_or_else(|_| "cc".to_string()),
            cxx: std::env::var("CXX").unwrap_or_else(|_| "c++".to_string()),
        }
    }

    /// Creates a toolchain with explicit compiler commands.
    pub fn with_commands(cc: impl Into<String>, cxx: impl Into<String>) -> Self {
        Self {
            cc: cc.into(),
            cxx: cxx.into(),
        }
    }

    /// The driver command for a language.
    pub fn driver(&self, language: Language) -> &str {
        match language {
            Language::C => &self.cc,
            Language::Cpp => &self.cxx,
        }
    }

    /// Compiles one unit to an object file.
    ///
    /// Returns the captured exit status and diagnostics; a non-zero exit is
    /// reported through [`ToolOutput::success`], not as an error. `Err` means
    /// the compiler could not be started at all.
    pub fn compile(
        &self,
        source: &Path,
        object: &Path,
        language: Language,
        flags: &[String],
    ) -> Result<ToolOutput, BuildError> {
        self.invoke(self.driver(language), compile_args(source, object, flags))
    }

    /// Links object files into an executable.
    ///
    /// `language` selects the link driver: the C++ driver must be used when
    /// any C++ unit participates so the C++ runtime is linked in.
    pub fn link(
        &self,
        objects: &[PathBuf],
        executable: &Path,
        language: Language,
        flags: &[String],
    ) -> Result<ToolOutput, BuildError> {
        self.invoke(self.driver(language), link_args(objects, executable, flags))
    }

    fn invoke(&self, tool: &str, args: Vec<OsString>) -> Result<ToolOutput, BuildError> {
        let output = Command::new(tool)
            .args(&args)
            .output()
            .map_err(|e| BuildError::ToolSpawn {
                tool: tool.to_string(),
                source: e,
            })?;

        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !diagnostics.is_empty() {
                diagnostics.push('\n');
            }
            diagnostics.push_str(stdout.trim_end());
        }

        Ok(ToolOutput {
            success: output.status.success(),
            diagnostics,
        })
    }
}

/// Assembles the argument list for a compile invocation:
/// `<flags..> -c <source> -o <object>`.
pub fn compile_args(source: &Path, object: &Path, flags: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = flags.iter().map(OsString::from).collect();
    args.push("-c".into());
    args.push(source.as_os_str().to_os_string());
    args.push("-o".into());
    args.push(object.as_os_str().to_os_string());
    args
}

/// Assembles the argument list for a link invocation:
/// `<objects..> <flags..> -o <executable>`.
pub fn link_args(objects: &[PathBuf], executable: &Path, flags: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = objects.iter().map(|o| o.as_os_str().to_os_string()).collect();
    args.extend(flags.iter().map(OsString::from));
    args.push("-o".into());
    args.push(executable.as_os_str().to_os_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_c_extension() {
        assert_eq!(Language::from_path(Path::new("main.c")), Some(Language::C));
    }

    #[test]
    fn language_from_cpp_extensions() {
        for name in ["a.cc", "a.cxx", "a.cpp", "a.c++"] {
            assert_eq!(
                Language::from_path(Path::new(name)),
                Some(Language::Cpp),
                "{name}"
            );
        }
    }

    #[test]
    fn language_rejects_headers_and_others() {
        assert_eq!(Language::from_path(Path::new("a.h")), None);
        assert_eq!(Language::from_path(Path::new("a.hpp")), None);
        assert_eq!(Language::from_path(Path::new("README")), None);
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn driver_selection() {
        let tc = Toolchain::with_commands("mycc", "mycxx");
        assert_eq!(tc.driver(Language::C), "mycc");
        assert_eq!(tc.driver(Language::Cpp), "mycxx");
    }

    #[test]
    fn compile_args_shape() {
        let flags = vec!["-O0".to_string(), "-g".to_string()];
        let args = compile_args(Path::new("src/main.c"), Path::new("bin/debug/main.c.o"), &flags);
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["-O0", "-g", "-c", "src/main.c", "-o", "bin/debug/main.c.o"]
        );
    }

    #[test]
    fn link_args_shape() {
        let objects = vec![
            PathBuf::from("bin/debug/a.c.o"),
            PathBuf::from("bin/debug/b.c.o"),
        ];
        let flags = vec!["-O0".to_string()];
        let args = link_args(&objects, Path::new("bin/debug/app"), &flags);
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "bin/debug/a.c.o",
                "bin/debug/b.c.o",
                "-O0",
                "-o",
                "bin/debug/app"
            ]
        );
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let tc = Toolchain::with_commands("definitely-not-a-compiler-xyz", "c++");
        let err = tc
            .compile(
                Path::new("a.c"),
                Path::new("a.c.o"),
                Language::C,
                &[],
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::ToolSpawn { .. }));
    }
}
