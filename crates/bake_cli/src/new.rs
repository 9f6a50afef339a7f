//! `bake new` — project scaffolding command.
//!
//! Creates a new project directory with a `bake.toml` manifest, a `src/`
//! directory holding a hello-world `main.c`, and a `.gitignore` covering the
//! artifact tree.

use std::fs;
use std::io;
use std::path::Path;

use crate::status::Status;
use crate::GlobalArgs;

/// Template for the generated `src/main.c`.
const DEFAULT_MAIN_C: &str = "#include <stdio.h>\n\nint main(int argc, char *argv[]) {\n    puts(\"Hello World\");\n    return 0;\n}\n";

/// Runs the `bake new` command.
///
/// Creates `<cwd>/<name>` with the standard project skeleton. Fails if the
/// name is invalid or the directory already exists. Returns exit code 0 on
/// success.
pub fn run(name: &str, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !bake_config::is_valid_project_name(name) {
        return Err(format!("'{name}' is not a valid project name").into());
    }

    let project_dir = std::env::current_dir()?.join(name);
    if project_dir.exists() {
        return Err(format!("directory '{name}' already exists").into());
    }

    scaffold(&project_dir, name)?;

    let status = Status::from_global(global);
    status.verb("Creating", &format!("bake project `{name}`"));
    status.verb(
        "Created",
        &project_dir.join("bake.toml").display().to_string(),
    );
    status.verb(
        "Created",
        &project_dir.join("src").join("main.c").display().to_string(),
    );

    Ok(0)
}

/// Writes the project skeleton into `project_dir`.
fn scaffold(project_dir: &Path, name: &str) -> io::Result<()> {
    fs::create_dir_all(project_dir.join("src"))?;
    fs::write(project_dir.join("bake.toml"), manifest_template(name))?;
    fs::write(project_dir.join("src").join("main.c"), DEFAULT_MAIN_C)?;
    fs::write(project_dir.join(".gitignore"), "bin/\n")?;
    Ok(())
}

/// Renders the `bake.toml` template for a new project.
fn manifest_template(name: &str) -> String {
    format!(
        r#"[project]
name = "{name}"
version = "0.1.0"
"#
    )
}
