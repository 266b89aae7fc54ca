//! Implementation of the `slate run` command.

use crate::compiler::Compiler;
use anyhow::{Context, Result};
use slate_utils::Config;

/// Executes the `run` command to build and run the Slate project.
///
/// # Errors
/// Returns an error if the project cannot be built or run.
pub fn execute() -> Result<()> {
    use colored::Colorize;

    let (_config, project_root) =
        Config::find().with_context(|| "Not in a Slate project directory")?;

    let compiler = Compiler::new(project_root)?;
    let (module, _duration) = compiler.build()?;

    let artifact = compiler.artifact_path();
    let shown = artifact
        .strip_prefix(compiler.project_root())
        .unwrap_or(&artifact);

    println!("     {} {}", "Running".green().bold(), shown.display());
    println!();

    compiler.execute(&module)?;

    Ok(())
}
