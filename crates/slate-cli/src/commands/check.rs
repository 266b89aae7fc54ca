//! Implementation of the `slate check` command.

use crate::compiler::Compiler;
use anyhow::{Context, Result};
use slate_utils::Config;

/// Executes the `check` command to validate the Slate project without building.
///
/// # Errors
/// Returns an error if the project cannot be validated.
pub fn execute() -> Result<()> {
    let (_config, project_root) =
        Config::find().with_context(|| "Not in a Slate project directory")?;

    let compiler = Compiler::new(project_root)?;
    let _ = compiler.check()?;

    Ok(())
}
