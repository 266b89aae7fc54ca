//! Utility functions and constants shared across the CLI.

use anyhow::{Context, Result};
use colored::Colorize;
use slate_utils::Config;
use std::path::PathBuf;

/// Template for main.slate file in new projects.
pub const MAIN_SLATE_TEMPLATE: &str = r"module main

# Hello, Slate!
var answer = 42
println(answer)
";

/// Finds the Slate project root and config.
///
/// # Errors
/// Returns an error if not in a Slate project directory.
pub fn find_project() -> Result<(Config, PathBuf)> {
    Config::find().with_context(|| "Not in a Slate project directory")
}

/// Returns the artifact file name for a compiled module.
pub fn artifact_name(name: &str) -> String {
    format!("{name}.sir")
}

/// Prints a status message with colored output.
pub fn print_status(status: &str, message: &str) {
    println!("{} {message}", status.green().bold());
}

/// Prints a status message with project info.
pub fn print_project_status(status: &str, config: &Config, path: &std::path::Path) {
    println!(
        "{} {} v{} ({})",
        status.green().bold(),
        config.package.name,
        config.package.version,
        path.display()
    );
}
