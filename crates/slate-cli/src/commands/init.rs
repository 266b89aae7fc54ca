//! Implementation of the `slate init` command.

use anyhow::{Context, Result};
use slate_utils::Config;
use std::fs;
use std::path::Path;

const MAIN_SLATE_TEMPLATE: &str = r"module main

# Hello, Slate!
var answer = 42
println(answer)
";

/// Executes the `init` command to initialize a Slate project in the current directory.
///
/// # Errors
/// Returns an error if slate.toml already exists or if files cannot be created.
pub fn execute() -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

    // Check if slate.toml already exists
    if Path::new("slate.toml").exists() {
        anyhow::bail!("slate.toml already exists in current directory");
    }

    // Get project name from directory name
    let project_name = current_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("slate-project");

    // Create src directory if it doesn't exist
    fs::create_dir_all("src").with_context(|| "Failed to create src directory")?;

    // Create slate.toml
    let config = Config::new(project_name);
    config.save("slate.toml")?;

    // Create src/main.slate if it doesn't exist
    let main_path = Path::new("src/main.slate");
    if !main_path.exists() {
        fs::write(main_path, MAIN_SLATE_TEMPLATE)
            .with_context(|| "Failed to create src/main.slate")?;
    }

    use colored::Colorize;

    println!(
        "     {} Slate project '{}'",
        "Created".green().bold(),
        project_name
    );
    println!();
    println!("To get started:");
    println!("  slate run");

    Ok(())
}
