//! Compiler pipeline implementation.
//!
//! Pipeline: Source → Lexer → Parser → AST → Lowering → SIR

use crate::pipeline;
use crate::utils::{artifact_name, print_project_status};
use anyhow::{Context, Result};
use slate_ir::{ExecutionEngine, Module};
use slate_utils::Config;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Compiler for Slate programs.
pub struct Compiler {
    project_root: PathBuf,
    config: Config,
}

impl Compiler {
    /// Creates a new compiler for the given project.
    ///
    /// # Errors
    /// Returns an error if the project configuration cannot be loaded.
    pub fn new(project_root: PathBuf) -> Result<Self> {
        let config = Config::load(project_root.join("slate.toml"))?;
        Ok(Self {
            project_root,
            config,
        })
    }

    /// Compiles the Slate project to a SIR module and writes the textual
    /// artifact to the target directory.
    ///
    /// # Errors
    /// Returns an error if compilation fails at any stage.
    pub fn build(&self) -> Result<(Module, Duration)> {
        let start = Instant::now();

        print_project_status("Compiling", &self.config, &self.project_root);

        let source = self.read_main_source()?;
        let module = pipeline::build_pipeline(&source)?;

        self.save_module_text(&module)?;

        let duration = start.elapsed();
        self.print_build_success(duration);

        Ok((module, duration))
    }

    /// Checks the project for errors without building.
    ///
    /// # Errors
    /// Returns an error if the project contains errors.
    pub fn check(&self) -> Result<Duration> {
        let start = Instant::now();

        print_project_status("Checking", &self.config, &self.project_root);

        let source = self.read_main_source()?;
        pipeline::check_pipeline(&source)?;

        let duration = start.elapsed();
        self.print_check_success(duration);

        Ok(duration)
    }

    /// Executes a compiled module in-process, streaming program output
    /// to stdout.
    ///
    /// # Errors
    /// Returns an error if the entry function is missing or execution
    /// fails at run time.
    pub fn execute(&self, module: &Module) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        ExecutionEngine::new(module, &mut out).run_entry()?;
        out.flush().with_context(|| "Failed to flush program output")?;
        Ok(())
    }

    /// Returns the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the path the compiled SIR artifact is written to.
    pub fn artifact_path(&self) -> PathBuf {
        self.project_root
            .join("target")
            .join(artifact_name(&self.config.package.name))
    }

    /// Reads the main source file.
    fn read_main_source(&self) -> Result<String> {
        let source_path = self.project_root.join("src/main.slate");
        fs::read_to_string(&source_path)
            .with_context(|| format!("Failed to read {}", source_path.display()))
    }

    /// Saves the module's textual form to the target directory.
    fn save_module_text(&self, module: &Module) -> Result<()> {
        let target_dir = self.project_root.join("target");
        fs::create_dir_all(&target_dir).with_context(|| "Failed to create target directory")?;

        module
            .write_to_file(self.artifact_path())
            .with_context(|| "Failed to save compiled SIR module")?;

        Ok(())
    }

    /// Prints build success message.
    fn print_build_success(&self, duration: Duration) {
        use colored::Colorize;
        println!(
            "    {} project built successfully in {:.2}s",
            "Finished".green().bold(),
            duration.as_secs_f64()
        );
    }

    /// Prints check success message.
    fn print_check_success(&self, duration: Duration) {
        use colored::Colorize;
        println!(
            "    {} project checked successfully in {:.2}s",
            "Finished".green().bold(),
            duration.as_secs_f64()
        );
    }
}
