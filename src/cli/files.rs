//! Files command implementation
//!
//! Walks the given paths, resolves every file in parallel, and lists the
//! files that would be linted (optionally the excluded ones too).

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::engine::executor::ExecutionEngine;
use crate::engine::file_walker::discover_files;
use crate::error::LintstackError;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::Write;
use std::path::PathBuf;

/// Run the files command
///
/// Returns 0 on success, 2 on error.
pub fn run_files(
    options: &GlobalOptions,
    paths: &[PathBuf],
    format: OutputFormat,
    all: bool,
) -> i32 {
    match run_files_inner(options, paths, format, all) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_files_inner(
    options: &GlobalOptions,
    paths: &[PathBuf],
    format: OutputFormat,
    all: bool,
) -> Result<(), LintstackError> {
    let cwd = std::env::current_dir()?;
    let loaded = super::common::load_config(options.config.as_deref(), &cwd)?;
    let resolver = super::common::build_resolver(&loaded)?;

    let files = discover_files(paths, &cwd)?;
    let result = ExecutionEngine::new(resolver).execute(files)?;

    match format {
        OutputFormat::Human => {
            let mut out = super::common::stdout_stream(options.color);
            HumanFormatter::new().write_file_reports(&mut out, &result.reports, Some(&cwd), all)?;
        }
        OutputFormat::Jsonl => {
            let output =
                JsonlFormatter::new().format_file_reports(&result.reports, Some(&cwd), all);
            std::io::stdout().write_all(output.as_bytes())?;
        }
    }

    Ok(())
}
