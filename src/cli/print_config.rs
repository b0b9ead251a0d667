//! Print-config command implementation
//!
//! Resolves a single file against the active configuration and prints the
//! effective rules, or the reason the file is not linted.

use crate::cli::args::OutputFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_EXCLUDED, EXIT_SUCCESS, GlobalOptions};
use crate::engine::file_walker::absolute_path;
use crate::error::LintstackError;
use crate::output::human::display_path;
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::Write;
use std::path::Path;

/// Run the print-config command
///
/// # Returns
///
/// Exit code:
/// - 0: the file is linted; its rules were printed
/// - 1: the file is excluded by the configuration
/// - 2: error (configuration, invalid path, I/O)
pub fn run_print_config(
    options: &GlobalOptions,
    file: &Path,
    format: OutputFormat,
    show_off: bool,
) -> i32 {
    match run_print_config_inner(options, file, format, show_off) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_EXCLUDED,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_print_config_inner(
    options: &GlobalOptions,
    file: &Path,
    format: OutputFormat,
    show_off: bool,
) -> Result<bool, LintstackError> {
    let cwd = std::env::current_dir()?;
    let loaded = super::common::load_config(options.config.as_deref(), &cwd)?;
    let resolver = super::common::build_resolver(&loaded)?;

    let target = absolute_path(file, &cwd);
    let resolution = resolver.resolve(&target)?;
    let shown = display_path(&target, Some(&cwd));

    match format {
        OutputFormat::Human => {
            let mut out = super::common::stdout_stream(options.color);
            HumanFormatter::new().write_resolution(&mut out, &shown, &resolution, show_off)?;
        }
        OutputFormat::Jsonl => {
            let output = JsonlFormatter::new().format_resolution(&shown, &resolution, show_off);
            std::io::stdout().write_all(output.as_bytes())?;
        }
    }

    Ok(!resolution.is_excluded())
}
