//! Validate command implementation

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::error::LintstackError;

/// Summary of a valid configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub source: String,
    /// Layers after bundles are expanded
    pub layers: usize,
    pub global_ignores: usize,
}

/// Run the validate command
///
/// Returns 0 if the configuration loads and builds, 2 otherwise.
pub fn run_validate(options: &GlobalOptions) -> i32 {
    match validate(options) {
        Ok(summary) => {
            println!(
                "Configuration OK: {} ({} layers, {} global ignores)",
                summary.source, summary.layers, summary.global_ignores
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Loads the configuration and builds its resolver
pub fn validate(options: &GlobalOptions) -> Result<ValidationSummary, LintstackError> {
    let cwd = std::env::current_dir()?;
    let loaded = super::common::load_config(options.config.as_deref(), &cwd)?;
    let resolver = super::common::build_resolver(&loaded)?;

    let global_ignores = resolver
        .fragments()
        .iter()
        .filter(|f| f.is_global_ignore())
        .count();

    Ok(ValidationSummary {
        source: loaded.source.to_string(),
        layers: resolver.fragments().len(),
        global_ignores,
    })
}
