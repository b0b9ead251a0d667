//! Initialize a lintstack project
//!
//! Writes the built-in default configuration to `lintstack.toml`.

use crate::config::lintstack_toml::DEFAULT_CONFIG;
use std::fs;
use std::path::Path;

/// Name of the file written by `init`
pub const CONFIG_FILE: &str = "lintstack.toml";

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What `init` did with the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    /// The file existed and `--force` was not given
    Skipped,
    Overwritten,
}

/// Run the init command in the current directory
pub fn run_init(force: bool) -> Result<InitOutcome, InitError> {
    let cwd = std::env::current_dir()?;
    init_in(&cwd, force)
}

/// Write the default configuration into `dir`
pub fn init_in(dir: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let path = dir.join(CONFIG_FILE);
    let existed = path.exists();

    if existed && !force {
        return Ok(InitOutcome::Skipped);
    }

    fs::write(&path, DEFAULT_CONFIG)?;
    tracing::debug!(path = %path.display(), "wrote default configuration");

    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}
