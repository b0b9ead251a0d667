//! Common helper functions shared across CLI commands
//!
//! Loading the configuration (explicit, discovered, or the built-in
//! default), building the resolver, and setting up colored output.

use crate::cli::args::ColorChoice;
use crate::config::{BundleRegistry, Config, discover};
use crate::engine::file_walker::absolute_path;
use crate::engine::resolver::Resolver;
use crate::error::ConfigError;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_EXCLUDED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Options that apply to every command
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub color: ColorChoice,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::BuiltinDefault => write!(f, "built-in default configuration"),
        }
    }
}

/// A parsed configuration and the directory its patterns are relative to
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub base_dir: PathBuf,
}

/// Load the configuration
///
/// An explicit path must exist. Otherwise the nearest lintstack.toml (or
/// lintstack.json) at or above `cwd` is used, and failing that the built-in
/// default, with `cwd` as its base directory.
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit file is missing or unreadable,
/// and any parse or validation error from the file.
pub(crate) fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(path) => {
            let path = absolute_path(path, cwd);
            if !path.is_file() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("configuration file not found: {}", path.display()),
                )));
            }
            Some(path)
        }
        None => discover(cwd),
    };

    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading configuration");
            let config = Config::load(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf());
            Ok(LoadedConfig {
                config,
                source: ConfigSource::File(path),
                base_dir,
            })
        }
        None => {
            tracing::warn!("no lintstack.toml found; using the built-in default configuration");
            Ok(LoadedConfig {
                config: Config::builtin_default()?,
                source: ConfigSource::BuiltinDefault,
                base_dir: cwd.to_path_buf(),
            })
        }
    }
}

/// Build the resolver for a loaded configuration, with the built-in bundles
pub(crate) fn build_resolver(loaded: &LoadedConfig) -> Result<Resolver, ConfigError> {
    let bundles = BundleRegistry::builtin()?;
    loaded
        .config
        .build_resolver(&bundles, Some(&loaded.base_dir))
}

/// Open stdout with the requested coloring
pub(crate) fn stdout_stream(choice: ColorChoice) -> StandardStream {
    let choice = match choice {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto => {
            if std::io::stdout().is_terminal() {
                termcolor::ColorChoice::Auto
            } else {
                termcolor::ColorChoice::Never
            }
        }
    };
    StandardStream::stdout(choice)
}
