//! Error types for lintstack
//!
//! Configuration problems are reported when fragments are built, never when
//! they are matched. Resolution itself only fails on a malformed input path.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    /// A rule identifier is not well formed
    #[error("Invalid rule ID '{0}'")]
    InvalidRuleId(String),

    /// A rule value is neither a severity nor a `[severity, ...options]` list
    #[error("Invalid value for rule '{rule}': {message}")]
    InvalidRuleValue { rule: String, message: String },

    /// `extends` names a bundle that is not registered
    #[error("Unknown bundle '{0}'")]
    UnknownBundle(String),

    /// Semantic validation failure
    #[error("{0}")]
    Validation(String),

    /// TOML syntax or shape error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// JSON syntax or shape error
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving a file
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The path handed to `resolve` is not a usable file path
    #[error("Invalid input path '{path}': {reason}")]
    InvalidInput { path: PathBuf, reason: String },
}

/// Top-level error type for lintstack
#[derive(Debug, thiserror::Error)]
pub enum LintstackError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolution error
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// File walking error
    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::file_walker::FileWalkerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
