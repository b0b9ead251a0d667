//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod files;
pub mod init;
pub mod print_config;
pub mod validate;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use common::GlobalOptions;
