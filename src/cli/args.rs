//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for lintstack commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// lintstack CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "lintstack")]
#[command(about = "Resolve layered lint configuration for the files in a project")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to the nearest lintstack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available lintstack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default lintstack.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective rules for one file
    PrintConfig {
        /// File to resolve (need not exist)
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Also list rules that are switched off
        #[arg(long)]
        show_off: bool,
    },

    /// List the files that would be linted
    Files {
        /// Paths to walk (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Also list excluded files and why
        #[arg(long)]
        all: bool,
    },

    /// Load and validate the configuration
    Validate,
}
