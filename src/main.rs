//! lintstack CLI entry point

use clap::Parser;
use lintstack::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use lintstack::cli::init::InitOutcome;
use lintstack::cli::{Command, GlobalOptions, args::Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    lintstack::init_tracing(cli.verbose);

    let options = GlobalOptions {
        config: cli.config,
        color: cli.color,
    };

    let exit_code = match cli.command {
        Command::Init { force } => match lintstack::cli::init::run_init(force) {
            Ok(InitOutcome::Created) => {
                println!("Created lintstack.toml.");
                EXIT_SUCCESS
            }
            Ok(InitOutcome::Overwritten) => {
                println!("Overwrote lintstack.toml with the default configuration.");
                EXIT_SUCCESS
            }
            Ok(InitOutcome::Skipped) => {
                println!("lintstack.toml already exists; use --force to overwrite it.");
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::PrintConfig {
            file,
            format,
            show_off,
        } => lintstack::cli::print_config::run_print_config(&options, &file, format, show_off),
        Command::Files { paths, format, all } => {
            lintstack::cli::files::run_files(&options, &paths, format, all)
        }
        Command::Validate => lintstack::cli::validate::run_validate(&options),
    };

    process::exit(exit_code);
}
