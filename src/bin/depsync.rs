//! Depsync CLI Binary
//!
//! Command-line interface for checking and regenerating dependency manifests.

use clap::Parser;
use depsync::logging::init_logging;
use depsync::tooling::cli::{execute, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging("warn");

    match execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
