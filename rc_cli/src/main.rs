//! # rc_cli
//!
//! Command-line shell over `rc_core`. Reads a JSON design record (or uses the
//! built-in default), runs one of the design steps and prints a table or JSON.
//!
//! ```text
//! rc_cli --input beam.json options --limit 5
//! rc_cli --input beam.json check --option 1
//! rc_cli --json all
//! ```
//!
//! The exit code is non-zero when a check fails or the serviceability solve
//! has no physical solution.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod output;

fn main() -> ExitCode {
    match cli::Cli::parse().run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
