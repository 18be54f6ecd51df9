//! kiln CLI entry point
//!
//! Parses arguments, runs the selected command, and turns failures into a
//! colored diagnostic plus a nonzero exit code.

use clap::Parser;
use colored::Colorize;
use kiln::cli;

fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(err) = cli.execute() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
