// src/bin/peppermill.rs
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use peppermill_core::cli::{self, Cli};
use peppermill_core::exit::PeppermillExit;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        PeppermillExit::Error.exit();
    }
}

fn run() -> Result<()> {
    let args = Cli::parse();
    cli::run(&args)?.exit()
}
