// src/cli.rs
//! Command-line surface and the run pipeline: pick an input, parse,
//! aggregate, render, write.

use crate::aggregate::{aggregate, Grouping};
use crate::error::{PeppermillError, Result};
use crate::exit::PeppermillExit;
use crate::parser::Parser as LineParser;
use crate::report::{build_agent_statistics, Generator, BUILD_AGENT_ENV};
use crate::types::RunStatistics;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_NAME: &str = "PEP 8 Report";

#[derive(Parser, Debug)]
#[command(
    name = "peppermill",
    version,
    about = "Convert pep8 or flake8 output to an HTML or TeamCity report",
    after_help = "peppermill accepts input either from stdin or from a filename argument.\n\
                  Unless specified otherwise with -o OUTPUT_FILE, peppermill outputs to stdout."
)]
pub struct Cli {
    /// Path to file containing pep8 or flake8 results
    pub filename: Option<PathBuf>,

    /// Enable verbose output (only useful with --output-file)
    #[arg(long, short)]
    pub verbose: bool,

    /// Write the report to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Report generator: html or teamcity
    #[arg(long, short, value_name = "NAME")]
    pub generator: Option<String>,

    /// Title for the report
    #[arg(long, short, default_value = DEFAULT_REPORT_NAME)]
    pub report_name: String,
}

/// What the input-selection step decided.
pub enum InputSource {
    Stream(Box<dyn BufRead>),
    /// Stdin is an interactive terminal and no filename was given: show
    /// help instead of blocking on keyboard input.
    InteractiveTerminal,
}

impl std::fmt::Debug for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::InteractiveTerminal => f.write_str("InteractiveTerminal"),
        }
    }
}

/// Picks the violation source: named file, else piped/redirected stdin.
///
/// # Errors
/// Returns `InputOpen` if the named file cannot be opened.
pub fn open_input(filename: Option<&Path>) -> Result<InputSource> {
    match filename {
        Some(path) => {
            let file = File::open(path).map_err(|source| PeppermillError::InputOpen {
                source,
                path: path.to_path_buf(),
            })?;
            Ok(InputSource::Stream(Box::new(BufReader::new(file))))
        }
        None if io::stdin().is_terminal() => Ok(InputSource::InteractiveTerminal),
        None => Ok(InputSource::Stream(Box::new(BufReader::new(io::stdin())))),
    }
}

/// Executes a full run for the parsed arguments.
///
/// # Errors
/// Returns error on unsupported generator, unreadable input, or
/// unwritable output. The caller prints it and exits 1.
pub fn run(cli: &Cli) -> Result<PeppermillExit> {
    let generator = Generator::resolve(cli.generator.as_deref().unwrap_or("none"))?;

    let reader = match open_input(cli.filename.as_deref())? {
        InputSource::Stream(reader) => reader,
        InputSource::InteractiveTerminal => {
            // Stdout may already be a closed pipe; nothing to report then.
            let _ = Cli::command().print_help();
            return Ok(PeppermillExit::Success);
        }
    };

    let stats = aggregate(LineParser::new(reader), Grouping::Contiguous);
    let report = generator.render(&stats, &cli.report_name);

    write_report(cli, generator, &stats, &report)?;
    Ok(PeppermillExit::Success)
}

fn write_report(
    cli: &Cli,
    generator: Generator,
    stats: &RunStatistics,
    report: &str,
) -> Result<()> {
    match &cli.output_file {
        Some(path) => {
            let mut file = File::create(path).map_err(|source| PeppermillError::OutputOpen {
                source,
                path: path.clone(),
            })?;
            // Build statistics go to stderr only when the report itself
            // leaves stdout free, and only under a recognized build agent.
            let agent = std::env::var_os(BUILD_AGENT_ENV);
            if let Some(lines) = build_agent_statistics(agent.as_deref(), &stats.totals) {
                for line in lines {
                    eprintln!("{line}");
                }
            }
            file.write_all(report.as_bytes())?;
            if cli.verbose {
                eprintln!(
                    "{} {} report: {} violations in {} files -> {}",
                    "peppermill".dimmed(),
                    generator.name(),
                    stats.total_violations(),
                    stats.files.len(),
                    path.display()
                );
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_input_reads_a_named_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lint.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "foo.py:1:1: E501 line too long").unwrap();

        match open_input(Some(&path)).unwrap() {
            InputSource::Stream(mut reader) => {
                let mut buf = String::new();
                reader.read_line(&mut buf).unwrap();
                assert!(buf.starts_with("foo.py:1:1:"));
            }
            InputSource::InteractiveTerminal => panic!("expected a stream"),
        }
    }

    #[test]
    fn open_input_reports_missing_file() {
        let err = open_input(Some(Path::new("/no/such/lint.txt"))).unwrap_err();
        assert!(matches!(err, PeppermillError::InputOpen { .. }));
        assert!(err.to_string().contains("/no/such/lint.txt"));
    }

    #[test]
    fn run_rejects_missing_generator() {
        let cli = Cli {
            filename: None,
            verbose: false,
            output_file: None,
            generator: None,
            report_name: DEFAULT_REPORT_NAME.to_string(),
        };
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, PeppermillError::UnsupportedGenerator(_)));
    }

    #[test]
    fn run_rejects_unknown_generator() {
        let cli = Cli {
            filename: None,
            verbose: false,
            output_file: None,
            generator: Some("markdown".to_string()),
            report_name: DEFAULT_REPORT_NAME.to_string(),
        };
        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported generator: markdown");
    }
}
