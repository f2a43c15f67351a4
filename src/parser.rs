// src/parser.rs
//! Line parser for pep8/flake8 output.
//!
//! Each well-formed line looks like
//! `<path>:<line>:<column>: <code> <description>`. Anything else is
//! skipped; a bad line never fails the run.

use crate::types::Violation;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

/// Greedy path group so paths containing ':' (e.g. Windows drives) still
/// parse; the trailing digit groups anchor the split.
const LINE_PATTERN: &str = r"^(.+):(\d+):(\d+): (\S+) (.*)$";

static LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

/// Lazy, forward-only stream of violations over a line source.
///
/// Restartable only by constructing a new `Parser` over a fresh reader.
pub struct Parser<R: BufRead> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = Violation;

    fn next(&mut self) -> Option<Violation> {
        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(violation) = parse_line(&line) {
                        return Some(violation);
                    }
                    // Malformed line: skip and keep pulling.
                }
                // Read error mid-stream: the rest of the input is
                // unreachable, so end the sequence.
                Some(Err(_)) | None => return None,
            }
        }
    }
}

/// Parses one line of linter output, or `None` if it does not match the
/// grammar (including line/column numbers too large for u32).
#[must_use]
pub fn parse_line(line: &str) -> Option<Violation> {
    let caps = LINE_RE.captures(line)?;
    let line_num: u32 = caps[2].parse().ok()?;
    let column: u32 = caps[3].parse().ok()?;
    Some(Violation {
        path: caps[1].to_string(),
        code: caps[4].to_string(),
        line: line_num,
        column,
        description: caps[5].to_string(),
    })
}
