// src/aggregate.rs
//! Rolls the parsed violation stream into [`RunStatistics`].
//!
//! Implemented as an explicit fold carrying the in-progress [`FileResult`]
//! as state, so the grouping behavior is testable in isolation.

use crate::types::{bump, FileResult, RunStatistics, Severity, Violation};

/// How violations are assigned to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// A new `FileResult` starts whenever the path changes. Matches the
    /// reference tool, which assumes linter output is grouped by file; a
    /// path that reappears non-contiguously fragments into multiple
    /// entries.
    #[default]
    Contiguous,
    /// Violations merge into the entry for their exact path regardless of
    /// contiguity. File order is first-seen.
    ByPath,
}

/// Consumes the violation sequence and builds the run aggregate.
///
/// Empty input is valid and yields an empty `RunStatistics`.
pub fn aggregate(
    violations: impl IntoIterator<Item = Violation>,
    grouping: Grouping,
) -> RunStatistics {
    match grouping {
        Grouping::Contiguous => aggregate_contiguous(violations),
        Grouping::ByPath => aggregate_by_path(violations),
    }
}

fn aggregate_contiguous(violations: impl IntoIterator<Item = Violation>) -> RunStatistics {
    let mut stats = RunStatistics::default();
    let mut current: Option<FileResult> = None;

    for violation in violations {
        match current.as_mut() {
            Some(file) if file.path == violation.path => file.push(violation),
            _ => {
                if let Some(done) = current.take() {
                    finalize(&mut stats, done);
                }
                let mut file = FileResult::new(violation.path.clone());
                file.push(violation);
                current = Some(file);
            }
        }
    }

    if let Some(done) = current.take() {
        finalize(&mut stats, done);
    }
    stats
}

fn aggregate_by_path(violations: impl IntoIterator<Item = Violation>) -> RunStatistics {
    let mut files: Vec<FileResult> = Vec::new();

    for violation in violations {
        match files.iter_mut().find(|file| file.path == violation.path) {
            Some(file) => file.push(violation),
            None => {
                let mut file = FileResult::new(violation.path.clone());
                file.push(violation);
                files.push(file);
            }
        }
    }

    let mut stats = RunStatistics::default();
    for file in files {
        finalize(&mut stats, file);
    }
    stats
}

/// Folds a completed `FileResult` into the global totals.
///
/// Codes that classify to no severity (none of E/W/F/N/C) are counted in
/// the per-code table but excluded from every severity bucket. The
/// reference tool behaves the same way; callers comparing `totals.sum()`
/// to `total_violations()` must expect the gap.
fn finalize(stats: &mut RunStatistics, file: FileResult) {
    for (code, count) in file.code_counts() {
        bump(&mut stats.code_totals, code, *count);
        if let Some(severity) = Severity::classify(code) {
            stats.totals.add(severity, *count);
        }
    }
    stats.files.push(file);
}
