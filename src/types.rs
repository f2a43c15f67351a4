// src/types.rs
use std::fmt;

/// A single finding reported by pep8 or flake8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub code: String,
    pub line: u32,
    pub column: u32,
    pub description: String,
}

impl Violation {
    /// Severity derived from the code string; never stored.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        Severity::classify(&self.code)
    }
}

/// Coarse category derived from a violation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Flake,
    Naming,
    Complexity,
}

/// Classification rules in precedence order. A code containing several
/// trigger letters takes the first match, so "EW1" is an Error.
const CLASSIFICATION: [(char, Severity); 5] = [
    ('E', Severity::Error),
    ('W', Severity::Warning),
    ('F', Severity::Flake),
    ('N', Severity::Naming),
    ('C', Severity::Complexity),
];

impl Severity {
    /// Maps a violation code to its severity, case-insensitively.
    ///
    /// Codes containing none of the trigger letters are unclassified and
    /// return `None`; they still count toward per-code totals.
    #[must_use]
    pub fn classify(code: &str) -> Option<Severity> {
        let upper = code.to_ascii_uppercase();
        CLASSIFICATION
            .iter()
            .find(|(letter, _)| upper.contains(*letter))
            .map(|(_, severity)| *severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Flake => write!(f, "Flake"),
            Severity::Naming => write!(f, "Naming"),
            Severity::Complexity => write!(f, "Complexity"),
        }
    }
}

/// Aggregated violations for a single file.
///
/// Violations keep parse order; per-code counts keep first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FileResult {
    pub path: String,
    pub violations: Vec<Violation>,
    code_counts: Vec<(String, usize)>,
}

impl FileResult {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            violations: Vec::new(),
            code_counts: Vec::new(),
        }
    }

    /// Appends a violation and bumps its code count.
    pub fn push(&mut self, violation: Violation) {
        bump(&mut self.code_counts, &violation.code, 1);
        self.violations.push(violation);
    }

    /// Per-code occurrence counts within this file, first-seen order.
    #[must_use]
    pub fn code_counts(&self) -> &[(String, usize)] {
        &self.code_counts
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// The five severity buckets tracked per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTotals {
    pub errors: usize,
    pub warnings: usize,
    pub flakes: usize,
    pub naming: usize,
    pub complexity: usize,
}

impl SeverityTotals {
    pub fn add(&mut self, severity: Severity, count: usize) {
        match severity {
            Severity::Error => self.errors += count,
            Severity::Warning => self.warnings += count,
            Severity::Flake => self.flakes += count,
            Severity::Naming => self.naming += count,
            Severity::Complexity => self.complexity += count,
        }
    }

    #[must_use]
    pub fn sum(&self) -> usize {
        self.errors + self.warnings + self.flakes + self.naming + self.complexity
    }
}

/// Aggregated results for a full run. Built by [`crate::aggregate`],
/// read-only once rendering begins.
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// One entry per file, first-seen order.
    pub files: Vec<FileResult>,
    /// Global per-code counts, first-seen order.
    pub code_totals: Vec<(String, usize)>,
    pub totals: SeverityTotals,
}

impl RunStatistics {
    /// Total number of parsed violations across all files.
    #[must_use]
    pub fn total_violations(&self) -> usize {
        self.code_totals.iter().map(|(_, count)| count).sum()
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Codes sorted by occurrence count descending. Stable: ties keep
    /// first-seen order.
    #[must_use]
    pub fn codes_by_frequency(&self) -> Vec<(&str, usize)> {
        let mut codes: Vec<(&str, usize)> = self
            .code_totals
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        codes.sort_by(|a, b| b.1.cmp(&a.1));
        codes
    }
}

/// Increments `code` in an order-preserving count list. Linear probe is
/// fine here: real runs see a few dozen distinct codes at most.
pub(crate) fn bump(counts: &mut Vec<(String, usize)>, code: &str, by: usize) {
    match counts.iter_mut().find(|(c, _)| c == code) {
        Some((_, count)) => *count += by,
        None => counts.push((code.to_string(), by)),
    }
}
