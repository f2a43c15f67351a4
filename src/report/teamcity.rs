// src/report/teamcity.rs
//! TeamCity service-message renderer.
//!
//! Emits one block per file, one message per violation, and
//! `buildStatisticValue` lines for the run totals. Statistic keys stay
//! wire-compatible with the original pepper8 tool.

use crate::types::{FileResult, RunStatistics, Severity, SeverityTotals};
use std::ffi::OsStr;
use std::fmt::Write;

/// Environment variable that marks execution under a TeamCity build agent.
pub const BUILD_AGENT_ENV: &str = "TEAMCITY_VERSION";

const STAT_KEY_WARNINGS: &str = "pepper8warnings";
const STAT_KEY_ERRORS: &str = "pepper8errors";

/// Escapes text for TeamCity service-message values.
///
/// '|' is the escape character and must be replaced first, otherwise the
/// pipes introduced by the later substitutions would be escaped again.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('|', "||")
        .replace('\'', "|'")
        .replace('\n', "|n")
        .replace('[', "|[")
        .replace(']', "|]")
}

/// Formats the run as a TeamCity service-message stream.
#[must_use]
pub fn format_teamcity(stats: &RunStatistics, report_name: &str) -> String {
    let mut out = String::new();
    let title = escape_text(report_name);

    let _ = writeln!(out, "##teamcity[blockOpened name='{title}']");
    for file in &stats.files {
        write_file_block(&mut out, file);
    }
    let _ = writeln!(out, "##teamcity[blockClosed name='{title}']");

    for line in statistic_lines(&stats.totals) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn write_file_block(out: &mut String, file: &FileResult) {
    let path = escape_text(&file.path);
    let _ = writeln!(out, "##teamcity[blockOpened name='{path}']");
    for v in &file.violations {
        let status = match v.severity() {
            Some(Severity::Error) => "ERROR",
            _ => "WARNING",
        };
        let text = escape_text(&format!(
            "{}:{}:{}: {} {}",
            v.path, v.line, v.column, v.code, v.description
        ));
        let _ = writeln!(
            out,
            "##teamcity[message text='{text}' status='{status}']"
        );
    }
    let _ = writeln!(out, "##teamcity[blockClosed name='{path}']");
}

/// The two summary statistic lines (warnings, then errors). Written into
/// the report stream by [`format_teamcity`] and, when running under a
/// build agent with a file destination, echoed to stderr by the CLI.
#[must_use]
pub fn statistic_lines(totals: &SeverityTotals) -> [String; 2] {
    [
        format!(
            "##teamcity[buildStatisticValue key='{STAT_KEY_WARNINGS}' value='{}']",
            totals.warnings
        ),
        format!(
            "##teamcity[buildStatisticValue key='{STAT_KEY_ERRORS}' value='{}']",
            totals.errors
        ),
    ]
}

/// The stderr statistic lines for runs under a build agent, given the
/// value of [`BUILD_AGENT_ENV`]. `None` outside an agent. The env value
/// is a parameter so callers and tests never touch process environment.
#[must_use]
pub fn build_agent_statistics(
    env: Option<&OsStr>,
    totals: &SeverityTotals,
) -> Option<[String; 2]> {
    env.map(|_| statistic_lines(totals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Violation;

    /// Inverse of `escape_text`, for round-trip checking only.
    fn unescape_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c != '|' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('|') => out.push('|'),
                Some('\'') => out.push('\''),
                Some('n') => out.push('\n'),
                Some('[') => out.push('['),
                Some(']') => out.push(']'),
                Some(other) => {
                    out.push('|');
                    out.push(other);
                }
                None => out.push('|'),
            }
        }
        out
    }

    #[test]
    fn escapes_each_special_character() {
        assert_eq!(escape_text("a|b"), "a||b");
        assert_eq!(escape_text("it's"), "it|'s");
        assert_eq!(escape_text("a\nb"), "a|nb");
        assert_eq!(escape_text("[tag]"), "|[tag|]");
    }

    #[test]
    fn escaping_round_trips_mixed_input() {
        let original = "pipe | quote ' newline \n open [ close ] mix |'[";
        assert_eq!(unescape_text(&escape_text(original)), original);
    }

    #[test]
    fn pipe_is_escaped_before_other_substitutions() {
        // If '[' were escaped first, the inserted '|' would be doubled.
        assert_eq!(escape_text("["), "|[");
        assert_eq!(escape_text("|["), "|||[");
    }

    #[test]
    fn statistic_lines_carry_the_totals() {
        let totals = SeverityTotals {
            warnings: 7,
            errors: 3,
            ..SeverityTotals::default()
        };
        let [warnings, errors] = statistic_lines(&totals);
        assert_eq!(
            warnings,
            "##teamcity[buildStatisticValue key='pepper8warnings' value='7']"
        );
        assert_eq!(
            errors,
            "##teamcity[buildStatisticValue key='pepper8errors' value='3']"
        );
    }

    #[test]
    fn violation_text_is_escaped_in_messages() {
        let stats = crate::aggregate::aggregate(
            vec![Violation {
                path: "a.py".to_string(),
                code: "E501".to_string(),
                line: 1,
                column: 2,
                description: "don't [wrap]".to_string(),
            }],
            crate::aggregate::Grouping::Contiguous,
        );
        let out = format_teamcity(&stats, "Report");
        assert!(out.contains("don|'t |[wrap|]"));
        assert!(out.contains("status='ERROR'"));
    }

    #[test]
    fn build_agent_statistics_requires_the_env_marker() {
        let totals = SeverityTotals {
            warnings: 2,
            errors: 1,
            ..SeverityTotals::default()
        };
        assert!(build_agent_statistics(None, &totals).is_none());

        let lines = build_agent_statistics(Some(OsStr::new("2024.1")), &totals)
            .expect("set env marker means agent lines");
        assert_eq!(lines, statistic_lines(&totals));
        assert!(lines[0].contains("key='pepper8warnings' value='2'"));
        assert!(lines[1].contains("key='pepper8errors' value='1'"));
    }

    #[test]
    fn empty_run_still_emits_statistics() {
        let out = format_teamcity(&RunStatistics::default(), "Empty");
        assert!(out.contains("key='pepper8warnings' value='0'"));
        assert!(out.contains("key='pepper8errors' value='0'"));
    }
}
