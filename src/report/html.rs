// src/report/html.rs
//! HTML report renderer.
//!
//! Produces a complete, self-contained document: title, severity summary,
//! code-frequency table sorted by count descending, then per-file listings
//! with files sorted by path.

use crate::types::{FileResult, RunStatistics, Severity};
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
h1 { border-bottom: 2px solid #444; padding-bottom: 0.2em; }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #bbb; padding: 0.3em 0.8em; text-align: left; }
th { background: #eee; }
.severity-error { color: #b00020; }
.severity-warning { color: #a06000; }
.count { text-align: right; }";

/// Formats the run as an HTML document for human consumption.
#[must_use]
pub fn format_html(stats: &RunStatistics, report_name: &str) -> String {
    let title = escape_html(report_name);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    let _ = writeln!(out, "<style>\n{STYLE}\n</style>");
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{title}</h1>");

    write_summary(&mut out, stats);
    write_code_table(&mut out, stats);
    write_files(&mut out, stats);

    out.push_str("</body>\n</html>\n");
    out
}

fn write_summary(out: &mut String, stats: &RunStatistics) {
    out.push_str("<h2>Summary</h2>\n<table>\n");
    out.push_str("<tr><th>Severity</th><th>Count</th></tr>\n");
    let rows = [
        ("Errors", stats.totals.errors),
        ("Warnings", stats.totals.warnings),
        ("Flakes", stats.totals.flakes),
        ("Naming", stats.totals.naming),
        ("Complexity", stats.totals.complexity),
    ];
    for (label, count) in rows {
        let _ = writeln!(
            out,
            "<tr><td>{label}</td><td class=\"count\">{count}</td></tr>"
        );
    }
    out.push_str("</table>\n");
}

fn write_code_table(out: &mut String, stats: &RunStatistics) {
    out.push_str("<h2>Violations by code</h2>\n<table>\n");
    out.push_str("<tr><th>Code</th><th>Severity</th><th>Occurrences</th></tr>\n");
    for (code, count) in stats.codes_by_frequency() {
        let severity = Severity::classify(code)
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"count\">{}</td></tr>",
            escape_html(code),
            severity,
            count
        );
    }
    out.push_str("</table>\n");
}

fn write_files(out: &mut String, stats: &RunStatistics) {
    out.push_str("<h2>Files</h2>\n");
    if stats.is_empty() {
        out.push_str("<p>No violations found.</p>\n");
        return;
    }

    let mut files: Vec<&FileResult> = stats.files.iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    for file in files {
        let _ = writeln!(
            out,
            "<h3>{} ({} violations)</h3>",
            escape_html(&file.path),
            file.violation_count()
        );
        out.push_str("<table>\n");
        out.push_str(
            "<tr><th>Line</th><th>Column</th><th>Code</th><th>Description</th></tr>\n",
        );
        for v in &file.violations {
            let class = match v.severity() {
                Some(Severity::Error) => " class=\"severity-error\"",
                Some(Severity::Warning) => " class=\"severity-warning\"",
                _ => "",
            };
            let _ = writeln!(
                out,
                "<tr{class}><td class=\"count\">{}</td><td class=\"count\">{}</td><td>{}</td><td>{}</td></tr>",
                v.line,
                v.column,
                escape_html(&v.code),
                escape_html(&v.description)
            );
        }
        out.push_str("</table>\n");
    }
}

/// Escapes text for HTML element and attribute contexts.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
