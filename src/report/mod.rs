// src/report/mod.rs
//! Output formatting for lint reports.

pub mod html;
pub mod teamcity;

pub use html::format_html;
pub use teamcity::{
    build_agent_statistics, escape_text, format_teamcity, statistic_lines, BUILD_AGENT_ENV,
};

use crate::error::{PeppermillError, Result};
use crate::types::RunStatistics;

/// The selected output format. Replaces the reference tool's class
/// hierarchy with a tagged variant dispatched by match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Html,
    TeamCity,
}

impl Generator {
    /// Resolves a generator by its CLI name.
    ///
    /// # Errors
    /// Returns `UnsupportedGenerator` for anything other than `html` or
    /// `teamcity`. The CLI turns that into a message and exit code 1.
    pub fn resolve(name: &str) -> Result<Generator> {
        match name {
            "html" => Ok(Generator::Html),
            "teamcity" => Ok(Generator::TeamCity),
            other => Err(PeppermillError::UnsupportedGenerator(other.to_string())),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Generator::Html => "html",
            Generator::TeamCity => "teamcity",
        }
    }

    /// Renders the full report. Pure: same statistics and title always
    /// produce identical bytes.
    #[must_use]
    pub fn render(self, stats: &RunStatistics, report_name: &str) -> String {
        match self {
            Generator::Html => format_html(stats, report_name),
            Generator::TeamCity => format_teamcity(stats, report_name),
        }
    }
}
