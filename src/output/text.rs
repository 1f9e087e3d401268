use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::model::QueryResultItem;
use crate::runner::{DetectorFailure, ProjectReport};

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human readable report. Details are printed for detected anti-patterns,
/// and for every verdict once `verbose` is set.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn format_report(&self, report: &ProjectReport, output: &mut Vec<u8>) {
        let header = format!("Project: {} (id {})", report.project.name, report.project.id);
        writeln!(output, "{}", self.colorize(&header, ansi::BOLD)).ok();

        for result in &report.results {
            self.format_result(result, output);
        }
        for failure in &report.failures {
            self.format_failure(failure, output);
        }
    }

    fn format_result(&self, result: &QueryResultItem, output: &mut Vec<u8>) {
        let (icon, status, color) = if result.is_detected() {
            ("✗", "DETECTED", ansi::RED)
        } else {
            ("✓", "OK", ansi::GREEN)
        };
        writeln!(
            output,
            "{icon} {}: {}",
            self.colorize(status, color),
            result.anti_pattern().print_name
        )
        .ok();

        if result.is_detected() || self.verbose > 0 {
            for detail in result.details() {
                writeln!(output, "   {}: {}", detail.label, detail.value).ok();
            }
        }
    }

    fn format_failure(&self, failure: &DetectorFailure, output: &mut Vec<u8>) {
        writeln!(
            output,
            "! {}: {}",
            self.colorize("ERROR", ansi::YELLOW),
            failure.anti_pattern.print_name
        )
        .ok();
        writeln!(output, "   {}", failure.message).ok();
    }

    fn format_summary(&self, reports: &[ProjectReport]) -> String {
        let (detected, clean, failed) =
            reports
                .iter()
                .fold((0, 0, 0), |(d, c, f), report| {
                    let found = report.detected_count();
                    (
                        d + found,
                        c + report.results.len() - found,
                        f + report.failures.len(),
                    )
                });

        let mut summary = format!(
            "Summary: {} projects analyzed, {} detected, {} not detected",
            reports.len(),
            self.colorize(&detected.to_string(), ansi::RED),
            self.colorize(&clean.to_string(), ansi::GREEN),
        );
        if failed > 0 {
            let _ = write!(
                summary,
                ", {} failed",
                self.colorize(&failed.to_string(), ansi::YELLOW)
            );
        }
        summary
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[ProjectReport]) -> Result<String> {
        let mut output = Vec::new();

        for report in reports {
            self.format_report(report, &mut output);
            writeln!(output).ok();
        }

        writeln!(output, "{}", self.format_summary(reports)).ok();

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
