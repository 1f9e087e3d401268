use std::fmt::Write as _;

use crate::error::Result;
use crate::model::AntiPattern;

use super::OutputFormat;

/// Renders the anti-pattern catalogue with current threshold values.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn format_catalog(anti_patterns: &[&AntiPattern], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(anti_patterns)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(anti_patterns)?),
    }
}

fn format_text(anti_patterns: &[&AntiPattern]) -> String {
    let mut output = String::new();

    for anti_pattern in anti_patterns {
        let _ = writeln!(
            output,
            "[{}] {} ({})",
            anti_pattern.id(),
            anti_pattern.print_name(),
            anti_pattern.name()
        );
        if !anti_pattern.description().is_empty() {
            let _ = writeln!(output, "    {}", anti_pattern.description());
        }
        for configuration in anti_pattern.configurations().values() {
            let _ = write!(
                output,
                "    {} = {}",
                configuration.key(),
                configuration.value()
            );
            if !configuration.is_default() {
                let _ = write!(output, " (default {})", configuration.default_value());
            }
            let _ = writeln!(output, "  # {}", configuration.print_name());
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
