//! Output formatting utilities for the CLI.

use colored::Colorize;

use scene_check::{Report, ReportEntry, Status, SEPARATOR_LINE};

use crate::OutputFormat;

/// Print the report in the specified format.
pub fn print_report(report: &Report, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }

    match format {
        OutputFormat::Text => {
            for entry in report.entries() {
                match entry {
                    ReportEntry::Separator => println!("{}", SEPARATOR_LINE.dimmed()),
                    ReportEntry::Finding(finding) => {
                        let glyph = match finding.status {
                            Status::Ok => "✓".green().bold(),
                            Status::Violation => "✗".red().bold(),
                            Status::Notice => "·".yellow().bold(),
                        };
                        println!("{} {}", glyph, finding.message);
                    }
                }
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(report) {
                println!("{}", json);
            }
        }
    }
}

/// Print an error message.
pub fn error(msg: &str, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!("{} {}", "✗".red().bold(), msg);
}
