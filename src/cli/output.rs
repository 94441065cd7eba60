//! Output formatting helpers for CLI commands

use crate::health::{HealthReport, Outcome};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Colored status label for an outcome
fn status_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Up => outcome.label().green().to_string(),
        Outcome::Down { .. } => outcome.label().red().to_string(),
        Outcome::Error { .. } => outcome.label().yellow().to_string(),
    }
}

fn detail_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Up => String::new(),
        Outcome::Down { details } => details
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", "),
        Outcome::Error { error } => error.clone(),
    }
}

/// Format a report as a table followed by a summary line
pub fn format_report_table(report: &HealthReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Status", "Detail"]);

    for s in &report.services {
        table.add_row(vec![
            Cell::new(&s.service),
            Cell::new(status_label(&s.outcome)),
            Cell::new(detail_text(&s.outcome)),
        ]);
    }

    format!(
        "{}\n{}/{} services up",
        table,
        report.up_count(),
        report.services.len()
    )
}

/// Format a report as JSON
pub fn format_report_json(report: &HealthReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
