//! Shared output formatting for analysis reports.

use anyhow::Result;
use archmap_core::{AnalysisReport, Classification, EdgeVerdict};

use crate::OutputFormat;

/// Print an analysis report in the specified format.
pub fn print(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &AnalysisReport) {
    let (allowed, violating, unspecified) = report.count_by_classification();

    for verdict in report.violations() {
        println!("{} -> {}", verdict.origin, verdict.target);
        println!("  \x1b[31mviolating\x1b[0m{}", rule_suffix(verdict));
        println!();
    }

    let summary_color = if violating > 0 {
        "\x1b[31m"
    } else if unspecified > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} violating, {} allowed, {} unspecified dependencies among {} element(s)\x1b[0m",
        summary_color, violating, allowed, unspecified, report.elements
    );
}

fn print_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &AnalysisReport) {
    for verdict in report.by_classification(Classification::Violating) {
        println!(
            "{} -> {}: {}{}",
            verdict.origin,
            verdict.target,
            verdict.classification,
            rule_suffix(verdict),
        );
    }
}

fn rule_suffix(verdict: &EdgeVerdict) -> String {
    verdict
        .rule_line
        .map(|line| format!(" (rule on line {line})"))
        .unwrap_or_default()
}
