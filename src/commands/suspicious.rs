//! Suspicious-access review.
//!
//! Lists night-time searches that carry no case number and whose reason is
//! concerning, cryptic, ambiguous or missing. Also lists concerning reasons
//! without a case number at any hour, and officer-hours with a burst of
//! uncased searches.
//!
//! # Usage
//!
//! ```bash
//! lpr-audit suspicious exports/
//! lpr-audit suspicious exports/ --burst-threshold 20 --output flagged.csv
//! lpr-audit suspicious exports/ --output flagged.json
//! ```

use crate::audit::detector::ReportView;
use crate::audit::report::AnalysisOptions;
use crate::commands::{load_analysis, print_banner, print_section};
use crate::utils::export::{write_view_csv, write_view_json, OutputFormat};
use crate::utils::format::{format_number, or_null, truncate};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Rows printed per listing; the export always holds every row.
const DISPLAY_LIMIT: usize = 25;

pub fn run(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    burst_threshold: usize,
    output: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let options = AnalysisOptions {
        burst_threshold,
        ..AnalysisOptions::default()
    };
    let (_, analysis) = load_analysis(paths, config_path, &options)?;
    let report = &analysis.report;

    print_banner("SUSPICIOUS ACCESS REVIEW");

    println!("\nSummary:");
    println!("  Total searches: {}", format_number(report.total_records));
    println!(
        "  Flagged (night, no case number, risky reason): {}",
        format_number(report.suspicious_searches.len())
    );
    println!(
        "  Concerning reasons without case number: {}",
        format_number(report.concerning_without_case.len())
    );

    print_section("Flagged Searches");
    print_view(&report.suspicious_searches);

    print_section("Concerning Reasons Without Case Number");
    print_view(&report.concerning_without_case);

    print_section(&format!(
        "Search Bursts (more than {} uncased searches in one hour)",
        burst_threshold
    ));
    if report.search_bursts.is_empty() {
        println!("  None");
    }
    for b in &report.search_bursts {
        println!(
            "  {:<40} {} {:02}:00  {:>6} searches",
            truncate(&b.officer, 40),
            b.date,
            b.hour,
            format_number(b.searches)
        );
    }

    if let Some(path) = output {
        let format = format.unwrap_or_else(|| OutputFormat::from_path(path));
        match format {
            OutputFormat::Csv => write_view_csv(path, &report.suspicious_searches)?,
            OutputFormat::Json => write_view_json(path, &report.suspicious_searches)?,
        }
        println!(
            "\nExported {} flagged searches to: {}",
            format_number(report.suspicious_searches.len()),
            path.display()
        );
    }

    println!("\n{}", "=".repeat(80));
    Ok(())
}

fn print_view(view: &ReportView) {
    if view.is_empty() {
        println!("  None");
        return;
    }

    let cell = |row: &[Option<String>], column: &str| {
        view.column_index(column)
            .and_then(|i| row.get(i))
            .and_then(|v| v.as_deref())
            .map(str::to_string)
    };

    println!(
        "{:<24} {:<30} {:<14} {:<22} {}",
        "Officer", "Reason", "Category", "Search time", "Networks"
    );
    for row in view.rows.iter().take(DISPLAY_LIMIT) {
        println!(
            "{:<24} {:<30} {:<14} {:<22} {}",
            truncate(or_null(cell(row, "name").as_deref()), 24),
            truncate(or_null(cell(row, "reason").as_deref()), 30),
            or_null(cell(row, "reason_category").as_deref()),
            truncate(or_null(cell(row, "search time").as_deref()), 22),
            or_null(cell(row, "total networks searched").as_deref())
        );
    }
    if view.len() > DISPLAY_LIMIT {
        println!(
            "  ... and {} more",
            format_number(view.len() - DISPLAY_LIMIT)
        );
    }
}
