//! Full audit report.
//!
//! Runs every pipeline stage and prints a console summary of each table.
//! With `--output-dir` (or `[paths] output` in the config) the complete
//! report is also written to disk.
//!
//! # Usage
//!
//! ```bash
//! # Console summary only
//! lpr-audit analyze exports/
//!
//! # Export one CSV per table plus diagnostics.json
//! lpr-audit analyze exports/ --output-dir reports/
//!
//! # Single JSON document
//! lpr-audit analyze exports/ --output-dir reports/ --format json
//! ```

use crate::audit::report::AnalysisOptions;
use crate::commands::{load_analysis, print_banner, print_diagnostics, print_section};
use crate::utils::export::{write_report, OutputFormat};
use crate::utils::format::{format_number, or_null, truncate};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    output_dir: Option<&Path>,
    format: OutputFormat,
    top: usize,
) -> Result<()> {
    let options = AnalysisOptions {
        top_reasons: top,
        ..AnalysisOptions::default()
    };
    let (config, analysis) = load_analysis(paths, config_path, &options)?;
    let report = &analysis.report;

    print_banner("LPR ACCESS LOG AUDIT");

    println!("\nSummary:");
    println!("  Total searches: {}", format_number(report.total_records));
    println!("  Officers: {}", format_number(report.officer_searches.len()));
    println!(
        "  Searches without case number: {} ({:.1}%)",
        format_number(report.case_coverage.missing_case_number),
        report.case_coverage.missing_percentage
    );
    println!(
        "  Searches without case number or reason: {}",
        format_number(report.case_coverage.missing_case_and_reason)
    );
    println!(
        "  Reasons mentioning investigation: {:.1}%",
        report.investigation_share.percentage
    );

    print_section(&format!("Top {} Reasons", top));
    for (i, r) in report.top_reasons.iter().enumerate() {
        println!(
            "{:>3}. {:<50} {:>10}",
            i + 1,
            truncate(or_null(r.reason.as_deref()), 50),
            format_number(r.count)
        );
    }

    print_section("Reason Categories");
    println!(
        "{:<16} {:>10} {:>8} {:>14}",
        "Category", "Searches", "%", "No case #"
    );
    for c in &report.category_distribution {
        println!(
            "{:<16} {:>10} {:>7.1}% {:>14}",
            c.category.as_str(),
            format_number(c.count),
            c.percentage,
            format_number(c.missing_case_number)
        );
    }

    print_section("Time of Day");
    for p in &report.time_periods {
        println!(
            "{:<16} {:>10} {:>7.1}%",
            p.time_period.as_str(),
            format_number(p.count),
            p.percentage
        );
    }

    print_section("Suspicious Access");
    println!(
        "  Night searches, no case number, risky reason: {}",
        format_number(report.suspicious_searches.len())
    );
    println!(
        "  Concerning reasons without case number: {}",
        format_number(report.concerning_without_case.len())
    );
    println!(
        "  Officer-hours over the burst threshold: {}",
        format_number(report.search_bursts.len())
    );

    print_diagnostics(&report.diagnostics);

    if let Some(dir) = output_dir.map(Path::to_path_buf).or(config.paths.output) {
        let written = write_report(report, &dir, format)?;
        println!("\nOutput written to: {}", dir.display());
        for path in written {
            println!("  {}", path.display());
        }
    }

    println!("\n{}", "=".repeat(80));
    Ok(())
}
