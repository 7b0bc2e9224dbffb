//! Per-officer search activity.
//!
//! Shows search volume per officer, the most common reasons given by the
//! busiest officers, and how many networks each officer's searches reach.
//!
//! # Usage
//!
//! ```bash
//! lpr-audit officers exports/ --top 25
//! ```

use crate::audit::report::AnalysisOptions;
use crate::commands::{load_analysis, print_banner, print_section};
use crate::utils::format::{format_number, or_null, truncate};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run(paths: &[PathBuf], config_path: Option<&Path>, top: usize) -> Result<()> {
    let options = AnalysisOptions {
        top_officers: top,
        ..AnalysisOptions::default()
    };
    let (_, analysis) = load_analysis(paths, config_path, &options)?;
    let report = &analysis.report;

    print_banner("OFFICER SEARCH ACTIVITY");

    println!("\nSummary:");
    println!("  Total searches: {}", format_number(report.total_records));
    println!("  Officers: {}", format_number(report.officer_searches.len()));
    println!(
        "  Reasons mentioning investigation: {} ({:.1}%)",
        format_number(report.investigation_share.matching),
        report.investigation_share.percentage
    );

    print_section(&format!("Top {} Officers by Search Volume", top));
    for (i, o) in report.officer_searches.iter().take(top).enumerate() {
        println!(
            "{:>3}. {:<40} {:>10}",
            i + 1,
            truncate(&o.officer, 40),
            format_number(o.searches)
        );
    }

    print_section("Most Common Reasons per Officer");
    for o in &report.officer_top_reasons {
        println!(
            "\n{} ({} searches)",
            o.officer,
            format_number(o.total_searches)
        );
        for r in &o.top_reasons {
            println!(
                "    {:<50} {:>8}",
                truncate(or_null(r.reason.as_deref()), 50),
                format_number(r.count)
            );
        }
    }

    print_section("Network Usage");
    println!(
        "{:<40} {:>10} {:>12} {:>10}",
        "Officer", "Searches", "Avg networks", "Max"
    );
    for n in report.network_usage.iter().take(top) {
        let avg = n
            .avg_networks_per_search
            .map_or_else(|| "-".to_string(), |v| format!("{:.1}", v));
        let max = n
            .max_networks_searched
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:<40} {:>10} {:>12} {:>10}",
            truncate(&n.officer, 40),
            format_number(n.total_searches),
            avg,
            max
        );
    }

    println!("\n{}", "=".repeat(80));
    Ok(())
}
