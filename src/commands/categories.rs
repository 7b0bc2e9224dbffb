//! Reason-category breakdown.
//!
//! Prints how searches split across the eight audit-risk categories, how
//! many in each lack a case number, and the most frequent reasons within
//! each category so an auditor can sanity-check the vocabulary.
//!
//! # Usage
//!
//! ```bash
//! lpr-audit categories exports/ --samples 10
//! lpr-audit categories exports/ --config my-vocabulary.toml
//! ```

use crate::audit::report::AnalysisOptions;
use crate::commands::{load_analysis, print_banner, print_section};
use crate::utils::format::{format_number, or_null, truncate};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn run(paths: &[PathBuf], config_path: Option<&Path>, samples: usize) -> Result<()> {
    let options = AnalysisOptions {
        category_samples: samples,
        ..AnalysisOptions::default()
    };
    let (_, analysis) = load_analysis(paths, config_path, &options)?;
    let report = &analysis.report;

    print_banner("REASON CATEGORY ANALYSIS");

    let coverage = &report.case_coverage;
    println!("\nCase Number Coverage:");
    println!("  Total searches: {}", format_number(coverage.total));
    println!(
        "  Without case number: {} ({:.1}%)",
        format_number(coverage.missing_case_number),
        coverage.missing_percentage
    );
    println!(
        "  Without case number or reason: {}",
        format_number(coverage.missing_case_and_reason)
    );

    print_section("Category Distribution");
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

    for c in &report.category_reasons {
        print_section(&format!(
            "{} ({} searches) - top {} reasons",
            c.category.as_str().to_uppercase(),
            format_number(c.count),
            samples
        ));
        for r in &c.top_reasons {
            println!(
                "  {:<60} {:>8}",
                truncate(or_null(r.reason.as_deref()), 60),
                format_number(r.count)
            );
        }
    }

    println!("\n{}", "=".repeat(80));
    Ok(())
}
