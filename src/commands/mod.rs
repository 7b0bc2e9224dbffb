//! Command implementations for auditing LPR access logs.
//!
//! Each module implements one subcommand of the `lpr-audit` binary. All of
//! them except [`classify`] run the full pipeline over the input exports and
//! differ only in what they print or export.
//!
//! - [`analyze`] - full report: every table, console summary, optional export
//! - [`officers`] - search volume, top reasons and network usage per officer
//! - [`categories`] - reason-category distribution and sample reasons
//! - [`suspicious`] - flagged searches, uncased concerning reasons, bursts
//! - [`classify`] - classify ad-hoc reason strings without any input files

pub mod analyze;
pub mod categories;
pub mod classify;
pub mod officers;
pub mod suspicious;

use crate::audit::report::{resolve_inputs, run_pipeline, Analysis, AnalysisOptions, Diagnostics};
use crate::config::Config;
use crate::utils::format::format_number;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration, resolve inputs and run the pipeline.
pub(crate) fn load_analysis(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    options: &AnalysisOptions,
) -> Result<(Config, Analysis)> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let inputs = resolve_inputs(paths, &config)?;
    let analysis = run_pipeline(&inputs, &config, options)?;

    let d = &analysis.report.diagnostics;
    eprintln!(
        "\nTotal: Read {} of {} files, {} records",
        format_number(d.files_ingested),
        format_number(d.files_discovered),
        format_number(d.total_records)
    );

    Ok((config, analysis))
}

pub(crate) fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{}", title);
    println!("{}", "=".repeat(80));
}

pub(crate) fn print_section(title: &str) {
    println!("\n{}:", title);
    println!("{}", "-".repeat(80));
}

/// Data-quality counts, printed only when something went wrong.
pub(crate) fn print_diagnostics(d: &Diagnostics) {
    let problems = d.ingestion_errors.len()
        + d.schema_conflicts.len()
        + d.invalid_integers
        + d.overflow_rows
        + d.temporal.search_time_unparsed
        + d.temporal.time_frame_unparsed
        + d.temporal.negative_window_durations;
    if problems == 0 {
        return;
    }

    print_section("Data Quality");
    for e in &d.ingestion_errors {
        println!("  ⚠ {}", e);
    }
    for e in &d.schema_conflicts {
        println!("  ⚠ {}", e);
    }
    let counts = [
        ("Unparsed search times", d.temporal.search_time_unparsed),
        ("Unparsed time frames", d.temporal.time_frame_unparsed),
        ("Negative search windows", d.temporal.negative_window_durations),
        ("Invalid count cells", d.invalid_integers),
        ("Rows wider than header", d.overflow_rows),
    ];
    for (label, count) in counts {
        if count > 0 {
            println!("  {:<28} {:>10}", label, format_number(count));
        }
    }
}
