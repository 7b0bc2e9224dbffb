//! Writing reports to disk as CSV tables or JSON documents.

use crate::audit::detector::ReportView;
use crate::audit::report::AuditReport;
use crate::audit::types::ReasonCategory;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// File format for exported reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// Format implied by a file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            OutputFormat::Json
        } else {
            OutputFormat::Csv
        }
    }
}

pub const REPORT_JSON: &str = "audit_report.json";
pub const DIAGNOSTICS_JSON: &str = "diagnostics.json";
pub const SUMMARY_JSON: &str = "summary.json";

#[derive(Serialize)]
struct OfficerReasonRow<'a> {
    officer: &'a str,
    total_searches: usize,
    rank: usize,
    reason: Option<&'a str>,
    count: usize,
}

#[derive(Serialize)]
struct CategoryReasonRow<'a> {
    category: ReasonCategory,
    category_count: usize,
    rank: usize,
    reason: Option<&'a str>,
    count: usize,
}

#[derive(Serialize)]
struct Summary<'a> {
    total_records: usize,
    investigation_share: &'a crate::audit::aggregate::InvestigationShare,
    case_coverage: &'a crate::audit::aggregate::CaseCoverage,
}

/// Write `report` into `dir`, creating it if needed. Returns the files written.
pub fn write_report(report: &AuditReport, dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut written = Vec::new();
    let mut out = |name: &str| {
        let path = dir.join(name);
        written.push(path.clone());
        path
    };

    match format {
        OutputFormat::Json => write_json(&out(REPORT_JSON), report)?,
        OutputFormat::Csv => {
            write_csv(&out("officer_searches.csv"), &report.officer_searches)?;
            write_csv(&out("top_reasons.csv"), &report.top_reasons)?;

            let officer_rows: Vec<OfficerReasonRow> = report
                .officer_top_reasons
                .iter()
                .flat_map(|o| {
                    o.top_reasons.iter().enumerate().map(|(i, r)| OfficerReasonRow {
                        officer: &o.officer,
                        total_searches: o.total_searches,
                        rank: i + 1,
                        reason: r.reason.as_deref(),
                        count: r.count,
                    })
                })
                .collect();
            write_csv(&out("officer_top_reasons.csv"), &officer_rows)?;

            write_csv(&out("network_usage.csv"), &report.network_usage)?;
            write_csv(&out("category_distribution.csv"), &report.category_distribution)?;

            let category_rows: Vec<CategoryReasonRow> = report
                .category_reasons
                .iter()
                .flat_map(|c| {
                    c.top_reasons.iter().enumerate().map(|(i, r)| CategoryReasonRow {
                        category: c.category,
                        category_count: c.count,
                        rank: i + 1,
                        reason: r.reason.as_deref(),
                        count: r.count,
                    })
                })
                .collect();
            write_csv(&out("category_reasons.csv"), &category_rows)?;

            write_csv(&out("time_periods.csv"), &report.time_periods)?;
            write_csv(&out("search_bursts.csv"), &report.search_bursts)?;
            write_view_csv(&out("suspicious_searches.csv"), &report.suspicious_searches)?;
            write_view_csv(
                &out("concerning_without_case.csv"),
                &report.concerning_without_case,
            )?;
            write_json(
                &out(SUMMARY_JSON),
                &Summary {
                    total_records: report.total_records,
                    investigation_share: &report.investigation_share,
                    case_coverage: &report.case_coverage,
                },
            )?;
            write_json(&out(DIAGNOSTICS_JSON), &report.diagnostics)?;
        }
    }

    log::info!("Wrote {} report files to {}", written.len(), dir.display());
    Ok(written)
}

/// One row per item; the header comes from the first item's field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV record to {}", path.display()))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// A record view as CSV, header row always present. Null cells are empty.
pub fn write_view_csv(path: &Path, view: &ReportView) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&view.columns)?;
    for row in &view.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// A record view as a JSON array of objects keyed by column name.
pub fn write_view_json(path: &Path, view: &ReportView) -> Result<()> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = view
        .rows
        .iter()
        .map(|row| {
            view.columns
                .iter()
                .zip(row)
                .map(|(column, cell)| {
                    let value = cell
                        .clone()
                        .map_or(serde_json::Value::Null, serde_json::Value::String);
                    (column.clone(), value)
                })
                .collect()
        })
        .collect();
    write_json(path, &rows)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)
        .with_context(|| format!("Failed to write JSON output to {}", path.display()))?;
    Ok(())
}
