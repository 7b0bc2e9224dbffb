//! End-to-end pipeline and the report it produces.
//!
//! ```text
//! ingest → normalize/union → temporal → classify → aggregate + detect
//! ```
//!
//! [`analyze_tables`] is the pure part (already-loaded tables in, report
//! out). [`run_pipeline`] adds file discovery and parallel ingestion.

use crate::audit::aggregate::{self, *};
use crate::audit::classifier::ReasonClassifier;
use crate::audit::detector::{self, ReportView, SearchBurst, DEFAULT_BURST_THRESHOLD};
use crate::audit::error::{IngestionError, SchemaConflictError};
use crate::audit::ingest;
use crate::audit::normalizer::union_tables;
use crate::audit::temporal::{parse_records, TemporalStats};
use crate::audit::types::{ClassifiedRecord, RawTable};
use crate::config::Config;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Table sizes and thresholds for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub top_reasons: usize,
    pub top_officers: usize,
    pub reasons_per_officer: usize,
    pub category_samples: usize,
    pub burst_threshold: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_reasons: DEFAULT_TOP_REASONS,
            top_officers: DEFAULT_TOP_OFFICERS,
            reasons_per_officer: DEFAULT_REASONS_PER_OFFICER,
            category_samples: DEFAULT_CATEGORY_SAMPLES,
            burst_threshold: DEFAULT_BURST_THRESHOLD,
        }
    }
}

/// Row counts affected by each failure class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub files_discovered: usize,
    pub files_ingested: usize,
    pub ingestion_errors: Vec<IngestionError>,
    pub schema_conflicts: Vec<SchemaConflictError>,
    pub total_records: usize,
    /// Count cells that were present but not integers.
    pub invalid_integers: usize,
    /// Rows with data past the end of their table's header row, kept as
    /// `column_<N>` extra columns.
    pub overflow_rows: usize,
    #[serde(flatten)]
    pub temporal: TemporalStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub total_records: usize,
    /// Canonical columns of the merged record set.
    pub columns: Vec<String>,
    pub officer_searches: Vec<OfficerCount>,
    pub top_reasons: Vec<ReasonCount>,
    pub investigation_share: InvestigationShare,
    pub officer_top_reasons: Vec<OfficerReasons>,
    pub network_usage: Vec<NetworkUsage>,
    pub category_distribution: Vec<CategoryCount>,
    pub category_reasons: Vec<CategoryReasons>,
    pub case_coverage: CaseCoverage,
    pub time_periods: Vec<PeriodCount>,
    pub suspicious_searches: ReportView,
    pub concerning_without_case: ReportView,
    pub search_bursts: Vec<SearchBurst>,
    pub diagnostics: Diagnostics,
}

/// Classified records together with the report built from them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<ClassifiedRecord>,
    pub report: AuditReport,
}

/// Run every stage after ingestion over already-loaded tables.
pub fn analyze_tables(
    tables: &[RawTable],
    classifier: &ReasonClassifier,
    options: &AnalysisOptions,
) -> Analysis {
    let union = union_tables(tables);
    let columns = union.record_set.columns;
    let (temporal, temporal_stats) = parse_records(union.record_set.records);
    let records = classifier.classify_records(temporal);

    log::info!(
        "Classified {} records from {} tables",
        records.len(),
        tables.len()
    );

    let diagnostics = Diagnostics {
        files_discovered: tables.len(),
        files_ingested: tables.len(),
        ingestion_errors: Vec::new(),
        schema_conflicts: union.conflicts,
        total_records: records.len(),
        invalid_integers: union.invalid_integers,
        overflow_rows: union.overflow_rows,
        temporal: temporal_stats,
    };

    let report = AuditReport {
        total_records: records.len(),
        columns,
        officer_searches: aggregate::officer_search_counts(&records),
        top_reasons: aggregate::top_reasons(&records, options.top_reasons),
        investigation_share: aggregate::investigation_share(&records),
        officer_top_reasons: aggregate::officer_top_reasons(
            &records,
            options.top_officers,
            options.reasons_per_officer,
        ),
        network_usage: aggregate::network_usage(&records),
        category_distribution: aggregate::category_distribution(&records),
        category_reasons: aggregate::category_reasons(&records, options.category_samples),
        case_coverage: aggregate::case_coverage(&records),
        time_periods: aggregate::time_period_distribution(&records),
        suspicious_searches: ReportView::from_records(detector::detect_suspicious(&records)),
        concerning_without_case: ReportView::from_records(detector::concerning_without_case(
            &records,
        )),
        search_bursts: detector::detect_bursts(&records, options.burst_threshold),
        diagnostics,
    };

    Analysis { records, report }
}

/// Discover, ingest and analyze every access log under `paths`.
pub fn run_pipeline(
    paths: &[PathBuf],
    config: &Config,
    options: &AnalysisOptions,
) -> Result<Analysis> {
    let classifier = ReasonClassifier::from_config(&config.classifier)
        .context("Failed to build reason classifier")?;

    let ingested = ingest::ingest(paths)?;
    let mut analysis = analyze_tables(&ingested.tables, &classifier, options);

    let diagnostics = &mut analysis.report.diagnostics;
    diagnostics.files_discovered = ingested.files_discovered;
    diagnostics.files_ingested = ingested.tables.len();
    diagnostics.ingestion_errors = ingested.errors;

    Ok(analysis)
}

/// Input paths from the command line, or the configured default.
pub fn resolve_inputs(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    if !paths.is_empty() {
        return Ok(paths.to_vec());
    }
    config
        .paths
        .input
        .clone()
        .map(|p| vec![p])
        .context("No input paths given and no [paths] input set in the configuration")
}
