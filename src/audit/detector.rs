//! Suspicious-access detection.
//!
//! A search is flagged when all three hold:
//!
//! - it carries no case number (missing or blank),
//! - it was initiated at night (23:00-05:59),
//! - its reason is `concerning`, `cryptic`, `ambiguous` or `null`.
//!
//! Searches whose time did not parse land in the `unknown` bucket and are
//! never flagged by the night condition.
//!
//! Besides the flag predicate this module lists concerning reasons without a
//! case number at any hour, and finds bursts: officer-hours with more
//! uncased searches than a threshold.

use crate::audit::types::{ClassifiedRecord, ReasonCategory, TimePeriod};
use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use std::collections::HashMap;

/// Uncased searches an officer may run in one clock hour before it is a burst.
pub const DEFAULT_BURST_THRESHOLD: usize = 10;

/// Categories that count toward the flag predicate.
pub const FLAGGED_CATEGORIES: [ReasonCategory; 4] = [
    ReasonCategory::Concerning,
    ReasonCategory::Cryptic,
    ReasonCategory::Ambiguous,
    ReasonCategory::Null,
];

/// Columns left out of the flagged-record view.
pub const EXCLUDED_COLUMNS: [&str; 11] = [
    "time frame",
    "org name",
    "start_time_of_search_window",
    "end_time_of_search_window",
    "search_date",
    "search_datetime",
    "search_hour",
    "weekday",
    "month",
    "total devices searched",
    "text prompt",
];

pub fn is_suspicious(record: &ClassifiedRecord) -> bool {
    !record.record().has_case_number()
        && record.time_period() == TimePeriod::Night
        && FLAGGED_CATEGORIES.contains(&record.reason_category)
}

/// Records matching [`is_suspicious`], in input order.
pub fn detect_suspicious(records: &[ClassifiedRecord]) -> Vec<&ClassifiedRecord> {
    records.iter().filter(|r| is_suspicious(r)).collect()
}

/// `concerning` records without a case number, at any time of day.
pub fn concerning_without_case(records: &[ClassifiedRecord]) -> Vec<&ClassifiedRecord> {
    records
        .iter()
        .filter(|r| r.reason_category == ReasonCategory::Concerning && !r.record().has_case_number())
        .collect()
}

/// One officer-hour with more uncased searches than the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBurst {
    pub officer: String,
    pub date: NaiveDate,
    pub hour: u32,
    pub searches: usize,
}

/// Group uncased searches by officer and clock hour; keep groups above
/// `threshold`. Records without a parsed search time are ignored.
pub fn detect_bursts(records: &[ClassifiedRecord], threshold: usize) -> Vec<SearchBurst> {
    let mut buckets: HashMap<(&str, NaiveDate, u32), usize> = HashMap::new();
    for record in records {
        if record.record().has_case_number() {
            continue;
        }
        if let Some(dt) = record.temporal.search_datetime {
            *buckets
                .entry((record.officer_name(), dt.date(), dt.hour()))
                .or_insert(0) += 1;
        }
    }

    let mut bursts: Vec<SearchBurst> = buckets
        .into_iter()
        .filter(|(_, count)| *count > threshold)
        .map(|((officer, date, hour), searches)| SearchBurst {
            officer: officer.to_string(),
            date,
            hour,
            searches,
        })
        .collect();
    bursts.sort_by(|a, b| {
        b.searches
            .cmp(&a.searches)
            .then_with(|| a.officer.cmp(&b.officer))
            .then_with(|| (a.date, a.hour).cmp(&(b.date, b.hour)))
    });
    bursts
}

/// Tabular view over a set of records with [`EXCLUDED_COLUMNS`] removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ReportView {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ClassifiedRecord>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut cells: Vec<HashMap<String, Option<String>>> = Vec::new();

        for record in records {
            let pairs = record.columns();
            for (name, _) in &pairs {
                if !EXCLUDED_COLUMNS.contains(&name.as_str()) && !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
            cells.push(pairs.into_iter().collect());
        }

        let rows = cells
            .into_iter()
            .map(|mut row| {
                columns
                    .iter()
                    .map(|c| row.remove(c).flatten())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, `None` if the column is not in the view.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }
}
