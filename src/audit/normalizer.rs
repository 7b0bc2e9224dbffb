//! Column reconciliation and diagonal union of heterogeneous tables.
//!
//! Exports from different agencies and date ranges disagree on header
//! spelling (`Name` vs `name `, `Case #` vs `case #`) and on which columns
//! exist at all. Headers are trimmed and lower-cased into canonical keys,
//! then tables are stacked by column union: a column present in any table
//! exists for every record, null where its table lacked it.

use crate::audit::error::SchemaConflictError;
use crate::audit::types::{columns, NormalizedRecord, RawTable};
use std::collections::BTreeMap;

/// Canonical key for a source header.
pub fn normalize_column_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// One table after column reconciliation, before the union.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    pub source: String,
    /// Canonical keys in first-seen order.
    pub columns: Vec<String>,
    pub records: Vec<NormalizedRecord>,
    /// Integer cells that did not parse and were nulled.
    pub invalid_integers: usize,
    /// Rows holding data in cells past the end of the header row.
    pub overflow_rows: usize,
}

/// All records in one canonical schema.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Union of every table's canonical keys, in first-seen order.
    pub columns: Vec<String>,
    pub records: Vec<NormalizedRecord>,
}

/// Outcome of normalizing and merging a batch of raw tables.
#[derive(Debug, Clone, Default)]
pub struct UnionResult {
    pub record_set: RecordSet,
    /// Tables dropped because of a schema conflict.
    pub conflicts: Vec<SchemaConflictError>,
    pub invalid_integers: usize,
    pub overflow_rows: usize,
}

/// Header text for every cell position that carries data.
///
/// Cells past the end of the header row are named `column_<N>` by their
/// 1-based position, and only when some row holds a value there.
fn positioned_headers(table: &RawTable) -> Vec<(usize, String)> {
    let mut headers: Vec<(usize, String)> = table.headers.iter().cloned().enumerate().collect();
    let width = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    for idx in table.headers.len()..width {
        let used = table
            .rows
            .iter()
            .any(|row| row.get(idx).is_some_and(|c| !c.trim().is_empty()));
        if used {
            headers.push((idx, format!("column_{}", idx + 1)));
        }
    }
    headers
}

/// Reconcile one raw table's headers and build its records.
///
/// Distinct headers that collapse to the same key are coalesced as long as
/// they never hold different non-empty values on the same row; otherwise
/// the table is rejected with [`SchemaConflictError`].
pub fn normalize_table(table: &RawTable) -> Result<NormalizedTable, SchemaConflictError> {
    let source = table.source_name();
    let headers = positioned_headers(table);

    // key -> (cell index, header text) of every header that normalizes to it
    let mut groups: Vec<(String, Vec<(usize, &str)>)> = Vec::new();
    for (idx, header) in &headers {
        let key = normalize_column_name(header);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, cells)) => cells.push((*idx, header.as_str())),
            None => groups.push((key, vec![(*idx, header.as_str())])),
        }
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut invalid_integers = 0;
    let mut overflow_rows = 0;

    for row in &table.rows {
        if row
            .iter()
            .skip(table.headers.len())
            .any(|c| !c.trim().is_empty())
        {
            overflow_rows += 1;
        }

        let mut values: Vec<(&str, Option<String>)> = Vec::with_capacity(groups.len());
        for (key, cells) in &groups {
            let value = coalesce(&source, key, cells, row)?;
            values.push((key.as_str(), value));
        }
        let record = build_record(values);
        invalid_integers += record.unparsed_counts.len();
        records.push(record);
    }

    if overflow_rows > 0 {
        log::debug!(
            "{}: {} rows extend past the header row",
            source,
            overflow_rows
        );
    }

    Ok(NormalizedTable {
        source,
        columns: groups.into_iter().map(|(k, _)| k).collect(),
        records,
        invalid_integers,
        overflow_rows,
    })
}

/// Pick the single value held by a group of same-key columns on one row.
fn coalesce(
    source: &str,
    key: &str,
    cells: &[(usize, &str)],
    row: &[String],
) -> Result<Option<String>, SchemaConflictError> {
    let mut chosen: Option<(&str, &str)> = None;

    for &(idx, header) in cells {
        let Some(cell) = row.get(idx).map(String::as_str) else {
            continue;
        };
        if cell.trim().is_empty() {
            continue;
        }
        match chosen {
            None => chosen = Some((header, cell)),
            Some((first_header, first)) if first.trim() != cell.trim() => {
                return Err(SchemaConflictError {
                    source_name: source.to_string(),
                    column: key.to_string(),
                    first: first_header.to_string(),
                    second: header.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(chosen.map(|(_, v)| v.to_string()))
}

/// Map keyed values onto the canonical record.
fn build_record(values: Vec<(&str, Option<String>)>) -> NormalizedRecord {
    let mut record = NormalizedRecord::default();

    for (key, value) in values {
        match key {
            columns::NAME => record.officer_name = value.unwrap_or_default(),
            columns::REASON => record.reason = value,
            columns::CASE_NUMBER => record.case_number = value,
            columns::TIME_FRAME => record.time_frame_raw = value,
            columns::SEARCH_TIME => record.search_time_raw = value.unwrap_or_default(),
            columns::TOTAL_NETWORKS => {
                record.total_networks_searched =
                    parse_count(key, value, &mut record.unparsed_counts)
            }
            columns::TOTAL_DEVICES => {
                record.total_devices_searched =
                    parse_count(key, value, &mut record.unparsed_counts)
            }
            other => {
                record.extra.insert(other.to_string(), value);
            }
        }
    }

    record
}

/// Parse a count cell such as `1,109`. Text that is not an integer is
/// kept in `unparsed` under its column key.
fn parse_count(
    key: &str,
    value: Option<String>,
    unparsed: &mut BTreeMap<String, String>,
) -> Option<u64> {
    let raw = value?;
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            unparsed.insert(key.to_string(), raw);
            None
        }
    }
}

/// Stack normalized tables by column union.
///
/// Every record receives every extra column seen in any table, null where
/// its own table lacked it. Record order is table order, then row order.
pub fn union(tables: Vec<NormalizedTable>) -> RecordSet {
    let mut all_columns: Vec<String> = Vec::new();
    for table in &tables {
        for column in &table.columns {
            if !all_columns.contains(column) {
                all_columns.push(column.clone());
            }
        }
    }

    let extra_columns: Vec<&String> = all_columns
        .iter()
        .filter(|c| !columns::is_canonical(c))
        .collect();

    let mut records = Vec::with_capacity(tables.iter().map(|t| t.records.len()).sum());
    for table in tables {
        for mut record in table.records {
            for column in &extra_columns {
                record.extra.entry((*column).clone()).or_insert(None);
            }
            records.push(record);
        }
    }

    RecordSet {
        columns: all_columns,
        records,
    }
}

/// Normalize every table and merge the ones without conflicts.
pub fn union_tables(tables: &[RawTable]) -> UnionResult {
    let mut normalized = Vec::with_capacity(tables.len());
    let mut conflicts = Vec::new();
    let mut invalid_integers = 0;
    let mut overflow_rows = 0;

    for table in tables {
        match normalize_table(table) {
            Ok(t) => {
                log::debug!(
                    "Normalized {} ({} rows, {} columns)",
                    t.source,
                    t.records.len(),
                    t.columns.len()
                );
                invalid_integers += t.invalid_integers;
                overflow_rows += t.overflow_rows;
                normalized.push(t);
            }
            Err(e) => {
                log::warn!("{}; skipping table", e);
                conflicts.push(e);
            }
        }
    }

    UnionResult {
        record_set: union(normalized),
        conflicts,
        invalid_integers,
        overflow_rows,
    }
}
