//! Data structures representing access-log records at each pipeline stage.
//!
//! Each stage wraps the output of the previous one and adds fields, so
//! upstream data is never rewritten:
//!
//! [`RawTable`] → [`NormalizedRecord`] → [`TemporalRecord`] → [`ClassifiedRecord`]

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Canonical column keys (after trimming and lower-casing the source headers).
pub mod columns {
    pub const NAME: &str = "name";
    pub const REASON: &str = "reason";
    pub const CASE_NUMBER: &str = "case #";
    pub const TIME_FRAME: &str = "time frame";
    pub const SEARCH_TIME: &str = "search time";
    pub const TOTAL_NETWORKS: &str = "total networks searched";
    pub const TOTAL_DEVICES: &str = "total devices searched";

    /// Columns with a dedicated field on [`NormalizedRecord`](super::NormalizedRecord).
    pub const CANONICAL: [&str; 7] = [
        NAME,
        REASON,
        CASE_NUMBER,
        TIME_FRAME,
        SEARCH_TIME,
        TOTAL_NETWORKS,
        TOTAL_DEVICES,
    ];

    pub fn is_canonical(key: &str) -> bool {
        CANONICAL.contains(&key)
    }
}

/// One CSV table exactly as loaded, before any column reconciliation.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// File the table was read from.
    pub source: PathBuf,
    /// Header row as written in the file.
    pub headers: Vec<String>,
    /// Data rows; short rows are padded with empty cells by the normalizer.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    pub fn source_name(&self) -> String {
        self.source.display().to_string()
    }
}

/// A record in the canonical column vocabulary.
///
/// Every canonical field is present (possibly `None`). Source columns outside
/// the canonical set are kept in `extra`, which after a union holds every
/// extra column seen in any table. Count cells that are not integers keep
/// their source text in `unparsed_counts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub officer_name: String,
    pub reason: Option<String>,
    pub case_number: Option<String>,
    pub time_frame_raw: Option<String>,
    pub search_time_raw: String,
    pub total_networks_searched: Option<u64>,
    pub total_devices_searched: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unparsed_counts: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Option<String>>,
}

impl NormalizedRecord {
    /// Case number with blank values treated as missing.
    pub fn case_number(&self) -> Option<&str> {
        self.case_number
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    pub fn has_case_number(&self) -> bool {
        self.case_number().is_some()
    }

    /// Reason with blank values treated as missing.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Look up a value by canonical column key, including extra columns.
    pub fn get(&self, column: &str) -> Option<String> {
        match column {
            columns::NAME => Some(self.officer_name.clone()),
            columns::REASON => self.reason.clone(),
            columns::CASE_NUMBER => self.case_number.clone(),
            columns::TIME_FRAME => self.time_frame_raw.clone(),
            columns::SEARCH_TIME => Some(self.search_time_raw.clone()),
            columns::TOTAL_NETWORKS => self.count(column, self.total_networks_searched),
            columns::TOTAL_DEVICES => self.count(column, self.total_devices_searched),
            other => self.extra.get(other).cloned().flatten(),
        }
    }

    fn count(&self, column: &str, parsed: Option<u64>) -> Option<String> {
        parsed
            .map(|n| n.to_string())
            .or_else(|| self.unparsed_counts.get(column).cloned())
    }
}

/// Time-of-day bucket of the moment a search was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    BusinessHours,
    Evening,
    Night,
    /// The search time did not parse; kept apart from `Night` so data-quality
    /// failures never look like off-hours access.
    Unknown,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::BusinessHours,
        TimePeriod::Evening,
        TimePeriod::Night,
        TimePeriod::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::BusinessHours => "business_hours",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
            TimePeriod::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized record with its timestamps parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalRecord {
    #[serde(flatten)]
    pub record: NormalizedRecord,
    pub search_window_start: Option<NaiveDateTime>,
    pub search_window_end: Option<NaiveDateTime>,
    #[serde(with = "duration_secs")]
    pub search_window_duration: Option<Duration>,
    pub search_datetime: Option<NaiveDateTime>,
    pub time_period: TimePeriod,
}

/// Audit-risk category assigned to a search justification.
///
/// Declaration order is the classifier's precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCategory {
    Legitimate,
    CaseNumber,
    Concerning,
    Ambiguous,
    Null,
    Cryptic,
    NumericCode,
    Uncategorized,
}

impl ReasonCategory {
    pub const ALL: [ReasonCategory; 8] = [
        ReasonCategory::Legitimate,
        ReasonCategory::CaseNumber,
        ReasonCategory::Concerning,
        ReasonCategory::Ambiguous,
        ReasonCategory::Null,
        ReasonCategory::Cryptic,
        ReasonCategory::NumericCode,
        ReasonCategory::Uncategorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCategory::Legitimate => "legitimate",
            ReasonCategory::CaseNumber => "case_number",
            ReasonCategory::Concerning => "concerning",
            ReasonCategory::Ambiguous => "ambiguous",
            ReasonCategory::Null => "null",
            ReasonCategory::Cryptic => "cryptic",
            ReasonCategory::NumericCode => "numeric_code",
            ReasonCategory::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for ReasonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A temporally parsed record with its reason category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub temporal: TemporalRecord,
    pub reason_category: ReasonCategory,
}

impl ClassifiedRecord {
    pub fn record(&self) -> &NormalizedRecord {
        &self.temporal.record
    }

    pub fn officer_name(&self) -> &str {
        &self.temporal.record.officer_name
    }

    pub fn time_period(&self) -> TimePeriod {
        self.temporal.time_period
    }

    /// Every column of this record as `(name, value)` pairs, source columns
    /// first (canonical, then extra in key order), derived columns last.
    pub fn columns(&self) -> Vec<(String, Option<String>)> {
        use crate::utils::time::{duration_human, format_timestamp};

        let record = self.record();
        let mut out: Vec<(String, Option<String>)> = columns::CANONICAL
            .iter()
            .map(|c| ((*c).to_string(), record.get(c)))
            .collect();
        out.extend(record.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        let t = &self.temporal;
        out.push((
            "start_time_of_search_window".to_string(),
            t.search_window_start.as_ref().map(format_timestamp),
        ));
        out.push((
            "end_time_of_search_window".to_string(),
            t.search_window_end.as_ref().map(format_timestamp),
        ));
        out.push((
            "search_window_duration".to_string(),
            t.search_window_duration.map(duration_human),
        ));
        out.push((
            "search_datetime".to_string(),
            t.search_datetime.as_ref().map(format_timestamp),
        ));
        out.push((
            "time_period".to_string(),
            Some(t.time_period.as_str().to_string()),
        ));
        out.push((
            "reason_category".to_string(),
            Some(self.reason_category.as_str().to_string()),
        ));
        out
    }
}

/// Serializes an optional duration as whole seconds.
mod duration_secs {
    use chrono::Duration;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&d.num_seconds()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_case_number_is_missing() {
        let record = NormalizedRecord {
            case_number: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.case_number(), None);
        assert!(!record.has_case_number());
    }

    #[test]
    fn test_get_extra_column() {
        let mut record = NormalizedRecord {
            officer_name: "J. Doe".to_string(),
            ..Default::default()
        };
        record
            .extra
            .insert("org name".to_string(), Some("Rockford PD".to_string()));
        record.extra.insert("text prompt".to_string(), None);

        assert_eq!(record.get("name").as_deref(), Some("J. Doe"));
        assert_eq!(record.get("org name").as_deref(), Some("Rockford PD"));
        assert_eq!(record.get("text prompt"), None);
        assert_eq!(record.get("missing column"), None);
    }

    #[test]
    fn test_get_unparsed_count_keeps_text() {
        let mut record = NormalizedRecord {
            total_networks_searched: Some(40),
            ..Default::default()
        };
        record
            .unparsed_counts
            .insert("total devices searched".to_string(), "n/a".to_string());

        assert_eq!(record.get("total networks searched").as_deref(), Some("40"));
        assert_eq!(record.get("total devices searched").as_deref(), Some("n/a"));
        assert_eq!(record.total_devices_searched, None);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ReasonCategory::NumericCode).unwrap();
        assert_eq!(json, r#""numeric_code""#);
        let json = serde_json::to_string(&ReasonCategory::Null).unwrap();
        assert_eq!(json, r#""null""#);
        let json = serde_json::to_string(&TimePeriod::BusinessHours).unwrap();
        assert_eq!(json, r#""business_hours""#);
    }

    #[test]
    fn test_category_order_is_precedence() {
        let mut sorted = ReasonCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, ReasonCategory::ALL);
        assert_eq!(sorted[0], ReasonCategory::Legitimate);
        assert_eq!(sorted[7], ReasonCategory::Uncategorized);
    }
}
