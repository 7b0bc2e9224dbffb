//! Timestamp extraction, search-window duration and time-of-day buckets.

use crate::audit::types::{NormalizedRecord, TemporalRecord, TimePeriod};
use crate::utils::time::parse_timestamp;
use chrono::{NaiveDateTime, Timelike};

/// Split a `time frame` cell into its start and end text.
///
/// The cell holds two newline-joined timestamps; only the first newline
/// separates them. A cell without a newline yields no end.
pub fn split_time_frame(raw: &str) -> (Option<&str>, Option<&str>) {
    fn non_empty(s: &str) -> Option<&str> {
        let s = s.trim();
        (!s.is_empty()).then_some(s)
    }

    match raw.split_once('\n') {
        Some((start, end)) => (non_empty(start), non_empty(end)),
        None => (non_empty(raw), None),
    }
}

/// Bucket an hour of day (0-23).
///
/// 6-17 business hours, 18-22 evening, everything else night.
pub fn time_period_for_hour(hour: u32) -> TimePeriod {
    match hour {
        6..=17 => TimePeriod::BusinessHours,
        18..=22 => TimePeriod::Evening,
        _ => TimePeriod::Night,
    }
}

/// Bucket a parsed search time; `None` maps to [`TimePeriod::Unknown`].
pub fn time_period(search_datetime: Option<NaiveDateTime>) -> TimePeriod {
    search_datetime
        .map(|dt| time_period_for_hour(dt.hour()))
        .unwrap_or(TimePeriod::Unknown)
}

/// Parse every timestamp on a record and derive duration and bucket.
pub fn parse_record(record: NormalizedRecord) -> TemporalRecord {
    let (start_text, end_text) = record
        .time_frame_raw
        .as_deref()
        .map(split_time_frame)
        .unwrap_or((None, None));

    let search_window_start = start_text.and_then(parse_timestamp);
    let search_window_end = end_text.and_then(parse_timestamp);
    let search_window_duration = match (search_window_start, search_window_end) {
        (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
        _ => None,
    };

    let search_datetime = parse_timestamp(&record.search_time_raw);

    TemporalRecord {
        record,
        search_window_start,
        search_window_end,
        search_window_duration,
        search_datetime,
        time_period: time_period(search_datetime),
    }
}

/// Data-quality tallies from the temporal stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TemporalStats {
    /// Records whose search time is missing or did not parse.
    pub search_time_unparsed: usize,
    /// Records with a time frame where either endpoint did not parse.
    pub time_frame_unparsed: usize,
    /// Parsed windows whose end precedes their start.
    pub negative_window_durations: usize,
}

impl TemporalStats {
    pub fn observe(&mut self, record: &TemporalRecord) {
        if record.search_datetime.is_none() {
            self.search_time_unparsed += 1;
        }
        if record.record.time_frame_raw.is_some()
            && (record.search_window_start.is_none() || record.search_window_end.is_none())
        {
            self.time_frame_unparsed += 1;
        }
        if record
            .search_window_duration
            .is_some_and(|d| d < chrono::Duration::zero())
        {
            self.negative_window_durations += 1;
        }
    }
}

/// Run the temporal stage over a record set.
pub fn parse_records(records: Vec<NormalizedRecord>) -> (Vec<TemporalRecord>, TemporalStats) {
    let mut stats = TemporalStats::default();
    let parsed = records
        .into_iter()
        .map(|r| {
            let t = parse_record(r);
            stats.observe(&t);
            t
        })
        .collect();
    (parsed, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(time_frame: Option<&str>, search_time: &str) -> NormalizedRecord {
        NormalizedRecord {
            officer_name: "A".to_string(),
            time_frame_raw: time_frame.map(str::to_string),
            search_time_raw: search_time.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_time_bucket_boundaries() {
        assert_eq!(time_period_for_hour(5), TimePeriod::Night);
        assert_eq!(time_period_for_hour(6), TimePeriod::BusinessHours);
        assert_eq!(time_period_for_hour(17), TimePeriod::BusinessHours);
        assert_eq!(time_period_for_hour(18), TimePeriod::Evening);
        assert_eq!(time_period_for_hour(22), TimePeriod::Evening);
        assert_eq!(time_period_for_hour(23), TimePeriod::Night);
        assert_eq!(time_period_for_hour(0), TimePeriod::Night);
    }

    #[test]
    fn test_unparsed_search_time_is_unknown() {
        assert_eq!(time_period(None), TimePeriod::Unknown);
        let t = parse_record(record(None, "garbage"));
        assert_eq!(t.search_datetime, None);
        assert_eq!(t.time_period, TimePeriod::Unknown);
    }

    #[test]
    fn test_split_time_frame() {
        assert_eq!(
            split_time_frame("01/01/2025, 01:00:00 AM CST\n01/02/2025, 01:00:00 AM CST"),
            (
                Some("01/01/2025, 01:00:00 AM CST"),
                Some("01/02/2025, 01:00:00 AM CST")
            )
        );
        assert_eq!(split_time_frame("only one"), (Some("only one"), None));
        assert_eq!(split_time_frame("a\r\nb\nc"), (Some("a"), Some("b\nc")));
        assert_eq!(split_time_frame("  \n b "), (None, Some("b")));
        assert_eq!(split_time_frame(""), (None, None));
    }

    #[test]
    fn test_parse_record_window() {
        let t = parse_record(record(
            Some("01/01/2025, 01:00:00 AM CST\n01/03/2025, 01:00:00 AM CST"),
            "01/03/2025, 11:15:00 PM CST",
        ));
        assert_eq!(t.search_window_duration, Some(Duration::days(2)));
        assert_eq!(t.time_period, TimePeriod::Night);
    }

    #[test]
    fn test_missing_window_end_gives_null_duration() {
        let t = parse_record(record(
            Some("01/01/2025, 01:00:00 AM CST"),
            "01/03/2025, 09:00:00 AM CST",
        ));
        assert!(t.search_window_start.is_some());
        assert_eq!(t.search_window_end, None);
        assert_eq!(t.search_window_duration, None);
        assert_eq!(t.time_period, TimePeriod::BusinessHours);
    }

    #[test]
    fn test_stats_tally_failures() {
        let records = vec![
            record(None, "01/03/2025, 09:00:00 AM CST"),
            record(Some("bad\nworse"), "not a time"),
            record(
                Some("01/05/2025, 01:00:00 AM CST\n01/01/2025, 01:00:00 AM CST"),
                "01/05/2025, 07:00:00 PM CST",
            ),
        ];
        let (parsed, stats) = parse_records(records);
        assert_eq!(parsed.len(), 3);
        assert_eq!(stats.search_time_unparsed, 1);
        assert_eq!(stats.time_frame_unparsed, 1);
        assert_eq!(stats.negative_window_durations, 1);
        assert_eq!(parsed[2].search_window_duration, Some(Duration::days(-4)));
        assert_eq!(parsed[2].time_period, TimePeriod::Evening);
    }
}
