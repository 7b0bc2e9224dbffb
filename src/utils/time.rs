use chrono::{Duration, NaiveDateTime};

/// Layout of access-log timestamps without the trailing zone token,
/// e.g. `01/15/2025, 10:30:00 PM`.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Parse an access-log timestamp such as `01/15/2025, 10:30:00 PM CST`.
///
/// The trailing zone abbreviation is required but only consumed; the
/// result is the wall-clock time as written. Returns `None` when the string
/// does not match the pattern.
pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    let (datetime, zone) = ts.trim().rsplit_once(char::is_whitespace)?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    // The AM/PM marker is itself alphabetic, so a missing zone would leave
    // "AM"/"PM" as the zone token and the rest would fail to parse.
    NaiveDateTime::parse_from_str(datetime.trim_end(), TIMESTAMP_FORMAT).ok()
}

/// Format a timestamp for display
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Render a duration in human-readable form; negative spans keep their sign.
pub fn duration_human(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.abs();

    if seconds < 60 {
        format!("{}{} seconds", sign, seconds)
    } else if seconds < 3600 {
        format!("{}{} minutes", sign, seconds / 60)
    } else if seconds < 86400 {
        format!("{}{:.1} hours", sign, seconds as f64 / 3600.0)
    } else {
        format!("{}{:.1} days", sign, seconds as f64 / 86400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_timestamp("10/06/2025, 07:26:03 PM CDT").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 10);
        assert_eq!(dt.day(), 6);
        assert_eq!(dt.hour(), 19);
        assert_eq!(dt.minute(), 26);
        assert_eq!(dt.second(), 3);
    }

    #[test]
    fn test_parse_midnight_and_noon() {
        let midnight = parse_timestamp("01/01/2025, 12:00:00 AM CST").unwrap();
        assert_eq!(midnight.hour(), 0);
        let noon = parse_timestamp("01/01/2025, 12:00:00 PM CST").unwrap();
        assert_eq!(noon.hour(), 12);
    }

    #[test]
    fn test_zone_token_required() {
        assert!(parse_timestamp("01/15/2025, 10:30:00 PM").is_none());
        assert!(parse_timestamp("01/15/2025, 10:30:00 PM -0600").is_none());
    }

    #[test]
    fn test_rejects_other_layouts() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2025-01-15T22:30:00Z").is_none());
        assert!(parse_timestamp("01/15/2025 10:30:00 PM CST").is_none());
        assert!(parse_timestamp("13/15/2025, 10:30:00 PM CST").is_none());
    }

    #[test]
    fn test_duration_human() {
        assert_eq!(duration_human(Duration::seconds(42)), "42 seconds");
        assert_eq!(duration_human(Duration::minutes(5)), "5 minutes");
        assert_eq!(duration_human(Duration::hours(1)), "1.0 hours");
        assert_eq!(duration_human(Duration::days(30)), "30.0 days");
        assert_eq!(duration_human(Duration::hours(-2)), "-2.0 hours");
    }
}
