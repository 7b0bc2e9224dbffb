//! Number and text formatting for console reports.

/// Formats a number with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use lpr_audit_tools::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// `part / whole * 100`, or 0 when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// Shortens `text` to at most `max` characters for fixed-width columns,
/// flattening embedded newlines.
///
/// ```
/// use lpr_audit_tools::utils::format::truncate;
///
/// assert_eq!(truncate("stolen vehicle", 20), "stolen vehicle");
/// assert_eq!(truncate("background check on neighbor", 12), "backgroun...");
/// ```
pub fn truncate(text: &str, max: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let keep = max.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Display form of an optional cell.
pub fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or("(null)")
}
