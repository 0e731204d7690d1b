use chrono::{DateTime, Local, NaiveDateTime};

/// Timestamp layouts the server is known to emit without an offset
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Display layout matching en-US "medium date, short time": `Jan 5, 2026, 3:04 PM`
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Format an ISO timestamp for display, or `missing` when there is none.
/// Offset-less timestamps are shown as-is, as local wall-clock time.
pub fn format_datetime(value: Option<&str>, missing: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => missing.to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => raw.to_string(),
        },
    }
}

/// Format an amount as its shortest decimal form (`1500`, `12.5`)
pub fn format_amount(value: f64) -> String {
    format!("{}", value)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or blank
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_naive() {
        assert_eq!(
            format_datetime(Some("2026-01-05T15:04:00"), "TBD"),
            "Jan 5, 2026, 3:04 PM"
        );
        assert_eq!(
            format_datetime(Some("2025-11-20T09:30:00.123456"), "TBD"),
            "Nov 20, 2025, 9:30 AM"
        );
        assert_eq!(
            format_datetime(Some("2025-12-31T00:00"), "TBD"),
            "Dec 31, 2025, 12:00 AM"
        );
    }

    #[test]
    fn test_format_datetime_missing() {
        assert_eq!(format_datetime(None, "TBD"), "TBD");
        assert_eq!(format_datetime(Some(""), "N/A"), "N/A");
        assert_eq!(format_datetime(Some("   "), "N/A"), "N/A");
    }

    #[test]
    fn test_format_datetime_unparseable_passes_through() {
        assert_eq!(format_datetime(Some("next tuesday"), "TBD"), "next tuesday");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1500.0), "1500");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(12.25), "12.25");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Café au lait", 7), "Café...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some("Quad"), "TBD"), "Quad");
        assert_eq!(format_optional(None, "TBD"), "TBD");
        assert_eq!(format_optional(Some(""), "Not specified"), "Not specified");
    }
}
