// Utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parses a feed timestamp into `DateTime<Utc>`, if possible. The feed
/// mixes RFC 3339 strings, bare datetimes and bare dates.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = date_str.parse::<NaiveDateTime>() {
        return Some(Utc.from_utc_datetime(&naive));
    }
    date_str
        .parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Converts the `"3d"` / `"2w"` time-window shorthand into hours.
/// Returns `None` for anything that does not match `[0-9]+[dw]`.
pub fn parse_since_when(since_when: &str) -> Option<u64> {
    if since_when.len() < 2 || !since_when.is_ascii() {
        return None;
    }
    let (value, unit) = since_when.split_at(since_when.len() - 1);
    let value: u64 = value.parse().ok()?;
    match unit {
        "d" => Some(value * 24),
        "w" => Some(value * 24 * 7),
        _ => None,
    }
}

/// Formats an integer amount with comma thousands separators.
pub fn format_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
