//! Formatting helpers for file metadata.

/// Format a byte count compactly (e.g., "512B", "1.2K", "3.4M").
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1}M", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}K", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a Unix timestamp as an ISO date (YYYY-MM-DD).
///
/// NDNFS versions are modification times in seconds.
pub fn format_date_iso(timestamp: u64) -> String {
    let mut remaining_days = (timestamp / 86400) as i64;
    let mut year = 1970i64;

    while remaining_days >= days_in_year(year) {
        remaining_days -= days_in_year(year);
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let months: [i64; 12] = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut month = 1;
    for days in months {
        if remaining_days < days {
            break;
        }
        remaining_days -= days;
        month += 1;
    }

    format!("{:04}-{:02}-{:02}", year, month, remaining_days + 1)
}

fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) { 366 } else { 365 }
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Segment count with unit, e.g. "1 segment", "12 segments".
pub fn format_segments(count: u32) -> String {
    if count == 1 {
        "1 segment".to_string()
    } else {
        format!("{} segments", count)
    }
}
