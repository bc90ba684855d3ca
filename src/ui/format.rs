// Rampart - ui/format.rs
//
// Shared display formatting for sizes and timestamps. The repository,
// scan, and profile pages all render the same wire values, so the
// helpers live here rather than per page.

use chrono::{DateTime, Utc};

/// Human-readable byte size, base 1024, trailing zeros trimmed.
///
/// Matches the console's established rendering: "0 Bytes", "100 KB",
/// "24.31 MB".
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    // Two decimals, then trim "24.30" to "24.3" and "100.00" to "100".
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", UNITS[exponent])
}

/// Full timestamp with seconds, as the backend records them.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Compact timestamp without seconds, for dense table rows.
pub fn format_timestamp_short(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten `s` to at most `max` characters by dropping the front.
///
/// Truncates from the LEFT so the filename extension stays visible in
/// fixed-width table columns.
pub fn truncate_left(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max - 1)..].iter().collect();
        format!("\u{2026}{tail}")
    }
}
