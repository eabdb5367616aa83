/// Shared formatting utilities for the UI layer.
use chrono::{DateTime, Datelike, Utc};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun",
    "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format a timestamp as "20 Jan 2026".
pub fn format_date(date: &DateTime<Utc>) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Age of `date` relative to `now`, in Indonesian ("3 hari yang lalu").
pub fn format_relative(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = *now - *date;
    let days = elapsed.num_days();
    if days >= 30 {
        return format_date(date);
    }
    if days >= 1 {
        return format!("{days} hari yang lalu");
    }
    let hours = elapsed.num_hours();
    if hours >= 1 {
        return format!("{hours} jam yang lalu");
    }
    "Baru saja".to_string()
}

/// Human-readable byte size, e.g. "1.5 MB".
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

/// First letters of up to two words, uppercased, for avatar fallbacks.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}
