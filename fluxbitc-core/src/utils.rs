//! Formatting helpers for the run summary.

use std::time::Duration;

/// Formats ffprobe's decimal-seconds duration (`"12.345000"`) as
/// `HH:MM:SS.mmm`. Returns `None` when the text is not a non-negative number.
#[must_use]
pub fn format_probe_duration(duration: &str) -> Option<String> {
    let seconds: f64 = duration.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    let total_millis = (seconds * 1000.0).round() as u64;
    let (total_secs, millis) = (total_millis / 1000, total_millis % 1000);
    Some(format!(
        "{:02}:{:02}:{:02}.{millis:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    ))
}

/// Compact wall-clock time for an encode: `4.2s`, `3m 07s`, `1h 02m 05s`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match (secs / 3600, (secs % 3600) / 60, secs % 60) {
        (0, 0, _) => format!("{:.1}s", elapsed.as_secs_f64()),
        (0, m, s) => format!("{m}m {s:02}s"),
        (h, m, s) => format!("{h}h {m:02}m {s:02}s"),
    }
}

/// Output file size in decimal units, as shown by most file managers.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["kB", "MB", "GB", "TB"];

    if bytes < 1000 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1000.0;
    let mut unit = UNITS[0];
    for next in UNITS[1..].iter().copied() {
        if size < 1000.0 {
            break;
        }
        size /= 1000.0;
        unit = next;
    }
    format!("{size:.1} {unit}")
}
