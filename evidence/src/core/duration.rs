//! Human-readable rendering of durations given in seconds.

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Render whole days, hours, and minutes, omitting zero components.
///
/// Durations under a minute fall back to whole seconds. Negative durations
/// render their magnitude with a leading `-`.
pub fn format_duration(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs();

    let days = (total / SECS_PER_DAY).floor() as u64;
    let hours = ((total % SECS_PER_DAY) / SECS_PER_HOUR).floor() as u64;
    let minutes = ((total % SECS_PER_HOUR) / SECS_PER_MINUTE).floor() as u64;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(value, _)| *value >= 1)
        .map(|(value, unit)| plural(value, unit))
        .collect();

    if parts.is_empty() {
        return format!("{sign}{}", plural(total.trunc() as u64, "second"));
    }
    format!("{sign}{}", parts.join(", "))
}

fn plural(value: u64, unit: &str) -> String {
    if value == 1 {
        format!("{value} {unit}")
    } else {
        format!("{value} {unit}s")
    }
}
