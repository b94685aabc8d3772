//! Time formatting for clip cards

/// Format seconds as `M:SS`
///
/// Both components are floored; minutes are not padded and grow past 59
/// (`3600` renders as `60:00`). Negative or non-finite input renders `0:00`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a `start - end` range, e.g. `0:25 - 0:55`
pub fn format_range(start: f64, end: f64) -> String {
    format!("{} - {}", format_duration(start), format_duration(end))
}
