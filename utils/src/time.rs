//! Time formatting helpers.

/// Format a duration in seconds as its two most significant units.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Human summary of the time left before a proposal closes.
pub fn format_remaining(secs: u64) -> String {
    if secs == 0 {
        "closed".to_string()
    } else {
        format!("closes in {}", format_duration(secs))
    }
}
