//! Duration parsing and formatting.
//!
//! All session durations in plunge are whole seconds.

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds compactly, e.g. "45s", "2m", "2m 30s", "1h 5m".
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        return if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        };
    }

    match (minutes, secs) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Parse a duration string like "90s", "2m", "1m30s" or "1h" into seconds.
///
/// A bare number is taken as minutes. Returns `None` for empty, zero or
/// malformed input.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return minutes.checked_mul(60).filter(|secs| *secs > 0);
    }

    let mut total: u32 = 0;
    let mut current = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if c.is_whitespace() {
            continue;
        } else {
            let num: u32 = current.parse().ok()?;
            current.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total = total.checked_add(num.checked_mul(unit)?)?;
        }
    }

    // Trailing number without unit counts as minutes
    if !current.is_empty() {
        let num: u32 = current.parse().ok()?;
        total = total.checked_add(num.checked_mul(60)?)?;
    }

    (total > 0).then_some(total)
}

/// Render a progress bar for a fraction in `0.0..=1.0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(1500), "25:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(120), "2m");
        assert_eq!(format_duration(150), "2m 30s");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3900), "1h 5m");
    }

    #[test]
    fn test_parse_bare_minutes() {
        assert_eq!(parse_duration("2"), Some(120));
        assert_eq!(parse_duration("0"), None);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("2m"), Some(120));
        assert_eq!(parse_duration("1m30s"), Some(90));
        assert_eq!(parse_duration("1h"), Some(3600));
        assert_eq!(parse_duration("1m 30s"), Some(90));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("5x"), None);
    }

    #[test]
    fn test_render_progress_bar() {
        assert_eq!(render_progress_bar(0.5, 4), "[██░░]");
        assert_eq!(render_progress_bar(1.5, 2), "[██]");
    }
}
