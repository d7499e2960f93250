//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format an elapsed duration compactly
///
/// Shows the two most significant units.
///
/// # Examples
/// ```
/// use sdgdash::logic::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "0s");
/// assert_eq!(format_elapsed(45), "45s");
/// assert_eq!(format_elapsed(61), "1m 1s");
/// assert_eq!(format_elapsed(3660), "1h 1m");
/// ```
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// SDG scores arrive as fractions; show them as percentages
pub fn format_score(score: f64) -> String {
    if score <= 1.0 {
        format!("{:.1}%", score * 100.0)
    } else {
        format!("{:.1}", score)
    }
}

/// Horizontal bar of `width` cells filled to `value / max`
pub fn render_bar(value: f64, max: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let fraction = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate to a display width, ending in `…` when cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_units() {
        assert_eq!(format_elapsed(59), "59s");
        assert_eq!(format_elapsed(60), "1m 0s");
        assert_eq!(format_elapsed(3599), "59m 59s");
        assert_eq!(format_elapsed(3600), "1h 0m");
        assert_eq!(format_elapsed(7322), "2h 2m");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.823), "82.3%");
        assert_eq!(format_score(1.0), "100.0%");
        assert_eq!(format_score(42.0), "42.0");
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(render_bar(20.0, 10.0, 3), "███");
        assert_eq!(render_bar(1.0, 0.0, 2), "░░");
        assert_eq!(render_bar(1.0, 1.0, 0), "");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("climate_report.csv", 8), "climate…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
