//! Human-readable duration, size and percentage formatting.

/// Format seconds as `"Xd Yh Zm"`, dropping the day part when zero
/// (`"Xh Ym"`).
pub fn fmt_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}

/// Format a gigabyte quantity without trailing zeros: `"9.92 GB"`,
/// `"16 GB"`, `"2.4 GB"`.
pub fn fmt_gb(gb: f64) -> String {
    format!("{} GB", trim_decimal(gb))
}

/// Format a used / total pair: `"9.92 / 16 GB"`.
pub fn fmt_gb_usage(used: f64, total: f64) -> String {
    format!("{} / {} GB", trim_decimal(used), trim_decimal(total))
}

fn trim_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".into()
    } else {
        trimmed.to_owned()
    }
}

/// `part / whole` as a percentage. Zero when `whole` is zero.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Render a percentage bar split into filled and empty portions.
///
/// Returns `(filled, empty)` strings of `█` and `░` characters that together
/// span `width` character positions. Caller applies styling per segment.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_pct_bar(pct: f64, width: u16) -> (String, String) {
    let clamped = pct.clamp(0.0, 100.0);
    let filled_count = ((clamped / 100.0) * f64::from(width)).round() as u16;
    let empty_count = width.saturating_sub(filled_count);
    (
        "█".repeat(usize::from(filled_count)),
        "░".repeat(usize::from(empty_count)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_omits_zero_days() {
        assert_eq!(fmt_uptime(1_324_980), "15d 8h 3m");
        assert_eq!(fmt_uptime(3 * 3600 + 25 * 60 + 59), "3h 25m");
        assert_eq!(fmt_uptime(0), "0h 0m");
        assert_eq!(fmt_uptime(86_400), "1d 0h 0m");
    }

    #[test]
    fn gb_strings_trim_trailing_zeros() {
        assert_eq!(fmt_gb(9.92), "9.92 GB");
        assert_eq!(fmt_gb(16.0), "16 GB");
        assert_eq!(fmt_gb(2.4), "2.4 GB");
        assert_eq!(fmt_gb_usage(9.92, 16.0), "9.92 / 16 GB");
        assert_eq!(fmt_gb(0.0), "0 GB");
    }

    #[test]
    fn pct_with_zero_denominator_is_zero() {
        assert!(pct(5, 0).abs() < f64::EPSILON);
        assert!((pct(45, 100) - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_bar_spans_width() {
        let (filled, empty) = fmt_pct_bar(62.0, 10);
        assert_eq!(filled.chars().count(), 6);
        assert_eq!(empty.chars().count(), 4);
        let (filled, _) = fmt_pct_bar(250.0, 4);
        assert_eq!(filled.chars().count(), 4);
    }
}
