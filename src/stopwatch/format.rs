//! Display formatter: `HH:MM:SS.ss`.

use std::fmt::Write;
use std::time::Duration;

const CENTIS_PER_MINUTE: u64 = 60 * 100;
const CENTIS_PER_HOUR: u64 = 60 * CENTIS_PER_MINUTE;

/// Format fractional seconds as `HH:MM:SS.ss`.
///
/// The value is rounded to whole centiseconds first, then hours and minutes
/// are floored, so seconds never read `60.00`. Hours widen past 99 and get
/// `,` grouping from 1000 on. Negative, NaN and infinite input format as
/// zero.
///
/// ```
/// assert_eq!(stopwatch::stopwatch::format_elapsed(3725.5), "01:02:05.50");
/// ```
pub fn format_elapsed(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_centis(0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let centis = (seconds * 100.0).round() as u64;
    format_centis(centis)
}

/// Format a [`Duration`] as `HH:MM:SS.ss`.
pub fn format_duration(elapsed: Duration) -> String {
    // Round half up on the nanosecond count to match `format_elapsed`.
    let nanos = elapsed.as_nanos();
    let centis = (nanos + 5_000_000) / 10_000_000;
    format_centis(u64::try_from(centis).unwrap_or(u64::MAX))
}

fn format_centis(centis: u64) -> String {
    let hours = centis / CENTIS_PER_HOUR;
    let rem = centis % CENTIS_PER_HOUR;
    let minutes = rem / CENTIS_PER_MINUTE;
    let rem = rem % CENTIS_PER_MINUTE;
    let secs = rem / 100;
    let hundredths = rem % 100;

    let mut out = group_thousands(hours);
    let _ = write!(out, ":{minutes:02}:{secs:02}.{hundredths:02}");
    out
}

/// Zero-pad to two digits and insert `,` every three digits.
fn group_thousands(value: u64) -> String {
    let digits = format!("{value:02}");
    if digits.len() <= 3 {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference_value() {
        assert_eq!(format_elapsed(3725.5), "01:02:05.50");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_elapsed(0.0), "00:00:00.00");
        assert_eq!(format_duration(Duration::ZERO), "00:00:00.00");
    }

    #[test]
    fn test_format_rounds_seconds_not_minutes() {
        assert_eq!(format_elapsed(1.234), "00:00:01.23");
        assert_eq!(format_elapsed(1.236), "00:00:01.24");
        assert_eq!(format_elapsed(59.999), "00:01:00.00");
        assert_eq!(format_elapsed(3599.996), "01:00:00.00");
    }

    #[test]
    fn test_format_floors_minutes_and_hours() {
        assert_eq!(format_elapsed(119.0), "00:01:59.00");
        assert_eq!(format_elapsed(7199.0), "01:59:59.00");
    }

    #[test]
    fn test_format_wide_hours() {
        assert_eq!(format_elapsed(100.0 * 3600.0), "100:00:00.00");
        assert_eq!(format_elapsed(1234.0 * 3600.0 + 61.0), "1,234:01:01.00");
    }

    #[test]
    fn test_format_invalid_input() {
        assert_eq!(format_elapsed(-5.0), "00:00:00.00");
        assert_eq!(format_elapsed(f64::NAN), "00:00:00.00");
        assert_eq!(format_elapsed(f64::INFINITY), "00:00:00.00");
    }

    #[test]
    fn test_format_duration_matches_seconds() {
        let d = Duration::from_millis(3_725_500);
        assert_eq!(format_duration(d), format_elapsed(d.as_secs_f64()));
        assert_eq!(format_duration(Duration::from_millis(7_500)), "00:00:07.50");
        assert_eq!(format_duration(Duration::from_micros(1_005_000)), "00:00:01.01");
    }
}
