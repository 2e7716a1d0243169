//! Time-of-day arithmetic and display formatting.
//!
//! All arithmetic works on canonical 24-hour `HH:mm` strings and wraps at midnight in both
//! directions, keeping only the time-of-day component.

use chrono::{Duration, NaiveTime};
use salah_types::{ClockTime, Result, SalahError, TimeFormat};
use tracing::debug;

const MINUTES_PER_DAY: i64 = 24 * 60;
const TWELVE_HOUR_SUFFIX: &str = "%I:%M %p";
const TWELVE_HOUR_NO_SUFFIX: &str = "%I:%M";

fn parse_canonical(source: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(source.trim(), ClockTime::CANONICAL_FORMAT)
        .map_err(|_| SalahError::invalid_time(source))
}

/// Shifts a clock time by a signed number of minutes, wrapping around midnight.
pub fn shift(time: ClockTime, minutes: i64) -> ClockTime {
    let (shifted, _) = time
        .as_naive()
        .overflowing_add_signed(Duration::minutes(minutes.rem_euclid(MINUTES_PER_DAY)));
    ClockTime::from_naive(shifted)
}

/// Adds `minutes` to an `HH:mm` string.
///
/// # Errors
/// `InvalidTime` when `source` is not `HH:mm`.
///
/// # Example
/// ```rust
/// assert_eq!(salah_clock::add_minutes(90, "23:30").unwrap(), "01:00");
/// ```
pub fn add_minutes(minutes: i64, source: &str) -> Result<String> {
    let time = ClockTime::from_naive(parse_canonical(source)?);
    Ok(shift(time, minutes).to_string())
}

/// Subtracts `minutes` from an `HH:mm` string.
///
/// # Example
/// ```rust
/// assert_eq!(salah_clock::subtract_minutes(90, "00:30").unwrap(), "23:00");
/// ```
pub fn subtract_minutes(minutes: i64, source: &str) -> Result<String> {
    add_minutes(-(minutes % MINUTES_PER_DAY), source)
}

/// Renders a clock time in the preferred display format.
pub fn format_time(time: ClockTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => time.to_string(),
        TimeFormat::H12Suffix => time.as_naive().format(TWELVE_HOUR_SUFFIX).to_string(),
        TimeFormat::H12NoSuffix => time.as_naive().format(TWELVE_HOUR_NO_SUFFIX).to_string(),
    }
}

/// Strict display conversion of a canonical `HH:mm` string.
///
/// # Errors
/// `InvalidTime` when `canonical` is not `HH:mm`.
pub fn try_format_for_display(canonical: &str, format: TimeFormat) -> Result<String> {
    let time = parse_canonical(canonical)?;
    Ok(format_time(ClockTime::from_naive(time), format))
}

/// Display conversion that hands unparseable input back unchanged.
///
/// Use [`try_format_for_display`] to get an error instead.
pub fn format_for_display(canonical: &str, format: TimeFormat) -> String {
    match try_format_for_display(canonical, format) {
        Ok(formatted) => formatted,
        Err(err) => {
            debug!(input = canonical, error = %err, "passing unparseable time through unchanged");
            canonical.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_minutes_rolls_forward_past_midnight() {
        assert_eq!(add_minutes(90, "23:30").unwrap(), "01:00");
        assert_eq!(add_minutes(20, "06:10").unwrap(), "06:30");
        assert_eq!(add_minutes(24 * 60, "12:00").unwrap(), "12:00");
        assert_eq!(add_minutes(i64::MAX, "00:00").unwrap(), add_minutes(i64::MAX % 1440, "00:00").unwrap());
    }

    #[test]
    fn test_subtract_minutes_rolls_backward_past_midnight() {
        assert_eq!(subtract_minutes(90, "00:30").unwrap(), "23:00");
        assert_eq!(subtract_minutes(94, "05:00").unwrap(), "03:26");
        assert_eq!(subtract_minutes(-30, "23:45").unwrap(), "00:15");
        assert_eq!(subtract_minutes(i64::MIN, "00:30").unwrap(), "18:38");
    }

    #[test]
    fn test_arithmetic_rejects_bad_source() {
        assert!(matches!(
            add_minutes(5, "25:00"),
            Err(SalahError::InvalidTime { .. })
        ));
        assert!(subtract_minutes(5, "").is_err());
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format_for_display("13:05", TimeFormat::H12Suffix), "01:05 PM");
        assert_eq!(format_for_display("13:05", TimeFormat::H12NoSuffix), "01:05");
        assert_eq!(format_for_display("13:05", TimeFormat::H24), "13:05");
        assert_eq!(format_for_display("00:15", TimeFormat::H12Suffix), "12:15 AM");
        assert_eq!(format_for_display("12:00", TimeFormat::H12Suffix), "12:00 PM");
        assert_eq!(format_for_display(" 13:05", TimeFormat::H24), "13:05");
        assert_eq!(try_format_for_display("13:05 ", TimeFormat::H24).unwrap(), "13:05");
    }

    #[test]
    fn test_display_passes_garbage_through() {
        assert_eq!(format_for_display("-----", TimeFormat::H12Suffix), "-----");
        assert_eq!(format_for_display("7pm", TimeFormat::H24), "7pm");
        assert!(try_format_for_display("-----", TimeFormat::H12Suffix).is_err());
        assert!(try_format_for_display("7pm", TimeFormat::H24).is_err());
    }
}
