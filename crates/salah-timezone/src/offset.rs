//! `±HH:MM` offset strings.

use salah_types::{Result, SalahError, TimezoneOffset};

/// Parses a UTC offset string into decimal hours.
///
/// Accepts `±HH:MM`, `±HHMM`, `±HH`, `Z`, `UTC` and `GMT`, optionally prefixed by `UTC` or
/// `GMT` (`UTC+05:30`). Minutes are converted as a true fraction of an hour, so `+05:30` is
/// `5.5` and `+05:45` is `5.75`.
///
/// # Errors
/// `TimezoneResolution` for anything else, or an offset outside [-12, 14] hours.
///
/// # Example
/// ```rust
/// use salah_timezone::parse_utc_offset;
///
/// assert_eq!(parse_utc_offset("+05:30").unwrap().hours(), 5.5);
/// assert_eq!(parse_utc_offset("-03:45").unwrap().hours(), -3.75);
/// ```
pub fn parse_utc_offset(input: &str) -> Result<TimezoneOffset> {
    let invalid = || SalahError::timezone_resolution(format!("Unparseable UTC offset {input:?}"));

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let body = trimmed
        .strip_prefix("UTC")
        .or_else(|| trimmed.strip_prefix("GMT"))
        .unwrap_or(trimmed);
    if body.is_empty() || body == "Z" {
        return Ok(TimezoneOffset::UTC);
    }

    let (sign, digits) = match body.as_bytes()[0] {
        b'+' => (1.0, &body[1..]),
        b'-' => (-1.0, &body[1..]),
        _ => return Err(invalid()),
    };

    if !digits.is_ascii() {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    if hours.is_empty()
        || hours.len() > 2
        || minutes.len() > 2
        || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    let value = sign * (f64::from(hours) + f64::from(minutes) / 60.0);
    TimezoneOffset::new(value).map_err(|e| SalahError::timezone_resolution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(input: &str) -> f64 {
        parse_utc_offset(input).unwrap().hours()
    }

    #[test]
    fn test_minutes_are_fractions_of_an_hour() {
        assert_eq!(hours("+05:00"), 5.0);
        assert_eq!(hours("+05:30"), 5.5);
        assert_eq!(hours("+05:45"), 5.75);
        assert_eq!(hours("-09:30"), -9.5);
        assert_eq!(hours("+0530"), 5.5);
    }

    #[test]
    fn test_short_and_named_forms() {
        assert_eq!(hours("+03"), 3.0);
        assert_eq!(hours("-7"), -7.0);
        assert_eq!(hours("Z"), 0.0);
        assert_eq!(hours("UTC"), 0.0);
        assert_eq!(hours("GMT"), 0.0);
        assert_eq!(hours("UTC+04:00"), 4.0);
        assert_eq!(hours(" +01:00 "), 1.0);
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "", "05:30", "+5:3x", "+05:60", "+123", "Asia/Karachi", "+", "+:30", "+15:00", "+1é1",
            "-1é1",
        ] {
            let err = parse_utc_offset(input).unwrap_err();
            assert!(
                matches!(err, SalahError::TimezoneResolution { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }
}
