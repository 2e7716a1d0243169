//! Voluntary prayer times.
//!
//! The night runs from Maghrib to the following Fajr. Tahajjud opens the last seventh of it,
//! Ishraq follows sunrise by twenty minutes and Duha follows Ishraq by twenty more.

use std::collections::BTreeMap;

use salah_clock::shift;
use salah_types::{ClockTime, Prayer, PrayerTimeSet, Result, SalahError, VoluntaryTimeSet};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Minutes from sunrise to Ishraq.
pub const ISHRAQ_AFTER_SUNRISE: i64 = 20;
/// Minutes from Ishraq to Duha.
pub const DUHA_AFTER_ISHRAQ: i64 = 20;
/// Tahajjud starts at the last `1 / NIGHT_PARTS` of the night.
pub const NIGHT_PARTS: i64 = 7;
/// Minutes since midnight of the stand-in used by [`MissingTimePolicy::Lenient`].
pub const FALLBACK_MINUTES: i64 = 6 * 60;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// What [`derive_from_records`] does when a record is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTimePolicy {
    /// Report [`SalahError::MissingTime`].
    #[default]
    Strict,
    /// Substitute `06:00` and log a warning.
    Lenient,
}

fn fallback_time() -> ClockTime {
    ClockTime::from_minutes(FALLBACK_MINUTES)
}

fn night_minutes(maghrib: ClockTime, fajr: ClockTime) -> i64 {
    (i64::from(fajr.minutes_since_midnight()) - i64::from(maghrib.minutes_since_midnight()))
        .rem_euclid(MINUTES_PER_DAY)
}

/// Hours from Maghrib to the following Fajr.
///
/// # Example
/// ```rust
/// use salah_types::ClockTime;
///
/// let maghrib = ClockTime::from_hm(18, 0).unwrap();
/// let fajr = ClockTime::from_hm(5, 0).unwrap();
/// assert_eq!(salah_voluntary::night_duration(maghrib, fajr), 11.0);
/// ```
pub fn night_duration(maghrib: ClockTime, fajr: ClockTime) -> f64 {
    night_minutes(maghrib, fajr) as f64 / 60.0
}

fn derive(fajr: ClockTime, sunrise: ClockTime, maghrib: ClockTime) -> VoluntaryTimeSet {
    let last_part = night_minutes(maghrib, fajr) / NIGHT_PARTS;
    let ishraq = shift(sunrise, ISHRAQ_AFTER_SUNRISE);
    VoluntaryTimeSet {
        tahajjud: shift(fajr, -last_part),
        ishraq,
        duha: shift(ishraq, DUHA_AFTER_ISHRAQ),
    }
}

/// Derives Tahajjud, Ishraq and Duha from Fajr, Sunrise and Maghrib.
pub fn derive_voluntary_times(times: &PrayerTimeSet) -> VoluntaryTimeSet {
    derive(
        times.get(Prayer::Fajr),
        times.get(Prayer::Sunrise),
        times.get(Prayer::Maghrib),
    )
}

/// Derives the voluntary times from persisted `name -> HH:mm` records.
///
/// Only `Fajr`, `Sunrise` and `Maghrib` are read; other keys are ignored.
///
/// # Errors
/// `InvalidTime` for an unparseable value under either policy, `MissingTime` for an absent key
/// under [`MissingTimePolicy::Strict`].
#[instrument(level = "debug", skip(records))]
pub fn derive_from_records(
    records: &BTreeMap<String, String>,
    policy: MissingTimePolicy,
) -> Result<VoluntaryTimeSet> {
    let lookup = |prayer: Prayer| -> Result<ClockTime> {
        match records.get(prayer.name()) {
            Some(raw) => raw.parse(),
            None => match policy {
                MissingTimePolicy::Strict => Err(SalahError::MissingTime {
                    name: prayer.name().to_string(),
                }),
                MissingTimePolicy::Lenient => {
                    let fallback = fallback_time();
                    warn!(prayer = %prayer, %fallback, "missing time, using fallback");
                    Ok(fallback)
                }
            },
        }
    };

    Ok(derive(
        lookup(Prayer::Fajr)?,
        lookup(Prayer::Sunrise)?,
        lookup(Prayer::Maghrib)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn times(fajr: &str, sunrise: &str, maghrib: &str) -> PrayerTimeSet {
        PrayerTimeSet::new([
            hm(fajr),
            hm(sunrise),
            hm("12:30"),
            hm("15:45"),
            hm(maghrib),
            hm(maghrib),
            hm("19:30"),
        ])
    }

    fn records(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_night_duration_wraps_midnight() {
        assert_eq!(night_duration(hm("18:00"), hm("05:00")), 11.0);
        assert_eq!(night_duration(hm("19:30"), hm("04:15")), 8.75);
        assert_eq!(night_duration(hm("00:04"), hm("01:30")), 1.4333333333333333);
    }

    #[test]
    fn test_derive_voluntary_times() {
        let derived = derive_voluntary_times(&times("05:00", "06:10", "18:00"));
        // 660 / 7 = 94 minutes before Fajr
        assert_eq!(derived.tahajjud, hm("03:26"));
        assert_eq!(derived.ishraq, hm("06:30"));
        assert_eq!(derived.duha, hm("06:50"));
    }

    #[test]
    fn test_ishraq_and_duha_wrap_midnight() {
        let derived = derive_voluntary_times(&times("23:00", "23:50", "21:00"));
        assert_eq!(derived.ishraq, hm("00:10"));
        assert_eq!(derived.duha, hm("00:30"));
        assert_eq!(derived.tahajjud, hm("22:43"));
    }

    #[test]
    fn test_tahajjud_wraps_before_midnight() {
        let derived = derive_voluntary_times(&times("00:30", "02:00", "17:00"));
        // 450 / 7 = 64
        assert_eq!(derived.tahajjud, hm("23:26"));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let source = times("05:12", "06:33", "18:41");
        assert_eq!(derive_voluntary_times(&source), derive_voluntary_times(&source));
    }

    #[test]
    fn test_records_match_typed_input() {
        let source = times("05:00", "06:10", "18:00");
        let from_records =
            derive_from_records(&source.to_map(), MissingTimePolicy::Strict).unwrap();
        assert_eq!(from_records, derive_voluntary_times(&source));
    }

    #[test]
    fn test_strict_policy_reports_missing_key() {
        let map = records(&[("Fajr", "05:00"), ("Maghrib", "18:00")]);
        let err = derive_from_records(&map, MissingTimePolicy::Strict).unwrap_err();
        assert_eq!(err, SalahError::MissingTime { name: "Sunrise".into() });
    }

    #[test]
    fn test_lenient_policy_uses_fallback() {
        let map = records(&[("Fajr", "05:00"), ("Maghrib", "18:00")]);
        let derived = derive_from_records(&map, MissingTimePolicy::Lenient).unwrap();
        assert_eq!(derived.ishraq, hm("06:20"));
        assert_eq!(derived.duha, hm("06:40"));
        assert_eq!(derived.tahajjud, hm("03:26"));

        let derived = derive_from_records(&BTreeMap::new(), MissingTimePolicy::Lenient).unwrap();
        // empty night: Tahajjud collapses onto Fajr
        assert_eq!(derived.tahajjud, hm("06:00"));
    }

    #[test]
    fn test_invalid_record_is_error_under_either_policy() {
        let map = records(&[("Fajr", "5am"), ("Sunrise", "06:10"), ("Maghrib", "18:00")]);
        for policy in [MissingTimePolicy::Strict, MissingTimePolicy::Lenient] {
            assert!(matches!(
                derive_from_records(&map, policy),
                Err(SalahError::InvalidTime { .. })
            ));
        }
    }
}
