//! Offset resolution for automatic (device clock) and manual (zone name) calculations.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use salah_types::{GeoCoordinate, Result, SalahError, TimezoneOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::countries::CountryTimezones;
use crate::device::DeviceClock;
use crate::offset::parse_utc_offset;

/// Where the location, and therefore the offset, came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Device fix; the device clock supplies the offset.
    Automatic,
    /// Hand-entered location; the offset comes from a zone name.
    Manual,
}

/// How a device clock offset is converted to hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomaticPrecision {
    /// Truncate toward zero to whole hours: India's +05:30 becomes 5.
    #[default]
    WholeHours,
    /// Keep sub-hour offsets: +05:30 stays 5.5.
    Exact,
}

/// Supplies the IANA zone name for a coordinate, typically from a remote timezone service.
///
/// `Ok(None)` means the service answered without a zone. Transport failures should be reported
/// as [`SalahError::NetworkError`] so callers can retry.
pub trait ZoneNameSource {
    fn zone_name(&self, coord: GeoCoordinate) -> Result<Option<String>>;
}

impl<F> ZoneNameSource for F
where
    F: Fn(GeoCoordinate) -> Result<Option<String>>,
{
    fn zone_name(&self, coord: GeoCoordinate) -> Result<Option<String>> {
        self(coord)
    }
}

/// Turns device clocks, zone names and country names into a [`TimezoneOffset`].
///
/// Never falls back to a made-up offset: anything it cannot resolve is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimezoneResolver<'a> {
    countries: Option<&'a CountryTimezones>,
    precision: AutomaticPrecision,
}

impl<'a> TimezoneResolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables [`TimezoneResolver::resolve_by_country`].
    pub fn with_countries(mut self, countries: &'a CountryTimezones) -> Self {
        self.countries = Some(countries);
        self
    }

    pub fn precision(mut self, precision: AutomaticPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Resolves the offset for a calculation.
    ///
    /// * `Automatic` reads `device`.
    /// * `Manual` resolves `zone_name` at the instant `at`, so DST is honoured.
    ///
    /// # Errors
    /// `TimezoneResolution` when the input for the mode is absent or unparseable.
    #[instrument(level = "debug", skip(self, device))]
    pub fn resolve_offset(
        &self,
        mode: CalculationMode,
        device: Option<&DeviceClock>,
        zone_name: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<TimezoneOffset> {
        match mode {
            CalculationMode::Automatic => {
                let device = device.ok_or_else(|| {
                    SalahError::timezone_resolution("Automatic mode requires a device clock")
                })?;
                self.device_offset(device)
            }
            CalculationMode::Manual => {
                let name = zone_name.ok_or_else(|| {
                    SalahError::timezone_resolution("Manual mode requires a zone name")
                })?;
                resolve_zone_name(name, at)
            }
        }
    }

    /// Offset of a device clock at the configured precision.
    pub fn device_offset(&self, device: &DeviceClock) -> Result<TimezoneOffset> {
        let seconds = device.total_offset_secs();
        let offset = match self.precision {
            // integer division truncates toward zero
            AutomaticPrecision::WholeHours => TimezoneOffset::new(f64::from(seconds / 3600)),
            AutomaticPrecision::Exact => TimezoneOffset::from_seconds(seconds),
        };
        offset.map_err(|e| SalahError::timezone_resolution(e.to_string()))
    }

    /// Looks up the zone name for `coord` through `source`, then resolves it.
    ///
    /// # Errors
    /// Errors from `source` pass through unchanged; a missing or blank name is
    /// `TimezoneResolution`.
    #[instrument(level = "debug", skip(self, source))]
    pub fn resolve_manual_with<S>(
        &self,
        source: &S,
        coord: GeoCoordinate,
        at: DateTime<Utc>,
    ) -> Result<TimezoneOffset>
    where
        S: ZoneNameSource + ?Sized,
    {
        let name = source.zone_name(coord)?.ok_or_else(|| {
            SalahError::timezone_resolution(format!("No zone name returned for {coord}"))
        })?;
        resolve_zone_name(&name, at)
    }

    /// Standard offset of a country from the injected dataset.
    pub fn resolve_by_country(&self, country: &str) -> Result<TimezoneOffset> {
        let countries = self.countries.ok_or_else(|| {
            SalahError::timezone_resolution("No country dataset configured")
        })?;
        countries.offset_for(country)
    }
}

/// Offset of an IANA zone name (`Asia/Karachi`) or a literal `±HH:MM` at the instant `at`.
///
/// # Errors
/// `TimezoneResolution` when the name is blank or unknown.
pub fn resolve_zone_name(name: &str, at: DateTime<Utc>) -> Result<TimezoneOffset> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SalahError::timezone_resolution("Zone name is empty"));
    }
    if name.starts_with(['+', '-']) {
        return parse_utc_offset(name);
    }

    let tz: Tz = name
        .parse()
        .map_err(|_| SalahError::timezone_resolution(format!("Unknown zone name {name:?}")))?;
    let seconds = tz.offset_from_utc_datetime(&at.naive_utc()).fix().local_minus_utc();
    debug!(zone = %tz, seconds, "resolved zone name");
    TimezoneOffset::from_seconds(seconds).map_err(|e| SalahError::timezone_resolution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn karachi() -> GeoCoordinate {
        GeoCoordinate::new(24.8607, 67.0011).unwrap()
    }

    #[test]
    fn test_automatic_truncates_to_whole_hours_by_default() {
        let india = DeviceClock::new(19800, 0, false);
        let resolver = TimezoneResolver::new();
        let offset = resolver
            .resolve_offset(CalculationMode::Automatic, Some(&india), None, at(2024, 3, 15))
            .unwrap();
        // sub-hour offsets are lost in this mode
        assert_eq!(offset.hours(), 5.0);

        let exact = TimezoneResolver::new().precision(AutomaticPrecision::Exact);
        assert_eq!(exact.device_offset(&india).unwrap().hours(), 5.5);
    }

    #[test]
    fn test_automatic_truncates_toward_zero() {
        let newfoundland = DeviceClock::new(-12600, 0, false);
        assert_eq!(TimezoneResolver::new().device_offset(&newfoundland).unwrap().hours(), -3.0);

        let exact = TimezoneResolver::new().precision(AutomaticPrecision::Exact);
        assert_eq!(exact.device_offset(&newfoundland).unwrap().hours(), -3.5);
    }

    #[test]
    fn test_automatic_includes_dst() {
        let berlin_summer = DeviceClock::new(3600, 3600, true);
        assert_eq!(TimezoneResolver::new().device_offset(&berlin_summer).unwrap().hours(), 2.0);
    }

    #[test]
    fn test_automatic_without_device_fails() {
        let err = TimezoneResolver::new()
            .resolve_offset(CalculationMode::Automatic, None, None, at(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, SalahError::TimezoneResolution { .. }));
    }

    #[test]
    fn test_manual_zone_names() {
        let resolver = TimezoneResolver::new();
        let resolve = |name: &str, when| {
            resolver
                .resolve_offset(CalculationMode::Manual, None, Some(name), when)
                .map(|o| o.hours())
        };

        assert_eq!(resolve("Asia/Karachi", at(2024, 3, 15)).unwrap(), 5.0);
        assert_eq!(resolve("Asia/Kolkata", at(2024, 3, 15)).unwrap(), 5.5);
        assert_eq!(resolve("Asia/Kathmandu", at(2024, 3, 15)).unwrap(), 5.75);
        assert_eq!(resolve("Europe/London", at(2024, 1, 15)).unwrap(), 0.0);
        assert_eq!(resolve("Europe/London", at(2024, 7, 15)).unwrap(), 1.0);
        assert_eq!(resolve("+05:30", at(2024, 7, 15)).unwrap(), 5.5);
    }

    #[test]
    fn test_manual_rejects_missing_or_unknown_zone() {
        let resolver = TimezoneResolver::new();
        for name in [None, Some(""), Some("  "), Some("Mars/Olympus_Mons"), Some("-1é1")] {
            let err = resolver
                .resolve_offset(CalculationMode::Manual, None, name, at(2024, 3, 15))
                .unwrap_err();
            assert!(matches!(err, SalahError::TimezoneResolution { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_zone_name_source() {
        let resolver = TimezoneResolver::new();
        let found =
            |_: GeoCoordinate| -> Result<Option<String>> { Ok(Some("Asia/Karachi".to_string())) };
        assert_eq!(
            resolver.resolve_manual_with(&found, karachi(), at(2024, 3, 15)).unwrap().hours(),
            5.0
        );

        let empty = |_: GeoCoordinate| -> Result<Option<String>> { Ok(None) };
        assert!(matches!(
            resolver.resolve_manual_with(&empty, karachi(), at(2024, 3, 15)),
            Err(SalahError::TimezoneResolution { .. })
        ));
    }

    #[test]
    fn test_network_errors_pass_through() {
        let offline = |_: GeoCoordinate| -> Result<Option<String>> {
            Err(SalahError::network("connection refused"))
        };
        let err = TimezoneResolver::new()
            .resolve_manual_with(&offline, karachi(), at(2024, 3, 15))
            .unwrap_err();
        assert_eq!(err, SalahError::NetworkError("connection refused".into()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_resolve_by_country() {
        let countries = CountryTimezones::load_embedded().unwrap();
        let resolver = TimezoneResolver::new().with_countries(&countries);
        assert_eq!(resolver.resolve_by_country("Pakistan").unwrap().hours(), 5.0);
        assert!(resolver.resolve_by_country("Atlantis").is_err());

        assert!(matches!(
            TimezoneResolver::new().resolve_by_country("Pakistan"),
            Err(SalahError::TimezoneResolution { .. })
        ));
    }
}
