use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SalahError};

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in [-90, 90].
    pub lat: f64,
    /// Longitude in [-180, 180].
    pub lng: f64,
}

impl GeoCoordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let coord = Self { lat, lng };
        coord.validate()?;
        Ok(coord)
    }

    /// Creates a coordinate without range checks.
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(SalahError::invalid_config(format!(
                "Latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(SalahError::invalid_config(format!(
                "Longitude {} outside [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.lat, self.lng)
    }
}

/// Signed difference from UTC in decimal hours, e.g. `5.5` for `+05:30`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimezoneOffset(f64);

impl TimezoneOffset {
    pub const MIN_HOURS: f64 = -12.0;
    pub const MAX_HOURS: f64 = 14.0;
    pub const UTC: TimezoneOffset = TimezoneOffset(0.0);

    /// # Errors
    /// Returns `InvalidConfiguration` when `hours` is not finite or outside [-12, 14].
    pub fn new(hours: f64) -> Result<Self> {
        if !hours.is_finite() || !(Self::MIN_HOURS..=Self::MAX_HOURS).contains(&hours) {
            return Err(SalahError::invalid_config(format!(
                "Timezone offset {} outside [{}, {}]",
                hours,
                Self::MIN_HOURS,
                Self::MAX_HOURS
            )));
        }
        Ok(Self(hours))
    }

    /// Exact conversion from seconds east of UTC.
    pub fn from_seconds(seconds: i32) -> Result<Self> {
        Self::new(f64::from(seconds) / 3600.0)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TimezoneOffset {
    type Error = SalahError;

    fn try_from(hours: f64) -> Result<Self> {
        Self::new(hours)
    }
}

impl From<TimezoneOffset> for f64 {
    fn from(offset: TimezoneOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_minutes = (self.0 * 60.0).round() as i64;
        let sign = if total_minutes < 0 { '-' } else { '+' };
        let abs = total_minutes.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}
