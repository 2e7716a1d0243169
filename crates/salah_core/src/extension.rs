//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use salah_astronomy::compute_times;
use salah_types::{CalculationConfig, GeoCoordinate, PrayerTimeSet, Result, TimezoneOffset};

use crate::day::DayTimes;

/// Extends `NaiveDate` with prayer time calculation.
pub trait PrayerDateExt {
    /// The seven canonical times for this date.
    fn prayer_times(
        &self,
        coord: GeoCoordinate,
        offset: TimezoneOffset,
        config: &CalculationConfig,
    ) -> Result<PrayerTimeSet>;

    /// Canonical and voluntary times for this date.
    fn day_times(
        &self,
        coord: GeoCoordinate,
        offset: TimezoneOffset,
        config: &CalculationConfig,
    ) -> Result<DayTimes>;
}

impl PrayerDateExt for NaiveDate {
    fn prayer_times(
        &self,
        coord: GeoCoordinate,
        offset: TimezoneOffset,
        config: &CalculationConfig,
    ) -> Result<PrayerTimeSet> {
        compute_times(*self, coord, offset, config)
    }

    fn day_times(
        &self,
        coord: GeoCoordinate,
        offset: TimezoneOffset,
        config: &CalculationConfig,
    ) -> Result<DayTimes> {
        let prayers = self.prayer_times(coord, offset, config)?;
        Ok(DayTimes::new(*self, coord, offset, prayers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salah_types::{Prayer, VoluntaryPrayer};

    #[test]
    fn test_date_extension() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mecca = GeoCoordinate::new(21.4225, 39.8262).unwrap();
        let offset = TimezoneOffset::new(3.0).unwrap();
        let config = CalculationConfig::default();

        let times = date.prayer_times(mecca, offset, &config).unwrap();
        let day = date.day_times(mecca, offset, &config).unwrap();
        assert_eq!(day.prayers, times);
        assert_eq!(day.date, date);
        assert_eq!(day.voluntary.get(VoluntaryPrayer::Ishraq).to_string(), "05:58");
        assert_eq!(times.canonical(Prayer::Sunrise), "05:38");
    }
}
