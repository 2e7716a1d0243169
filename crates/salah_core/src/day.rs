//! One day's canonical and voluntary times with their location.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use salah_clock::format_time;
use salah_types::{
    ClockTime, GeoCoordinate, Prayer, PrayerTimeSet, Result, SalahError, TimeFormat,
    TimezoneOffset, VoluntaryPrayer, VoluntaryTimeSet,
};
use salah_voluntary::derive_voluntary_times;
use serde::{Deserialize, Serialize};

pub const KEY_DATE: &str = "date";
pub const KEY_LATITUDE: &str = "lat";
pub const KEY_LONGITUDE: &str = "lon";
pub const KEY_TIMEZONE: &str = "timezone";

/// A displayable time: obligatory or voluntary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Prayer(Prayer),
    Voluntary(VoluntaryPrayer),
}

impl Slot {
    pub const fn name(self) -> &'static str {
        match self {
            Slot::Prayer(p) => p.name(),
            Slot::Voluntary(v) => v.name(),
        }
    }
}

/// Order of rows on the prayer times screen.
pub const DISPLAY_ORDER: [Slot; 10] = [
    Slot::Voluntary(VoluntaryPrayer::Tahajjud),
    Slot::Prayer(Prayer::Fajr),
    Slot::Prayer(Prayer::Sunrise),
    Slot::Voluntary(VoluntaryPrayer::Ishraq),
    Slot::Voluntary(VoluntaryPrayer::Duha),
    Slot::Prayer(Prayer::Dhuhr),
    Slot::Prayer(Prayer::Asr),
    Slot::Prayer(Prayer::Sunset),
    Slot::Prayer(Prayer::Maghrib),
    Slot::Prayer(Prayer::Isha),
];

/// Result of one calculation.
///
/// Serializes as its [`DayTimes::records`] map, and deserializes through
/// [`DayTimes::from_records`], so the voluntary times always follow the canonical ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, String>", try_from = "BTreeMap<String, String>")]
pub struct DayTimes {
    pub date: NaiveDate,
    pub coord: GeoCoordinate,
    pub offset: TimezoneOffset,
    pub prayers: PrayerTimeSet,
    pub voluntary: VoluntaryTimeSet,
}

impl DayTimes {
    /// Derives the voluntary times from `prayers`.
    pub fn new(
        date: NaiveDate,
        coord: GeoCoordinate,
        offset: TimezoneOffset,
        prayers: PrayerTimeSet,
    ) -> Self {
        Self {
            date,
            coord,
            offset,
            prayers,
            voluntary: derive_voluntary_times(&prayers),
        }
    }

    pub fn get(&self, slot: Slot) -> ClockTime {
        match slot {
            Slot::Prayer(p) => self.prayers.get(p),
            Slot::Voluntary(v) => self.voluntary.get(v),
        }
    }

    /// The ten rows in screen order, each formatted for display.
    pub fn display(&self, format: TimeFormat) -> Vec<(&'static str, String)> {
        DISPLAY_ORDER
            .into_iter()
            .map(|slot| (slot.name(), format_time(self.get(slot), format)))
            .collect()
    }

    /// Flat record for persistence: every time under its name, plus date, coordinates and offset.
    pub fn records(&self) -> BTreeMap<String, String> {
        let mut records = self.prayers.to_map();
        records.extend(self.voluntary.to_map());
        records.insert(KEY_DATE.into(), self.date.format("%Y-%m-%d").to_string());
        records.insert(KEY_LATITUDE.into(), self.coord.lat.to_string());
        records.insert(KEY_LONGITUDE.into(), self.coord.lng.to_string());
        records.insert(KEY_TIMEZONE.into(), self.offset.hours().to_string());
        records
    }

    /// Restores a day from [`DayTimes::records`].
    ///
    /// Voluntary times are derived again from the restored canonical times.
    ///
    /// # Errors
    /// `MissingTime`/`InvalidTime` for the canonical times, `InvalidConfiguration` for a missing
    /// or malformed date, coordinate or offset.
    pub fn from_records(records: &BTreeMap<String, String>) -> Result<Self> {
        let field = |key: &str| {
            records
                .get(key)
                .map(|v| v.trim())
                .ok_or_else(|| SalahError::invalid_config(format!("Missing record {key:?}")))
        };
        let number = |key: &str| -> Result<f64> {
            let raw = field(key)?;
            raw.parse()
                .map_err(|_| SalahError::invalid_config(format!("Invalid {key} {raw:?}")))
        };

        let date = salah_astronomy::parse_date(field(KEY_DATE)?)?;
        let coord = GeoCoordinate::new(number(KEY_LATITUDE)?, number(KEY_LONGITUDE)?)?;
        let offset = TimezoneOffset::new(number(KEY_TIMEZONE)?)?;
        let prayers = PrayerTimeSet::from_map(records)?;
        Ok(Self::new(date, coord, offset, prayers))
    }
}

impl From<DayTimes> for BTreeMap<String, String> {
    fn from(day: DayTimes) -> Self {
        day.records()
    }
}

impl TryFrom<BTreeMap<String, String>> for DayTimes {
    type Error = SalahError;

    fn try_from(records: BTreeMap<String, String>) -> Result<Self> {
        Self::from_records(&records)
    }
}
