use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::clock::ClockTime;
use crate::error::{Result, SalahError};

/// The seven canonical daily times, in chronological order for a normal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 7] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Position in [`Prayer::ALL`], also the index into per-prayer offset arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Record key used by the persistence and display layers.
    pub const fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Sunset => "Sunset",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self> {
        Prayer::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SalahError::invalid_config(format!("Unknown prayer {s:?}")))
    }
}

/// Voluntary prayers derived from the canonical times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoluntaryPrayer {
    /// Last seventh of the night.
    Tahajjud,
    /// Twenty minutes after sunrise.
    Ishraq,
    /// Twenty minutes after Ishraq.
    Duha,
}

impl VoluntaryPrayer {
    pub const ALL: [VoluntaryPrayer; 3] = [
        VoluntaryPrayer::Tahajjud,
        VoluntaryPrayer::Ishraq,
        VoluntaryPrayer::Duha,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            VoluntaryPrayer::Tahajjud => "Tahajjud",
            VoluntaryPrayer::Ishraq => "Ishraq",
            VoluntaryPrayer::Duha => "Duha",
        }
    }
}

impl fmt::Display for VoluntaryPrayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The seven canonical times for one (date, location, config) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "BTreeMap<String, ClockTime>")]
pub struct PrayerTimeSet {
    times: [ClockTime; 7],
}

impl PrayerTimeSet {
    /// Times must be given in [`Prayer::ALL`] order.
    pub const fn new(times: [ClockTime; 7]) -> Self {
        Self { times }
    }

    pub fn get(&self, prayer: Prayer) -> ClockTime {
        self.times[prayer.index()]
    }

    /// Canonical `HH:mm` string for a prayer.
    pub fn canonical(&self, prayer: Prayer) -> String {
        self.get(prayer).to_string()
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, ClockTime)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Record map keyed by prayer name.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(p, t)| (p.name().to_string(), t.to_string()))
            .collect()
    }

    /// Strict inverse of [`PrayerTimeSet::to_map`].
    ///
    /// # Errors
    /// `MissingTime` for an absent key, `InvalidTime` for an unparseable value.
    pub fn from_map(records: &BTreeMap<String, String>) -> Result<Self> {
        let mut times = [ClockTime::MIDNIGHT; 7];
        for prayer in Prayer::ALL {
            let raw = records.get(prayer.name()).ok_or_else(|| SalahError::MissingTime {
                name: prayer.name().to_string(),
            })?;
            times[prayer.index()] = raw.parse()?;
        }
        Ok(Self { times })
    }
}

impl Serialize for PrayerTimeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.times.len()))?;
        for (prayer, time) in self.iter() {
            map.serialize_entry(prayer.name(), &time)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, ClockTime>> for PrayerTimeSet {
    type Error = SalahError;

    fn try_from(map: BTreeMap<String, ClockTime>) -> Result<Self> {
        let records = map.into_iter().map(|(k, v)| (k, v.to_string())).collect();
        Self::from_map(&records)
    }
}

/// Tahajjud, Ishraq and Duha derived from a [`PrayerTimeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoluntaryTimeSet {
    pub tahajjud: ClockTime,
    pub ishraq: ClockTime,
    pub duha: ClockTime,
}

impl VoluntaryTimeSet {
    pub fn get(&self, prayer: VoluntaryPrayer) -> ClockTime {
        match prayer {
            VoluntaryPrayer::Tahajjud => self.tahajjud,
            VoluntaryPrayer::Ishraq => self.ishraq,
            VoluntaryPrayer::Duha => self.duha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoluntaryPrayer, ClockTime)> + '_ {
        VoluntaryPrayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(p, t)| (p.name().to_string(), t.to_string()))
            .collect()
    }
}
