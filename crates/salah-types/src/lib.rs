//! Core types for the salah prayer-times crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod prayer;

pub use clock::ClockTime;
pub use config::{
    CalculationConfig, CalculationConfigBuilder, CalculationMethod, HighLatitudeRule,
    Jurisdiction, MethodParams, TimeFormat, Twilight, MAX_OFFSET_MINUTES,
};
pub use error::{ErrorKind, Result, SalahError};
pub use geo::{GeoCoordinate, TimezoneOffset};
pub use prayer::{Prayer, PrayerTimeSet, VoluntaryPrayer, VoluntaryTimeSet};
