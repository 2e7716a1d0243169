//! Prayer times pipeline for salah.
//!
//! Ties the component crates together: offset resolution ([`salah_timezone`]), solar times
//! ([`salah_astronomy`]), voluntary prayers ([`salah_voluntary`]) and display formatting
//! ([`salah_clock`]), with config loading and a caching [`CalculationContext`].

pub mod config;
pub mod day;
pub mod extension;
pub mod pipeline;
pub mod preferences;

pub use salah_types as types;
pub use salah_astronomy as astronomy;
pub use salah_clock as clock;
pub use salah_timezone as timezone;
pub use salah_voluntary as voluntary;

pub use config::{config_from_env, config_from_json_file, config_from_json_str};
pub use day::{DISPLAY_ORDER, DayTimes, Slot};
pub use extension::PrayerDateExt;
pub use pipeline::{
    CalculationContext, CalculationRequest, LocationSource, Trigger, calculate, resolve_offset,
};
pub use preferences::StoredPreferences;

pub use salah_astronomy::{compute_times, compute_times_str};
pub use salah_clock::{add_minutes, format_for_display, subtract_minutes, try_format_for_display};
pub use salah_timezone::{
    AutomaticPrecision, CalculationMode, CountryTimezones, DeviceClock, TimezoneResolver,
    ZoneNameSource, parse_utc_offset,
};
pub use salah_types::{
    CalculationConfig, CalculationConfigBuilder, CalculationMethod, ClockTime, ErrorKind,
    GeoCoordinate, HighLatitudeRule, Jurisdiction, MethodParams, Prayer, PrayerTimeSet, Result,
    SalahError, TimeFormat, TimezoneOffset, Twilight, VoluntaryPrayer, VoluntaryTimeSet,
};
pub use salah_voluntary::{MissingTimePolicy, derive_from_records, derive_voluntary_times};

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{
        CalculationContext, CalculationRequest, DayTimes, LocationSource, PrayerDateExt, Trigger,
        calculate, compute_times, derive_voluntary_times,
    };
    pub use crate::{CountryTimezones, DeviceClock, TimezoneResolver};
}
