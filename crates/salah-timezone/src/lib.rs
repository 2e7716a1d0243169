//! UTC offset resolution for salah.
//!
//! Automatic calculations read the device clock. Manual ones resolve a zone name obtained for the
//! entered location, or fall back to a per-country offset table.

pub mod countries;
pub mod device;
pub mod offset;
pub mod resolver;

pub use countries::CountryTimezones;
pub use device::DeviceClock;
pub use offset::parse_utc_offset;
pub use resolver::{
    AutomaticPrecision, CalculationMode, TimezoneResolver, ZoneNameSource, resolve_zone_name,
};
