//! Astronomical prayer times for salah.
//!
//! Implements the classic hour-angle method: Julian date, sun declination and equation of
//! time, then the hour angle of the sun at each prayer's twilight angle.

pub mod prayer;
pub mod solar;

pub use prayer::{compute_times, compute_times_str, parse_date, SUNRISE_ANGLE};
