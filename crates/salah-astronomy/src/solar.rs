//! Low-precision solar ephemeris: Julian date, declination and equation of time.
//!
//! Accurate to about a minute of time between 1950 and 2050, which is all prayer times need.

use chrono::{Datelike, NaiveDate};

/// Julian date of 00:00 UT on the given Gregorian date.
pub fn julian_date(date: NaiveDate) -> f64 {
    let mut year = f64::from(date.year());
    let mut month = f64::from(date.month());
    let day = f64::from(date.day());
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Sun declination (degrees) and equation of time (hours) at Julian date `jd`.
pub fn sun_position(jd: f64) -> (f64, f64) {
    let d = jd - 2451545.0;
    let g = fix_angle(357.529 + 0.98560028 * d);
    let q = fix_angle(280.459 + 0.98564736 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));

    let e = 23.439 - 0.00000036 * d;

    let declination = darcsin(dsin(e) * dsin(l));
    let right_ascension = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);
    let equation_of_time = q / 15.0 - right_ascension;

    (declination, equation_of_time)
}

pub fn sun_declination(jd: f64) -> f64 {
    sun_position(jd).0
}

pub fn equation_of_time(jd: f64) -> f64 {
    sun_position(jd).1
}

// Degree-based trigonometry

pub(crate) fn dsin(d: f64) -> f64 {
    d.to_radians().sin()
}

pub(crate) fn dcos(d: f64) -> f64 {
    d.to_radians().cos()
}

pub(crate) fn dtan(d: f64) -> f64 {
    d.to_radians().tan()
}

pub(crate) fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// NaN outside [-1, 1], which is how an unreachable sun altitude surfaces.
pub(crate) fn darccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

pub(crate) fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

pub(crate) fn darccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

/// Reduces an angle into [0, 360).
pub fn fix_angle(a: f64) -> f64 {
    let a = a - 360.0 * (a / 360.0).floor();
    if a < 0.0 { a + 360.0 } else { a }
}

/// Reduces hours into [0, 24).
pub fn fix_hour(a: f64) -> f64 {
    let a = a - 24.0 * (a / 24.0).floor();
    if a < 0.0 { a + 24.0 } else { a }
}

/// Hours from `from` forward to `to`, wrapping at midnight.
pub fn time_diff(from: f64, to: f64) -> f64 {
    fix_hour(to - from)
}
