//! Prayer Times Calculation Module.
//!
//! Computes the seven canonical times from hour angles of the sun at the method's twilight
//! angles, then shifts them to zone time, applies the high-latitude rule and per-prayer tuning.

use chrono::NaiveDate;
use salah_types::{
    CalculationConfig, ClockTime, GeoCoordinate, HighLatitudeRule, MethodParams, Prayer,
    PrayerTimeSet, Result, SalahError, TimezoneOffset, Twilight,
};
use tracing::{debug, instrument};

use crate::solar::{
    darccos, darccot, dcos, dsin, dtan, equation_of_time, fix_hour, julian_date,
    sun_declination, time_diff,
};

/// Sun altitude at sunrise and sunset: refraction plus the solar semi-diameter.
pub const SUNRISE_ANGLE: f64 = 0.833;

/// First-guess times (hours) that seed the single refinement pass.
const SEED_TIMES: [f64; 7] = [5.0, 6.0, 12.0, 13.0, 18.0, 18.0, 18.0];

const FAJR: usize = Prayer::Fajr.index();
const SUNRISE: usize = Prayer::Sunrise.index();
const DHUHR: usize = Prayer::Dhuhr.index();
const ASR: usize = Prayer::Asr.index();
const SUNSET: usize = Prayer::Sunset.index();
const MAGHRIB: usize = Prayer::Maghrib.index();
const ISHA: usize = Prayer::Isha.index();

/// Sun geometry for one date at one place.
struct SolarDay {
    /// Julian date corrected for longitude.
    jd: f64,
    lat: f64,
}

impl SolarDay {
    fn new(date: NaiveDate, coord: GeoCoordinate) -> Self {
        Self {
            jd: julian_date(date) - coord.lng / (15.0 * 24.0),
            lat: coord.lat,
        }
    }

    /// Solar noon, `t` in day portions.
    fn mid_day(&self, t: f64) -> f64 {
        fix_hour(12.0 - equation_of_time(self.jd + t))
    }

    /// Time the sun sits at `angle` degrees below the horizon (above 90 means morning).
    fn time_at_angle(&self, angle: f64, t: f64) -> f64 {
        let decl = sun_declination(self.jd + t);
        let noon = self.mid_day(t);
        let hour_angle = darccos(
            (-dsin(angle) - dsin(decl) * dsin(self.lat)) / (dcos(decl) * dcos(self.lat)),
        ) / 15.0;
        noon + if angle > 90.0 { -hour_angle } else { hour_angle }
    }

    /// Asr, when a shadow reaches `shadow_factor` times its object plus the noon shadow.
    fn asr(&self, shadow_factor: f64, t: f64) -> f64 {
        let decl = sun_declination(self.jd + t);
        let angle = -darccot(shadow_factor + dtan((self.lat - decl).abs()));
        self.time_at_angle(angle, t)
    }

    fn twilight(&self, twilight: Twilight, t: f64) -> f64 {
        match twilight {
            Twilight::Angle(angle) => self.time_at_angle(angle, t),
            // placed relative to the previous event during adjustment
            Twilight::Minutes(_) => f64::NAN,
        }
    }
}

/// Raw times in fractional local-mean hours, NaN where the sun never reaches the angle.
fn solar_times(day: &SolarDay, params: &MethodParams, shadow_factor: f64) -> [f64; 7] {
    let t = SEED_TIMES.map(|h| h / 24.0);
    [
        day.time_at_angle(180.0 - params.fajr_angle, t[FAJR]),
        day.time_at_angle(180.0 - SUNRISE_ANGLE, t[SUNRISE]),
        day.mid_day(t[DHUHR]),
        day.asr(shadow_factor, t[ASR]),
        day.time_at_angle(SUNRISE_ANGLE, t[SUNSET]),
        day.twilight(params.maghrib, t[MAGHRIB]),
        day.twilight(params.isha, t[ISHA]),
    ]
}

/// Shifts to zone time and places Dhuhr and any interval-based Maghrib/Isha.
fn adjust_times(
    times: &mut [f64; 7],
    coord: GeoCoordinate,
    offset: TimezoneOffset,
    config: &CalculationConfig,
    params: &MethodParams,
) {
    let shift = offset.hours() - coord.lng / 15.0;
    for time in times.iter_mut() {
        *time += shift;
    }
    times[DHUHR] += config.dhuhr_minutes / 60.0;
    if let Twilight::Minutes(minutes) = params.maghrib {
        times[MAGHRIB] = times[SUNSET] + minutes / 60.0;
    }
    if let Twilight::Minutes(minutes) = params.isha {
        times[ISHA] = times[MAGHRIB] + minutes / 60.0;
    }
}

/// Replaces Fajr, Isha and Maghrib with a portion of the sunset-to-sunrise night when they are
/// undefined or further from sunrise/sunset than that portion.
fn adjust_high_latitudes(times: &mut [f64; 7], params: &MethodParams, rule: HighLatitudeRule) {
    let night = time_diff(times[SUNSET], times[SUNRISE]);
    let portion = |angle: f64| rule.night_portion(angle).map(|p| p * night);

    if let Some(fajr_diff) = portion(params.fajr_angle) {
        let fajr = times[FAJR];
        if fajr.is_nan() || time_diff(fajr, times[SUNRISE]) > fajr_diff {
            times[FAJR] = times[SUNRISE] - fajr_diff;
            debug!(prayer = %Prayer::Fajr, ?rule, "replaced by night portion");
        }
    }

    if let Some(isha_diff) = portion(params.isha_portion_angle()) {
        let isha = times[ISHA];
        if isha.is_nan() || time_diff(times[SUNSET], isha) > isha_diff {
            times[ISHA] = times[SUNSET] + isha_diff;
            debug!(prayer = %Prayer::Isha, ?rule, "replaced by night portion");
        }
    }

    if let Some(maghrib_diff) = portion(params.maghrib_portion_angle()) {
        let maghrib = times[MAGHRIB];
        if maghrib.is_nan() || time_diff(times[SUNSET], maghrib) > maghrib_diff {
            times[MAGHRIB] = times[SUNSET] + maghrib_diff;
            debug!(prayer = %Prayer::Maghrib, ?rule, "replaced by night portion");
        }
    }
}

/// Calculates the seven canonical prayer times for a date and location.
///
/// # Arguments
/// * `date` - The Gregorian date
/// * `coord` - Observer's coordinates
/// * `offset` - Zone offset from UTC in effect on `date`
/// * `config` - Method, jurisdiction, high-latitude rule and per-prayer tuning
///
/// # Errors
/// * `InvalidConfiguration` for an out-of-range coordinate or inconsistent config.
/// * `UndefinedTime` when a time has no solution and the high-latitude rule cannot replace it
///   (rule `None`, or polar day/night where sunrise itself is undefined).
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use salah_astronomy::compute_times;
/// use salah_types::{CalculationConfig, GeoCoordinate, Prayer, TimezoneOffset};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let karachi = GeoCoordinate::new(24.8607, 67.0011).unwrap();
/// let offset = TimezoneOffset::new(5.0).unwrap();
///
/// let times = compute_times(date, karachi, offset, &CalculationConfig::default()).unwrap();
/// assert_eq!(times.canonical(Prayer::Dhuhr), "12:41");
/// ```
#[instrument(level = "debug", skip(config), fields(method = %config.method))]
pub fn compute_times(
    date: NaiveDate,
    coord: GeoCoordinate,
    offset: TimezoneOffset,
    config: &CalculationConfig,
) -> Result<PrayerTimeSet> {
    coord.validate()?;
    config.validate()?;

    let params = config.method_params();
    let day = SolarDay::new(date, coord);
    let mut times = solar_times(&day, &params, config.jurisdiction.shadow_factor());

    adjust_times(&mut times, coord, offset, config, &params);
    if config.high_latitude != HighLatitudeRule::None {
        adjust_high_latitudes(&mut times, &params, config.high_latitude);
    }

    let mut clock = [ClockTime::MIDNIGHT; 7];
    for prayer in Prayer::ALL {
        let i = prayer.index();
        let tuned = times[i] + f64::from(config.offset_for(prayer)) / 60.0;
        clock[i] = ClockTime::from_fractional_hours(tuned).ok_or(SalahError::UndefinedTime {
            prayer,
            latitude: coord.lat,
        })?;
    }

    Ok(PrayerTimeSet::new(clock))
}

/// Like [`compute_times`], for a date given as `YYYY-MM-DD`.
///
/// # Errors
/// `InvalidConfiguration` when the date does not parse.
pub fn compute_times_str(
    date: &str,
    coord: GeoCoordinate,
    offset: TimezoneOffset,
    config: &CalculationConfig,
) -> Result<PrayerTimeSet> {
    let date = parse_date(date)?;
    compute_times(date, coord, offset, config)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| SalahError::invalid_config(format!("Invalid date {date:?}: {e}")))
}
