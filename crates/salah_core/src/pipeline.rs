//! The calculation pipeline: resolve the offset, compute the canonical times, derive the
//! voluntary ones, and cache the day in a [`CalculationContext`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use salah_astronomy::compute_times;
use salah_timezone::{CalculationMode, DeviceClock, TimezoneResolver};
use salah_types::{CalculationConfig, GeoCoordinate, Result, TimezoneOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::day::DayTimes;

/// What asked for the current calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// App start; a cached day for the same date and place is reused.
    #[default]
    Launch,
    /// The user asked for a fresh device-location calculation.
    Automatic,
    /// The user entered a location by hand.
    Manual,
}

impl Trigger {
    /// Explicit triggers always recompute.
    pub fn is_explicit(self) -> bool {
        !matches!(self, Trigger::Launch)
    }
}

/// Where the offset for a request comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Device fix: the device clock's offset.
    Device(DeviceClock),
    /// Hand-entered location with a zone name (`Asia/Karachi`) or `±HH:MM` from a timezone lookup.
    Manual { zone_name: String },
    /// Hand-entered location resolved through the country offset table.
    Country { name: String },
    /// An offset the caller already knows.
    FixedOffset(TimezoneOffset),
}

/// Everything that varies per calculation besides the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub date: NaiveDate,
    pub coord: GeoCoordinate,
    pub location: LocationSource,
}

impl CalculationRequest {
    pub fn new(date: NaiveDate, coord: GeoCoordinate, location: LocationSource) -> Self {
        Self {
            date,
            coord,
            location,
        }
    }

    /// Instant at which zone names are resolved: noon UTC on the requested date.
    pub fn instant(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12)
    }
}

/// State carried between calculations: the active config, the pending trigger and the last day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationContext {
    config: CalculationConfig,
    trigger: Trigger,
    cached: Option<DayTimes>,
}

impl CalculationContext {
    pub fn new(config: CalculationConfig) -> Self {
        Self {
            config,
            trigger: Trigger::Launch,
            cached: None,
        }
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn cached(&self) -> Option<&DayTimes> {
        self.cached.as_ref()
    }

    /// Replaces the config. Returns `true` and drops the cached day when it changed.
    pub fn update_config(&mut self, config: CalculationConfig) -> bool {
        if config == self.config {
            return false;
        }
        debug!("config changed, invalidating cached times");
        self.config = config;
        self.cached = None;
        true
    }

    /// Sets the trigger for the next calculation.
    pub fn request(&mut self, trigger: Trigger) {
        self.trigger = trigger;
    }

    /// Seeds the cache with a previously persisted day.
    pub fn restore(&mut self, day: DayTimes) {
        self.cached = Some(day);
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// No cache, a cache for another date, or an explicit trigger.
    pub fn needs_recompute(&self, date: NaiveDate) -> bool {
        self.trigger.is_explicit() || self.cached.is_none_or(|day| day.date != date)
    }

    fn reusable(&self, request: &CalculationRequest, offset: TimezoneOffset) -> Option<DayTimes> {
        if self.needs_recompute(request.date) {
            return None;
        }
        self.cached.filter(|day| day.coord == request.coord && day.offset == offset)
    }
}

/// Resolves the request's offset.
pub fn resolve_offset(
    request: &CalculationRequest,
    resolver: &TimezoneResolver<'_>,
) -> Result<TimezoneOffset> {
    let at = request.instant();
    match &request.location {
        LocationSource::Device(clock) => {
            resolver.resolve_offset(CalculationMode::Automatic, Some(clock), None, at)
        }
        LocationSource::Manual { zone_name } => {
            resolver.resolve_offset(CalculationMode::Manual, None, Some(zone_name.as_str()), at)
        }
        LocationSource::Country { name } => resolver.resolve_by_country(name),
        LocationSource::FixedOffset(offset) => Ok(*offset),
    }
}

/// Runs the pipeline for `request` under the context's config.
///
/// The offset is always resolved first. A cached day is returned as is when the trigger is
/// [`Trigger::Launch`] and its date, coordinate and offset match the request. Otherwise the day is recomputed, cached, and the trigger reset to `Launch`.
/// On error the context is left untouched.
///
/// # Errors
/// Offset resolution errors (`TimezoneResolution`, `NetworkError`) and computation errors
/// (`InvalidConfiguration`, `UndefinedTime`).
#[instrument(skip_all, fields(date = %request.date, coord = %request.coord, trigger = ?ctx.trigger))]
pub fn calculate(
    ctx: &mut CalculationContext,
    request: &CalculationRequest,
    resolver: &TimezoneResolver<'_>,
) -> Result<DayTimes> {
    let offset = resolve_offset(request, resolver)?;
    if let Some(day) = ctx.reusable(request, offset) {
        debug!("reusing cached times");
        return Ok(day);
    }

    let prayers = compute_times(request.date, request.coord, offset, &ctx.config)?;
    let day = DayTimes::new(request.date, request.coord, offset, prayers);
    debug!(%offset, "calculated times");

    ctx.cached = Some(day);
    ctx.trigger = Trigger::Launch;
    Ok(day)
}
