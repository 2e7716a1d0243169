//! The device's own view of its UTC offset.

use chrono::{DateTime, Local, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw zone offset, DST savings and DST state as reported by a device clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClock {
    /// Standard offset east of UTC, in seconds.
    pub raw_offset_secs: i32,
    /// Extra offset while daylight saving time is in effect, in seconds.
    pub dst_savings_secs: i32,
    pub in_daylight_time: bool,
}

impl DeviceClock {
    pub fn new(raw_offset_secs: i32, dst_savings_secs: i32, in_daylight_time: bool) -> Self {
        Self {
            raw_offset_secs,
            dst_savings_secs,
            in_daylight_time,
        }
    }

    /// Clock of a device set to `tz`, observed at `at`.
    pub fn from_zone(tz: Tz, at: DateTime<Utc>) -> Self {
        let offset = tz.offset_from_utc_datetime(&at.naive_utc());
        let dst = offset.dst_offset().num_seconds() as i32;
        Self {
            raw_offset_secs: offset.base_utc_offset().num_seconds() as i32,
            dst_savings_secs: dst,
            in_daylight_time: dst != 0,
        }
    }

    /// Clock of the running host: the `TZ` environment variable when it names a known zone,
    /// otherwise the local offset with no DST split.
    pub fn system() -> Self {
        let now = Utc::now();
        if let Ok(name) = std::env::var("TZ") {
            // POSIX allows a leading ':' before a zone file name
            match name.trim_start_matches(':').parse::<Tz>() {
                Ok(tz) => return Self::from_zone(tz, now),
                Err(_) => debug!(tz = %name, "TZ is not an IANA zone name, using local offset"),
            }
        }
        let local = now.with_timezone(&Local).offset().fix().local_minus_utc();
        Self::new(local, 0, false)
    }

    /// Offset in effect, in seconds: raw plus DST savings when in daylight time.
    pub fn total_offset_secs(&self) -> i32 {
        self.raw_offset_secs
            + if self.in_daylight_time {
                self.dst_savings_secs
            } else {
                0
            }
    }
}
