//! Forecast hour arithmetic.
//!
//! Receipt time is rounded to the nearest hour in the host's own offset, the
//! requested lead time is added, and the result is moved back to UTC. The
//! same instant is rendered twice: as the `YYYY-MM-DDTHH:MM` key the hourly
//! series is indexed by, and as a short `MMDD_HH` label in the target's
//! local time.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Utc,
};

use crate::error::ForecastError;

/// Format of the hourly series time index (UTC, minute precision).
pub const SERIES_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastTimes {
    /// Forecast hour, always on an hour boundary.
    pub instant: DateTime<Utc>,
    /// Forecast hour in the target location's time, e.g. `0714_18`.
    pub local_label: String,
}

impl ForecastTimes {
    pub fn series_key(&self) -> String {
        self.instant.format(SERIES_KEY_FORMAT).to_string()
    }
}

pub fn compute_times(
    received_at: DateTime<Utc>,
    lead_hours: u32,
    system_offset: FixedOffset,
    remote_utc_offset_hours: f64,
) -> Result<ForecastTimes, ForecastError> {
    let local = received_at.with_timezone(&system_offset).naive_local();
    let target_local = round_to_hour(local) + Duration::hours(i64::from(lead_hours));
    let target_utc = target_local - Duration::seconds(i64::from(system_offset.local_minus_utc()));
    let instant = Utc.from_utc_datetime(&target_utc);

    let remote = offset_from_hours(remote_utc_offset_hours)?;
    let local_label = local_label(instant.with_timezone(&remote));

    Ok(ForecastTimes { instant, local_label })
}

/// Minutes below 30 round down, 30 and above round up.
pub fn round_to_hour(time: NaiveDateTime) -> NaiveDateTime {
    let hour_start =
        time.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(time.hour()));
    if time.minute() >= 30 {
        hour_start + Duration::hours(1)
    } else {
        hour_start
    }
}

pub fn offset_from_hours(hours: f64) -> Result<FixedOffset, ForecastError> {
    let seconds = (hours * 3600.0).round();
    if !seconds.is_finite() {
        return Err(ForecastError::Provider(format!("UTC offset {hours}h is not a number")));
    }
    FixedOffset::east_opt(seconds as i32)
        .ok_or_else(|| ForecastError::Provider(format!("UTC offset {hours}h is out of range")))
}

fn local_label<Tz: TimeZone>(time: DateTime<Tz>) -> String {
    format!("{:02}{:02}_{:02}", time.month(), time.day(), time.hour())
}

/// Offset that receipt times are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemOffset {
    Fixed(FixedOffset),
    /// The host's local offset in effect at the receipt instant, so DST
    /// changes between receipt and processing are honoured.
    Host,
}

impl SystemOffset {
    pub fn at(self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            SystemOffset::Fixed(offset) => offset,
            SystemOffset::Host => *instant.with_timezone(&Local).offset(),
        }
    }
}

impl From<FixedOffset> for SystemOffset {
    fn from(offset: FixedOffset) -> Self {
        SystemOffset::Fixed(offset)
    }
}
