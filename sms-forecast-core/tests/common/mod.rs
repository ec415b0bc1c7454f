//! Shared fixtures: a week of hourly series around 2024-07-14 and a
//! provider that serves them without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use sms_forecast_core::{AtmosphericSeries, ForecastError, ForecastProvider, GeoPoint, MarineSeries};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 2024-07-14T15:45:00Z
pub const RECEIVED_AT: i64 = 1_720_971_900;

/// Series start at 2024-07-13T00:00, so 2024-07-14T18:00 sits at this index.
pub const TARGET_INDEX: usize = 42;

const HOURS: usize = 8 * 24;

pub fn hours() -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2024, 7, 13)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start");
    (0..HOURS)
        .map(|h| (start + Duration::hours(h as i64)).format("%Y-%m-%dT%H:%M").to_string())
        .collect()
}

fn constant(v: f64) -> Vec<Option<f64>> {
    vec![Some(v); HOURS]
}

fn stepped(base: f64, step: f64) -> Vec<Option<f64>> {
    (0..HOURS).map(|i| Some(base + i as f64 * step)).collect()
}

pub fn atmospheric() -> AtmosphericSeries {
    AtmosphericSeries {
        time: hours(),
        visibility: constant(24140.0),
        weather_code: constant(3.0),
        temperature_2m: stepped(0.0, 0.5),
        wind_direction_10m: constant(250.0),
        wind_speed_10m: constant(12.4),
        wind_gusts_10m: constant(25.6),
        pressure_msl: stepped(980.0, 0.5),
        relative_humidity_2m: constant(72.0),
        dew_point_2m: constant(13.2),
        cloud_cover: constant(100.0),
    }
}

pub fn marine() -> MarineSeries {
    let mut wave_height = constant(0.52);
    wave_height[0] = None;
    MarineSeries {
        time: hours(),
        wave_height,
        wave_direction: constant(245.0),
        wave_period: constant(4.35),
    }
}

/// Reply for `042.44 3018.65 2` received at [`RECEIVED_AT`] on a UTC host,
/// with the target two hours ahead of UTC.
pub const GOLDEN_OUTCOME: &str = "0714_20/V24140/WC3/T21/WD250/WS12.4/WG25.6\
/P997.5-998-998.5-999-999.5-1000-1000.5-1001\
/H72/RP13.2/C100/WaH0.52/WaD245/WaP4.35";

#[derive(Debug)]
pub struct StubProvider {
    pub offset_seconds: i32,
    pub atmospheric: Option<AtmosphericSeries>,
    pub marine: Option<MarineSeries>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            offset_seconds: 7200,
            atmospheric: Some(atmospheric()),
            marine: Some(marine()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ForecastProvider for StubProvider {
    async fn utc_offset_seconds(&self, _point: GeoPoint) -> Result<i32, ForecastError> {
        self.record_call();
        Ok(self.offset_seconds)
    }

    async fn atmospheric(&self, _point: GeoPoint) -> Result<AtmosphericSeries, ForecastError> {
        self.record_call();
        self.atmospheric
            .clone()
            .ok_or_else(|| ForecastError::Provider("atmospheric series unavailable".into()))
    }

    async fn marine(&self, _point: GeoPoint) -> Result<MarineSeries, ForecastError> {
        self.record_call();
        self.marine
            .clone()
            .ok_or_else(|| ForecastError::Provider("marine series unavailable".into()))
    }
}
