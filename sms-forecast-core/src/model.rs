use serde::{Deserialize, Serialize};

use crate::error::{AxisError, ForecastError};

/// A coordinate with both axes known to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinate as decoded from an inbound SMS. Each axis carries its own
/// outcome; an `Err` on either axis makes the whole coordinate unusable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: Result<f64, AxisError>,
    pub longitude: Result<f64, AxisError>,
}

impl Coordinate {
    pub fn point(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            latitude: self.latitude.ok()?,
            longitude: self.longitude.ok()?,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_ok() && self.longitude.is_ok()
    }

    /// Like [`Coordinate::point`], but as the provider-facing error used
    /// when an incorrect coordinate reaches a network stage.
    pub(crate) fn require_point(&self) -> Result<GeoPoint, ForecastError> {
        self.point().ok_or_else(|| {
            ForecastError::Provider(format!(
                "coordinate has an incorrect axis (latitude: {}, longitude: {})",
                describe_axis(self.latitude),
                describe_axis(self.longitude),
            ))
        })
    }
}

fn describe_axis(axis: Result<f64, AxisError>) -> String {
    match axis {
        Ok(v) => v.to_string(),
        Err(e) => format!("incorrect, {e}"),
    }
}

/// Hourly atmospheric forecast, one column per variable, all indexed by `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericSeries {
    pub time: Vec<String>,
    pub visibility: Vec<Option<f64>>,
    pub weather_code: Vec<Option<f64>>,
    pub temperature_2m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_gusts_10m: Vec<Option<f64>>,
    pub pressure_msl: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub dew_point_2m: Vec<Option<f64>>,
    pub cloud_cover: Vec<Option<f64>>,
}

/// Variables requested from the atmospheric endpoint, in query order.
pub const ATMOSPHERIC_VARIABLES: &[&str] = &[
    "visibility",
    "weather_code",
    "temperature_2m",
    "wind_direction_10m",
    "wind_speed_10m",
    "wind_gusts_10m",
    "pressure_msl",
    "relative_humidity_2m",
    "dew_point_2m",
    "cloud_cover",
];

impl AtmosphericSeries {
    pub fn validate(&self) -> Result<(), ForecastError> {
        check_columns(
            "atmospheric",
            self.time.len(),
            &[
                ("visibility", self.visibility.as_slice()),
                ("weather_code", self.weather_code.as_slice()),
                ("temperature_2m", self.temperature_2m.as_slice()),
                ("wind_direction_10m", self.wind_direction_10m.as_slice()),
                ("wind_speed_10m", self.wind_speed_10m.as_slice()),
                ("wind_gusts_10m", self.wind_gusts_10m.as_slice()),
                ("pressure_msl", self.pressure_msl.as_slice()),
                ("relative_humidity_2m", self.relative_humidity_2m.as_slice()),
                ("dew_point_2m", self.dew_point_2m.as_slice()),
                ("cloud_cover", self.cloud_cover.as_slice()),
            ],
        )
    }
}

/// Hourly marine forecast, indexed like [`AtmosphericSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineSeries {
    pub time: Vec<String>,
    pub wave_height: Vec<Option<f64>>,
    pub wave_direction: Vec<Option<f64>>,
    pub wave_period: Vec<Option<f64>>,
}

pub const MARINE_VARIABLES: &[&str] = &["wave_height", "wave_direction", "wave_period"];

impl MarineSeries {
    pub fn validate(&self) -> Result<(), ForecastError> {
        check_columns(
            "marine",
            self.time.len(),
            &[
                ("wave_height", self.wave_height.as_slice()),
                ("wave_direction", self.wave_direction.as_slice()),
                ("wave_period", self.wave_period.as_slice()),
            ],
        )
    }
}

fn check_columns(
    series: &str,
    expected: usize,
    columns: &[(&str, &[Option<f64>])],
) -> Result<(), ForecastError> {
    for (name, column) in columns {
        if column.len() != expected {
            return Err(ForecastError::Provider(format!(
                "{series} series column '{name}' has {} values, time index has {expected}",
                column.len()
            )));
        }
    }
    Ok(())
}

/// Number of pressure readings sent, ending at the forecast hour.
pub const PRESSURE_TREND_LEN: usize = 8;

/// Forecast values picked out of the series for a single hour.
///
/// `None` means the provider had no value for that hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeFields {
    pub visibility: Option<f64>,
    pub weather_code: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gusts: Option<f64>,
    /// Oldest first; the last element is the forecast hour itself.
    pub pressure: [Option<f64>; PRESSURE_TREND_LEN],
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wave_height: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wave_period: Option<f64>,
}
