//! Picks the values for one forecast hour out of the hourly series.

use tracing::debug;

use crate::{
    error::ForecastError,
    model::{AtmosphericSeries, Coordinate, MarineSeries, OutcomeFields, PRESSURE_TREND_LEN},
    provider::ForecastProvider,
};

/// Fetch both series for `coordinate` and extract the hour keyed by
/// `target_key` (`YYYY-MM-DDTHH:MM`, UTC).
pub async fn fetch(
    provider: &dyn ForecastProvider,
    coordinate: &Coordinate,
    target_key: &str,
) -> Result<OutcomeFields, ForecastError> {
    let point = coordinate.require_point()?;

    let (atmospheric, marine) =
        tokio::try_join!(provider.atmospheric(point), provider.marine(point))?;
    debug!(
        hours = atmospheric.time.len(),
        marine_hours = marine.time.len(),
        target_key,
        "fetched hourly series"
    );

    extract(&atmospheric, &marine, target_key)
}

pub fn extract(
    atmospheric: &AtmosphericSeries,
    marine: &MarineSeries,
    target_key: &str,
) -> Result<OutcomeFields, ForecastError> {
    atmospheric.validate()?;
    marine.validate()?;

    let index = atmospheric
        .time
        .iter()
        .position(|t| t == target_key)
        .ok_or_else(|| ForecastError::NotFound(format!("no forecast for {target_key}")))?;

    if index + 1 < PRESSURE_TREND_LEN {
        return Err(ForecastError::NotFound(format!(
            "pressure trend for {target_key} needs {} preceding hours, series has {index}",
            PRESSURE_TREND_LEN - 1
        )));
    }

    if marine.time.get(index).map(String::as_str) != Some(target_key) {
        return Err(ForecastError::NotFound(format!(
            "marine series has no entry for {target_key} at index {index}"
        )));
    }

    let mut pressure = [None; PRESSURE_TREND_LEN];
    pressure.copy_from_slice(&atmospheric.pressure_msl[index + 1 - PRESSURE_TREND_LEN..=index]);

    Ok(OutcomeFields {
        visibility: atmospheric.visibility[index],
        weather_code: atmospheric.weather_code[index],
        temperature: atmospheric.temperature_2m[index],
        wind_direction: atmospheric.wind_direction_10m[index],
        wind_speed: atmospheric.wind_speed_10m[index],
        wind_gusts: atmospheric.wind_gusts_10m[index],
        pressure,
        humidity: atmospheric.relative_humidity_2m[index],
        dew_point: atmospheric.dew_point_2m[index],
        cloud_cover: atmospheric.cloud_cover[index],
        wave_height: marine.wave_height[index],
        wave_direction: marine.wave_direction[index],
        wave_period: marine.wave_period[index],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(n: usize) -> Vec<String> {
        (0..n).map(|h| format!("2024-07-14T{h:02}:00")).collect()
    }

    fn column(n: usize, base: f64) -> Vec<Option<f64>> {
        (0..n).map(|i| Some(base + i as f64)).collect()
    }

    fn atmospheric(n: usize) -> AtmosphericSeries {
        AtmosphericSeries {
            time: hours(n),
            visibility: column(n, 20000.0),
            weather_code: column(n, 0.0),
            temperature_2m: column(n, 15.5),
            wind_direction_10m: column(n, 200.0),
            wind_speed_10m: column(n, 5.0),
            wind_gusts_10m: column(n, 9.0),
            pressure_msl: column(n, 1000.5),
            relative_humidity_2m: column(n, 60.0),
            dew_point_2m: column(n, 10.0),
            cloud_cover: column(n, 30.0),
        }
    }

    fn marine(n: usize) -> MarineSeries {
        MarineSeries {
            time: hours(n),
            wave_height: column(n, 0.25),
            wave_direction: column(n, 180.0),
            wave_period: column(n, 4.0),
        }
    }

    #[test]
    fn extracts_values_at_target_hour() {
        let fields = extract(&atmospheric(24), &marine(24), "2024-07-14T10:00").expect("fields");

        assert_eq!(fields.temperature, Some(25.5));
        assert_eq!(fields.visibility, Some(20010.0));
        assert_eq!(fields.weather_code, Some(10.0));
        assert_eq!(fields.humidity, Some(70.0));
        assert_eq!(fields.wave_height, Some(10.25));
        assert_eq!(fields.wave_period, Some(14.0));
    }

    #[test]
    fn pressure_trend_is_oldest_first_and_ends_at_target() {
        let atm = atmospheric(24);
        let fields = extract(&atm, &marine(24), "2024-07-14T10:00").expect("fields");

        let expected: Vec<Option<f64>> = (3..=10).map(|i| Some(1000.5 + i as f64)).collect();
        assert_eq!(fields.pressure.to_vec(), expected);
        assert_eq!(fields.pressure[PRESSURE_TREND_LEN - 1], atm.pressure_msl[10]);
    }

    #[test]
    fn seven_preceding_hours_are_enough() {
        assert!(extract(&atmospheric(24), &marine(24), "2024-07-14T07:00").is_ok());
    }

    #[test]
    fn short_history_is_not_found() {
        let err = extract(&atmospheric(24), &marine(24), "2024-07-14T06:00").unwrap_err();
        assert!(matches!(err, ForecastError::NotFound(_)));
    }

    #[test]
    fn absent_timestamp_is_not_found() {
        let err = extract(&atmospheric(24), &marine(24), "2024-07-15T06:00").unwrap_err();
        assert!(matches!(err, ForecastError::NotFound(_)));
    }

    #[test]
    fn marine_series_must_cover_same_index() {
        let err = extract(&atmospheric(24), &marine(8), "2024-07-14T10:00").unwrap_err();
        assert!(matches!(err, ForecastError::NotFound(_)));

        let mut shifted = marine(24);
        shifted.time.rotate_left(1);
        let err = extract(&atmospheric(24), &shifted, "2024-07-14T10:00").unwrap_err();
        assert!(matches!(err, ForecastError::NotFound(_)));
    }

    #[test]
    fn ragged_series_is_provider_error() {
        let mut atm = atmospheric(24);
        atm.cloud_cover.pop();
        let err = extract(&atm, &marine(24), "2024-07-14T10:00").unwrap_err();
        assert!(matches!(err, ForecastError::Provider(_)));
    }

    #[test]
    fn nulls_pass_through() {
        let mut sea = marine(24);
        sea.wave_height = vec![None; 24];
        let fields = extract(&atmospheric(24), &sea, "2024-07-14T10:00").expect("fields");
        assert_eq!(fields.wave_height, None);
    }
}
