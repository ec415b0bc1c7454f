use tracing::debug;

use crate::{error::ForecastError, model::Coordinate, provider::ForecastProvider};

/// UTC offset of the local time at `coordinate`, in hours. May be
/// fractional for half- and quarter-hour zones.
pub async fn resolve_utc_offset_hours(
    provider: &dyn ForecastProvider,
    coordinate: &Coordinate,
) -> Result<f64, ForecastError> {
    let point = coordinate.require_point()?;
    let seconds = provider.utc_offset_seconds(point).await?;
    debug!(latitude = point.latitude, longitude = point.longitude, seconds, "resolved UTC offset");
    Ok(f64::from(seconds) / 3600.0)
}
