use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::ForecastError,
    model::{AtmosphericSeries, GeoPoint, MarineSeries},
    provider::open_meteo::OpenMeteoProvider,
};

pub mod open_meteo;

/// Everything the pipeline needs from the outside world.
///
/// Both series must be indexed by UTC timestamps formatted as
/// `YYYY-MM-DDTHH:MM`, and must reach back at least a day so the pressure
/// trend for the current hour is available.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// UTC offset of the local time at `point`, in seconds.
    async fn utc_offset_seconds(&self, point: GeoPoint) -> Result<i32, ForecastError>;

    async fn atmospheric(&self, point: GeoPoint) -> Result<AtmosphericSeries, ForecastError>;

    async fn marine(&self, point: GeoPoint) -> Result<MarineSeries, ForecastError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_builds() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }
}
