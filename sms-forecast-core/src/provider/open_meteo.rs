use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::{
    Config,
    error::ForecastError,
    model::{ATMOSPHERIC_VARIABLES, AtmosphericSeries, GeoPoint, MARINE_VARIABLES, MarineSeries},
};

use super::ForecastProvider;

/// Open-Meteo forecast and marine APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    forecast_url: String,
    marine_url: String,
    past_days: u8,
    forecast_days: u8,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            forecast_url: config.forecast_url.clone(),
            marine_url: config.marine_url.clone(),
            past_days: config.past_days,
            forecast_days: config.forecast_days,
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ForecastError> {
        debug!(what, url, "requesting Open-Meteo");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<OmErrorResponse>(&body)
                .map(|e| e.reason)
                .unwrap_or_else(|_| truncate_body(&body));
            return Err(ForecastError::Provider(format!(
                "Open-Meteo {what} request failed with status {status}: {detail}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            ForecastError::Provider(format!("Failed to parse Open-Meteo {what} JSON: {e}"))
        })
    }

    fn series_query(&self, point: GeoPoint, variables: &[&str]) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", point.latitude.to_string()),
            ("longitude", point.longitude.to_string()),
            ("hourly", variables.join(",")),
            ("timezone", "GMT".to_string()),
            ("past_days", self.past_days.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct OmErrorResponse {
    reason: String,
}

#[derive(Debug, Deserialize)]
struct OmTimezoneResponse {
    utc_offset_seconds: i32,
}

#[derive(Debug, Deserialize)]
struct OmHourlyResponse<T> {
    hourly: T,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn utc_offset_seconds(&self, point: GeoPoint) -> Result<i32, ForecastError> {
        let query = [
            ("latitude", point.latitude.to_string()),
            ("longitude", point.longitude.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", "1".to_string()),
        ];
        let parsed: OmTimezoneResponse =
            self.get_json("timezone", &self.forecast_url, &query).await?;
        Ok(parsed.utc_offset_seconds)
    }

    async fn atmospheric(&self, point: GeoPoint) -> Result<AtmosphericSeries, ForecastError> {
        let query = self.series_query(point, ATMOSPHERIC_VARIABLES);
        let parsed: OmHourlyResponse<AtmosphericSeries> =
            self.get_json("forecast", &self.forecast_url, &query).await?;
        parsed.hourly.validate()?;
        Ok(parsed.hourly)
    }

    async fn marine(&self, point: GeoPoint) -> Result<MarineSeries, ForecastError> {
        let query = self.series_query(point, MARINE_VARIABLES);
        let parsed: OmHourlyResponse<MarineSeries> =
            self.get_json("marine", &self.marine_url, &query).await?;
        parsed.hourly.validate()?;
        Ok(parsed.hourly)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
