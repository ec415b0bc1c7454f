use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::clock::{self, SystemOffset};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// Days from the receipt date that a reply may need. A message received
/// after 23:30 rounds into the next day, and the longest lead time adds six
/// more, so the last hour asked for lies on day 7 counting from 0.
pub const MIN_FORECAST_DAYS: u8 = 8;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// marine_url = "https://marine-api.open-meteo.com/v1/marine"
/// timeout_secs = 10
/// past_days = 1
/// forecast_days = 8
/// system_utc_offset_hours = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint answering both timezone and hourly atmospheric queries.
    pub forecast_url: String,
    pub marine_url: String,
    pub timeout_secs: u64,
    /// Days of history requested with every series, for the pressure trend.
    pub past_days: u8,
    pub forecast_days: u8,
    /// Offset inbound receipt times are rounded in. Host offset when unset.
    pub system_utc_offset_hours: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            marine_url: DEFAULT_MARINE_URL.to_string(),
            timeout_secs: 10,
            past_days: 1,
            forecast_days: MIN_FORECAST_DAYS,
            system_utc_offset_hours: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "sms-forecast", "sms-forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.past_days == 0 {
            bail!("past_days must be at least 1, the pressure trend needs the previous hours");
        }
        if self.forecast_days < MIN_FORECAST_DAYS {
            bail!("forecast_days must be at least {MIN_FORECAST_DAYS} to cover the longest lead time");
        }
        if let Some(hours) = self.system_utc_offset_hours {
            clock::offset_from_hours(hours)
                .map_err(|_| anyhow!("system_utc_offset_hours {hours} is not a valid offset"))?;
        }
        Ok(())
    }

    /// Offset receipt times are expressed in: configured, or the host's.
    pub fn system_offset(&self) -> Result<SystemOffset> {
        match self.system_utc_offset_hours {
            Some(hours) => clock::offset_from_hours(hours)
                .map(SystemOffset::Fixed)
                .map_err(|_| anyhow!("system_utc_offset_hours {hours} is not a valid offset")),
            None => Ok(SystemOffset::Host),
        }
    }
}
