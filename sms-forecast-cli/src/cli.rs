use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::{Path, PathBuf};
use tracing::warn;

use sms_forecast_core::{
    AxisError, Config, InboundSms, MAX_SMS_LEN, clock, decode, provider_from_config, sms_outcome,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sms-forecast", version, about = "Answer coordinate SMS with a weather and sea forecast")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit provider endpoints and time settings.
    Configure,

    /// Show how an inbound message is understood.
    Decode {
        /// Message text, e.g. "042.44 3018.65 1".
        text: String,
    },

    /// Compute the reply for an inbound message.
    Outcome {
        /// Message text, e.g. "042.44 3018.65 1".
        text: String,

        /// Receipt time as RFC 3339 or Unix seconds; if absent, means "now".
        #[arg(long)]
        received_at: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Configure => configure(&path),
            Command::Decode { text } => {
                print!("{}", describe_decoded(&text));
                Ok(())
            }
            Command::Outcome { text, received_at } => {
                let config = Config::load_from(&path)?;
                outcome(&config, text, received_at.as_deref()).await
            }
        }
    }
}

fn configure(path: &Path) -> Result<()> {
    let current = Config::load_from(path)?;

    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&current.forecast_url)
        .prompt()?;
    let marine_url = Text::new("Marine endpoint:")
        .with_default(&current.marine_url)
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout, seconds:")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    let past_days = CustomType::<u8>::new("Days of history to request:")
        .with_default(current.past_days)
        .prompt()?;
    let forecast_days = CustomType::<u8>::new("Days of forecast to request:")
        .with_default(current.forecast_days)
        .prompt()?;

    let offset_default = current
        .system_utc_offset_hours
        .map(|h| h.to_string())
        .unwrap_or_default();
    let offset = Text::new("System UTC offset in hours (empty for this machine's):")
        .with_default(&offset_default)
        .prompt()?;

    let config = Config {
        forecast_url,
        marine_url,
        timeout_secs,
        past_days,
        forecast_days,
        system_utc_offset_hours: parse_offset(&offset)?,
    };
    config.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn outcome(config: &Config, text: String, received_at: Option<&str>) -> Result<()> {
    let received_at = match received_at {
        Some(raw) => parse_received_at(raw)?,
        None => Utc::now(),
    };

    let provider = provider_from_config(config)?;
    let system_offset = config.system_offset()?;
    let request = InboundSms { received_at, text };

    let reply = sms_outcome(provider.as_ref(), system_offset, &request)
        .await
        .with_context(|| format!("Could not answer '{}'", request.text))?;

    let len = reply.chars().count();
    if len > MAX_SMS_LEN {
        warn!(len, max = MAX_SMS_LEN, "reply is longer than one SMS");
    }

    println!("{reply}");
    Ok(())
}

fn describe_decoded(text: &str) -> String {
    let decoded = decode(text);
    let lead = match decoded.lead_hours {
        Some(h) => format!("{h} h"),
        None => "unspecified".to_string(),
    };

    format!(
        "latitude:  {}\nlongitude: {}\nlead time: {}\n",
        describe_axis(decoded.coordinate.latitude),
        describe_axis(decoded.coordinate.longitude),
        lead
    )
}

fn describe_axis(axis: Result<f64, AxisError>) -> String {
    match axis {
        Ok(v) => v.to_string(),
        Err(e) => format!("incorrect ({e})"),
    }
}

fn parse_received_at(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow!("Receipt time {secs} is out of range"));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Receipt time '{raw}' is neither RFC 3339 nor Unix seconds"))
}

fn parse_offset(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let hours: f64 = raw
        .parse()
        .with_context(|| format!("UTC offset '{raw}' is not a number"))?;
    clock::offset_from_hours(hours)?;
    Ok(Some(hours))
}
