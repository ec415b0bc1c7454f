use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    clock::{self, SystemOffset},
    codec, encoder,
    error::ForecastError,
    forecast,
    provider::ForecastProvider,
    timezone,
};

/// One inbound message, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundSms {
    pub received_at: DateTime<Utc>,
    pub text: String,
}

impl InboundSms {
    pub fn from_epoch(received_at_epoch: i64, text: impl Into<String>) -> Result<Self, ForecastError> {
        let received_at = DateTime::from_timestamp(received_at_epoch, 0).ok_or_else(|| {
            ForecastError::Validation(format!("receipt time {received_at_epoch} is out of range"))
        })?;
        Ok(Self { received_at, text: text.into() })
    }
}

/// Answer one inbound message: decode it, work out the forecast hour, fetch
/// the forecast and encode the reply.
///
/// `system_offset` is the offset receipt times are rounded in, taken at the
/// receipt instant. Nothing is returned unless every stage succeeds.
pub async fn sms_outcome(
    provider: &dyn ForecastProvider,
    system_offset: SystemOffset,
    request: &InboundSms,
) -> Result<String, ForecastError> {
    let decoded = codec::decode(&request.text);

    if !decoded.coordinate.is_valid() {
        warn!(text = %request.text, coordinate = ?decoded.coordinate, "rejecting SMS with incorrect coordinate");
        return Err(ForecastError::Validation(format!(
            "incorrect coordinate in '{}'",
            request.text
        )));
    }
    let lead_hours = decoded.lead_hours.ok_or_else(|| {
        warn!(text = %request.text, "rejecting SMS without lead time");
        ForecastError::Validation(format!(
            "no lead time in 0..={} hours in '{}'",
            codec::MAX_LEAD_HOURS,
            request.text
        ))
    })?;

    let remote_offset = timezone::resolve_utc_offset_hours(provider, &decoded.coordinate).await?;
    let host_offset = system_offset.at(request.received_at);
    let times = clock::compute_times(request.received_at, lead_hours, host_offset, remote_offset)?;
    let fields = forecast::fetch(provider, &decoded.coordinate, &times.series_key()).await?;
    let outcome = encoder::encode(&times.local_label, &fields);

    info!(
        text = %request.text,
        forecast_hour = %times.series_key(),
        outcome_len = outcome.len(),
        "answered SMS"
    );
    Ok(outcome)
}
