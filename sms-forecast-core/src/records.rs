//! Inbound SMS records, as kept by the service that receives them.
//!
//! Storage lives outside this crate; [`SmsStore`] is the seam.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    clock::SystemOffset,
    error::ForecastError,
    pipeline::{InboundSms, sms_outcome},
    provider::ForecastProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SmsStatus {
    Received,
    Answered,
    Failed,
}

impl From<SmsStatus> for u8 {
    fn from(status: SmsStatus) -> Self {
        match status {
            SmsStatus::Received => 0,
            SmsStatus::Answered => 1,
            SmsStatus::Failed => 2,
        }
    }
}

impl TryFrom<u8> for SmsStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SmsStatus::Received),
            1 => Ok(SmsStatus::Answered),
            2 => Ok(SmsStatus::Failed),
            other => Err(format!("unknown SMS status {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsRecord {
    pub id: i64,
    pub user_id: i64,
    pub income_sms: String,
    pub creation_time: DateTime<Utc>,
    pub outcome_sms: Option<String>,
    pub status: SmsStatus,
    pub status_time: DateTime<Utc>,
}

#[async_trait]
pub trait SmsStore: Send + Sync {
    async fn inbound(&self, id: i64) -> Result<Option<SmsRecord>>;

    async fn save(&self, record: &SmsRecord) -> Result<()>;
}

/// Answer a stored inbound message and write the result back.
///
/// Records that are not in [`SmsStatus::Received`] are returned untouched.
/// On a forecast failure the record is saved as [`SmsStatus::Failed`]
/// without outbound text and the forecast error is returned, even when that
/// save itself fails.
pub async fn process_record(
    store: &dyn SmsStore,
    provider: &dyn ForecastProvider,
    system_offset: SystemOffset,
    id: i64,
) -> Result<SmsRecord> {
    let mut record = store
        .inbound(id)
        .await?
        .ok_or_else(|| ForecastError::NotFound(format!("SMS record {id}")))?;

    if record.status != SmsStatus::Received {
        return Ok(record);
    }

    let request = InboundSms {
        received_at: record.creation_time,
        text: record.income_sms.clone(),
    };
    let result = sms_outcome(provider, system_offset, &request).await;

    record.status_time = Utc::now();
    match result {
        Ok(outcome) => {
            record.outcome_sms = Some(outcome);
            record.status = SmsStatus::Answered;
            store.save(&record).await?;
            Ok(record)
        }
        Err(err) => {
            warn!(id, error = %err, "failed to answer SMS");
            record.outcome_sms = None;
            record.status = SmsStatus::Failed;
            if let Err(save_err) = store.save(&record).await {
                warn!(id, error = %save_err, "failed to store failed SMS status");
            }
            Err(err.into())
        }
    }
}
