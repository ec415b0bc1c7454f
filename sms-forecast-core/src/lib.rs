//! Core library for the `sms-forecast` responder.
//!
//! An inbound SMS such as `042.44 3018.65 1` carries a coordinate and a lead
//! time in hours. This crate turns it into a compact reply with the weather
//! and sea state forecast for that place and hour.
//!
//! This crate defines:
//! - The inbound wire format ([`codec`]) and the outbound one ([`encoder`])
//! - Forecast hour arithmetic ([`clock`])
//! - Abstraction over forecast providers, with an Open-Meteo implementation
//! - The end-to-end pipeline ([`sms_outcome`]) and stored-record processing
//! - Configuration handling
//!
//! It is used by `sms-forecast-cli`, but can also be embedded in the service
//! that receives the messages.

pub mod clock;
pub mod codec;
pub mod config;
pub mod encoder;
pub mod error;
pub mod forecast;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod records;
pub mod timezone;

pub use clock::SystemOffset;
pub use codec::{DecodedSms, decode};
pub use config::Config;
pub use encoder::{MAX_SMS_LEN, OutboundPayload, encode};
pub use error::{AxisError, ErrorKind, ForecastError};
pub use model::{AtmosphericSeries, Coordinate, GeoPoint, MarineSeries, OutcomeFields};
pub use pipeline::{InboundSms, sms_outcome};
pub use provider::{ForecastProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use records::{SmsRecord, SmsStatus, SmsStore, process_record};
