//! Error types shared by the forecast pipeline.

use thiserror::Error;

/// Why a single coordinate axis of an inbound SMS could not be decoded.
///
/// These never abort decoding; they are kept inside [`crate::Coordinate`]
/// so both axes can be reported at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AxisError {
    #[error("fragment is missing")]
    Missing,

    #[error("unknown hemisphere code")]
    Hemisphere,

    #[error("magnitude is not a number")]
    Malformed,

    #[error("magnitude is out of range")]
    OutOfRange,

    #[error("integer part is shorter than 3 characters")]
    ShortIntegerPart,
}

/// Coarse error category, for callers that translate failures into
/// transport-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Provider,
    NotFound,
}

#[derive(Debug, Error)]
pub enum ForecastError {
    /// The inbound message cannot be answered (bad coordinate, no lead time).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Network failure or timeout talking to a provider.
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with an error status or a malformed body.
    #[error("provider error: {0}")]
    Provider(String),

    /// The requested timestamp (or its pressure history) is not in the series.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) | Self::Provider(_) => ErrorKind::Provider,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }
}
