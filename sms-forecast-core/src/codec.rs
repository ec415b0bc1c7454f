//! Wire format of inbound coordinate messages.
//!
//! A message is three space-separated fragments:
//!
//! ```text
//! <hemLat><int>.<frac> <hemLng><int>.<frac> <leadHours>
//! 042.44 3018.65 1
//! ```
//!
//! The first digit of each axis fragment selects the hemisphere: `0`/`6` for
//! north/south latitude, `3`/`9` for east/west longitude. The text before the
//! decimal point, hemisphere digit included, is at least 3 characters wide.

use crate::{error::AxisError, model::Coordinate};

/// Longest lead time, in hours, that a message may request.
pub const MAX_LEAD_HOURS: u32 = 144;

const MIN_INTEGER_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedSms {
    pub coordinate: Coordinate,
    /// `None` when the fragment is absent, not a number or outside `0..=144`.
    pub lead_hours: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn bound(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn sign(self, code: char) -> Option<f64> {
        match (self, code) {
            (Axis::Latitude, '0') | (Axis::Longitude, '3') => Some(1.0),
            (Axis::Latitude, '6') | (Axis::Longitude, '9') => Some(-1.0),
            _ => None,
        }
    }

    /// Zero-padded width of the magnitude in canonical form.
    fn width(self) -> usize {
        match self {
            Axis::Latitude => 5,
            Axis::Longitude => 6,
        }
    }

    fn code(self, negative: bool) -> char {
        match (self, negative) {
            (Axis::Latitude, false) => '0',
            (Axis::Latitude, true) => '6',
            (Axis::Longitude, false) => '3',
            (Axis::Longitude, true) => '9',
        }
    }
}

/// Decode an inbound message. Never fails: bad axes come back as `Err`
/// inside the coordinate, a bad lead time as `None`.
pub fn decode(raw: &str) -> DecodedSms {
    let tokens: Vec<&str> = raw.split(' ').collect();

    let latitude = decode_axis(tokens.first().copied(), Axis::Latitude);
    let longitude = decode_axis(tokens.get(1).copied(), Axis::Longitude);
    let lead_hours = tokens.get(2).and_then(|t| decode_lead_hours(t));

    DecodedSms {
        coordinate: Coordinate { latitude, longitude },
        lead_hours,
    }
}

fn decode_axis(fragment: Option<&str>, axis: Axis) -> Result<f64, AxisError> {
    let fragment = fragment.filter(|f| !f.is_empty()).ok_or(AxisError::Missing)?;

    let mut chars = fragment.chars();
    let code = chars.next().ok_or(AxisError::Missing)?;
    if !code.is_ascii_digit() {
        return Err(AxisError::Hemisphere);
    }

    let magnitude: f64 = chars.as_str().parse().map_err(|_| AxisError::Malformed)?;
    if !magnitude.is_finite() {
        return Err(AxisError::Malformed);
    }
    if !(0.0..=axis.bound()).contains(&magnitude) {
        return Err(AxisError::OutOfRange);
    }

    let integer_width = fragment.split('.').next().map_or(0, str::len);
    if integer_width < MIN_INTEGER_WIDTH {
        return Err(AxisError::ShortIntegerPart);
    }

    let sign = axis.sign(code).ok_or(AxisError::Hemisphere)?;
    Ok(sign * magnitude)
}

fn decode_lead_hours(fragment: &str) -> Option<u32> {
    fragment
        .parse::<u32>()
        .ok()
        .filter(|hours| *hours <= MAX_LEAD_HOURS)
}

/// Build the canonical wire form of a request: two decimals, magnitudes
/// zero-padded to `dd.dd` for latitude and `ddd.dd` for longitude.
pub fn encode_fragment(latitude: f64, longitude: f64, lead_hours: u32) -> String {
    format!(
        "{} {} {}",
        encode_axis(latitude, Axis::Latitude),
        encode_axis(longitude, Axis::Longitude),
        lead_hours
    )
}

fn encode_axis(value: f64, axis: Axis) -> String {
    let code = axis.code(value.is_sign_negative() && value != 0.0);
    format!("{code}{:0width$.2}", value.abs(), width = axis.width())
}
