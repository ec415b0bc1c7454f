//! Outbound SMS text.
//!
//! ```text
//! 0714_18/V24140/WC3/T18.3/WD250/WS12.4/WG25.6/P1013.2-...-1012.1/H72/RP13.2/C100/WaH0.52/WaD245/WaP4.35
//! ```

use std::fmt;

use crate::model::OutcomeFields;

/// Width of the outbound text column in the SMS store.
pub const MAX_SMS_LEN: usize = 144;

/// Written in place of a value the provider left empty.
pub const MISSING_VALUE: &str = "N";

const FIELD_SEPARATOR: char = '/';
const PRESSURE_SEPARATOR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundPayload {
    local_label: String,
    fields: Vec<(&'static str, String)>,
}

impl OutboundPayload {
    pub fn new(local_label: &str, outcome: &OutcomeFields) -> Self {
        let pressure = outcome
            .pressure
            .iter()
            .map(|v| value(*v))
            .collect::<Vec<_>>()
            .join(PRESSURE_SEPARATOR);

        let fields = vec![
            ("V", value(outcome.visibility)),
            ("WC", value(outcome.weather_code)),
            ("T", value(outcome.temperature)),
            ("WD", value(outcome.wind_direction)),
            ("WS", value(outcome.wind_speed)),
            ("WG", value(outcome.wind_gusts)),
            ("P", pressure),
            ("H", value(outcome.humidity)),
            ("RP", value(outcome.dew_point)),
            ("C", value(outcome.cloud_cover)),
            ("WaH", value(outcome.wave_height)),
            ("WaD", value(outcome.wave_direction)),
            ("WaP", value(outcome.wave_period)),
        ];

        Self { local_label: local_label.to_string(), fields }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn fits_sms(&self) -> bool {
        self.to_string().chars().count() <= MAX_SMS_LEN
    }
}

impl fmt::Display for OutboundPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_label)?;
        for (tag, value) in &self.fields {
            write!(f, "{FIELD_SEPARATOR}{tag}{value}")?;
        }
        Ok(())
    }
}

pub fn encode(local_label: &str, outcome: &OutcomeFields) -> String {
    OutboundPayload::new(local_label, outcome).to_string()
}

fn value(v: Option<f64>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> OutcomeFields {
        OutcomeFields {
            visibility: Some(24140.0),
            weather_code: Some(3.0),
            temperature: Some(18.3),
            wind_direction: Some(250.0),
            wind_speed: Some(12.4),
            wind_gusts: Some(25.6),
            pressure: [
                Some(1013.2),
                Some(1013.1),
                Some(1012.9),
                Some(1012.8),
                Some(1012.6),
                Some(1012.5),
                Some(1012.3),
                Some(1012.1),
            ],
            humidity: Some(72.0),
            dew_point: Some(13.2),
            cloud_cover: Some(100.0),
            wave_height: Some(0.52),
            wave_direction: Some(245.0),
            wave_period: Some(4.35),
        }
    }

    #[test]
    fn encodes_fields_in_canonical_order() {
        assert_eq!(
            encode("0714_18", &outcome()),
            "0714_18/V24140/WC3/T18.3/WD250/WS12.4/WG25.6\
             /P1013.2-1013.1-1012.9-1012.8-1012.6-1012.5-1012.3-1012.1\
             /H72/RP13.2/C100/WaH0.52/WaD245/WaP4.35"
        );
    }

    #[test]
    fn pressure_is_a_single_field() {
        let payload = OutboundPayload::new("0714_18", &outcome());
        let tags: Vec<&str> = payload.fields().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(
            tags,
            ["V", "WC", "T", "WD", "WS", "WG", "P", "H", "RP", "C", "WaH", "WaD", "WaP"]
        );
    }

    #[test]
    fn missing_values_are_marked() {
        let mut fields = outcome();
        fields.wave_height = None;
        fields.pressure[0] = None;
        fields.temperature = Some(-2.5);

        let text = encode("0101_00", &fields);
        assert!(text.contains("/WaHN/"));
        assert!(text.contains("/PN-1013.1-"));
        assert!(text.contains("/T-2.5/"));
    }

    #[test]
    fn typical_reply_fits_one_sms() {
        assert!(OutboundPayload::new("0714_18", &outcome()).fits_sms());
    }
}
