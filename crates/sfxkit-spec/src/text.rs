//! Comma-separated text format.
//!
//! The text form is a single line of 24 fields: the shape code followed by the
//! 23 real-valued parameters in [`TEXT_FIELDS`] order. Values are single
//! precision, the same as the binary form, and are widened to `f64` on load.
//! Empty fields stand for zero, which keeps typical presets short:
//!
//! ```text
//! 0,,0.0736,0.4591,0.3858,0.5416,,,,,,0.5273,0.5732,,,,,,1,,,,,0.5
//! ```

use crate::error::{FormatError, FormatResult};
use crate::params::{Field, ParameterSet, WaveShape};

/// Number of fields in the text layout (shape + 23 parameters).
pub const TEXT_FIELD_COUNT: usize = 24;

/// Parameter order of text fields 1 through 23.
pub const TEXT_FIELDS: [Field; TEXT_FIELD_COUNT - 1] = [
    Field::AttackTime,
    Field::SustainTime,
    Field::SustainPunch,
    Field::DecayTime,
    Field::StartFrequency,
    Field::MinFrequency,
    Field::Slide,
    Field::DeltaSlide,
    Field::VibratoDepth,
    Field::VibratoSpeed,
    Field::ChangeAmount,
    Field::ChangeSpeed,
    Field::SquareDuty,
    Field::DutySweep,
    Field::RepeatSpeed,
    Field::PhaserOffset,
    Field::PhaserSweep,
    Field::LowPassCutoff,
    Field::LowPassCutoffSweep,
    Field::LowPassResonance,
    Field::HighPassCutoff,
    Field::HighPassCutoffSweep,
    Field::MasterVolume,
];

/// Maps the shape field. Only the exact codes 0, 1 and 2 select a tonal shape;
/// everything else, the empty field included, selects noise.
fn parse_shape(field: &str) -> WaveShape {
    match field {
        "0" => WaveShape::Square,
        "1" => WaveShape::Sawtooth,
        "2" => WaveShape::Sine,
        _ => WaveShape::Noise,
    }
}

fn parse_value(index: usize, field: Field, text: &str) -> FormatResult<f64> {
    if text.is_empty() {
        return Ok(0.0);
    }

    let value: f32 = text.parse().map_err(|_| FormatError::InvalidNumber {
        index,
        name: field.name(),
        value: text.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FormatError::NonFinite { name: field.name() });
    }

    Ok(f64::from(value))
}

impl ParameterSet {
    /// Parses the comma-separated text form.
    ///
    /// Whitespace around the whole string and around each field is ignored.
    /// Fields past the 24th are ignored; fewer than 24 is an error.
    pub fn from_text(text: &str) -> FormatResult<Self> {
        let fields: Vec<&str> = text.trim().split(',').map(str::trim).collect();

        if fields.len() < TEXT_FIELD_COUNT {
            return Err(FormatError::MissingFields {
                expected: TEXT_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let mut params = ParameterSet {
            wave_shape: parse_shape(fields[0]),
            ..ParameterSet::default()
        };

        for (offset, field) in TEXT_FIELDS.iter().enumerate() {
            let index = offset + 1;
            *params.get_mut(*field) = parse_value(index, *field, fields[index])?;
        }

        Ok(params)
    }

    /// Serializes to the compact text form, writing zeros as empty fields.
    ///
    /// Values are written at single precision, so parsing the output gives
    /// each field rounded to the nearest `f32`.
    pub fn to_text(&self) -> String {
        let mut out = self.wave_shape.code().to_string();
        for field in TEXT_FIELDS {
            out.push(',');
            let value = self.get(field) as f32;
            if value != 0.0 {
                out.push_str(&value.to_string());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COIN: &str = "0,,0.0736,0.4591,0.3858,0.5416,,,,,,0.5273,0.5732,,,,,,1,,,,,0.5";

    fn single(value: f32) -> f64 {
        f64::from(value)
    }

    fn with_shape(shape: &str) -> String {
        format!("{shape}{}", ",".repeat(TEXT_FIELD_COUNT - 1))
    }

    #[test]
    fn test_shape_field_mapping() {
        let cases = [
            ("0", WaveShape::Square),
            ("1", WaveShape::Sawtooth),
            ("2", WaveShape::Sine),
            ("3", WaveShape::Noise),
            ("9", WaveShape::Noise),
            ("x", WaveShape::Noise),
            ("", WaveShape::Noise),
            ("00", WaveShape::Noise),
        ];
        for (field, expected) in cases {
            let params = ParameterSet::from_text(&with_shape(field)).unwrap();
            assert_eq!(params.wave_shape, expected, "shape field {field:?}");
        }
    }

    #[test]
    fn test_coin_preset_fields() {
        let params = ParameterSet::from_text(COIN).unwrap();

        assert_eq!(params.wave_shape, WaveShape::Square);
        assert_eq!(params.attack_time, 0.0);
        assert_eq!(params.sustain_time, single(0.0736));
        assert_eq!(params.sustain_punch, single(0.4591));
        assert_eq!(params.decay_time, single(0.3858));
        assert_eq!(params.start_frequency, single(0.5416));
        assert_eq!(params.change_amount, single(0.5273));
        assert_eq!(params.change_speed, single(0.5732));
        assert_eq!(params.low_pass_cutoff, 1.0);
        assert_eq!(params.master_volume, 0.5);

        assert_eq!(params.slide, 0.0);
        assert_eq!(params.phaser_offset, 0.0);
        assert_eq!(params.high_pass_cutoff, 0.0);
    }

    #[test]
    fn test_empty_fields_are_zero() {
        let params = ParameterSet::from_text(&with_shape("1")).unwrap();
        for field in Field::ALL {
            assert_eq!(params.get(field), 0.0, "{}", field.name());
        }
    }

    #[test]
    fn test_field_order() {
        let text = (0..TEXT_FIELD_COUNT)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let params = ParameterSet::from_text(&text).unwrap();
        for (offset, field) in TEXT_FIELDS.iter().enumerate() {
            assert_eq!(params.get(*field), (offset + 1) as f64, "{}", field.name());
        }
    }

    #[test]
    fn test_too_few_fields() {
        let err = ParameterSet::from_text("0,0.1,0.2").unwrap_err();
        match err {
            FormatError::MissingFields { expected, found } => {
                assert_eq!(expected, 24);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_string_is_missing_fields() {
        let err = ParameterSet::from_text("").unwrap_err();
        assert!(matches!(err, FormatError::MissingFields { found: 1, .. }));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let text = format!("{COIN},0.9,0.8");
        let params = ParameterSet::from_text(&text).unwrap();
        assert_eq!(params, ParameterSet::from_text(COIN).unwrap());
    }

    #[test]
    fn test_invalid_number_reports_field() {
        let text = COIN.replacen("0.5416", "fast", 1);
        let err = ParameterSet::from_text(&text).unwrap_err();
        match err {
            FormatError::InvalidNumber { index, name, value } => {
                assert_eq!(index, 5);
                assert_eq!(name, "start_frequency");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let text = COIN.replacen("0.5416", "inf", 1);
        let err = ParameterSet::from_text(&text).unwrap_err();
        assert!(matches!(err, FormatError::NonFinite { name: "start_frequency" }));
    }

    #[test]
    fn test_whitespace_and_trailing_newline() {
        let text = format!(" {} \r\n", COIN.replace(",0.0736,", ", 0.0736 ,"));
        let params = ParameterSet::from_text(&text).unwrap();
        assert_eq!(params, ParameterSet::from_text(COIN).unwrap());
    }

    #[test]
    fn test_to_text_reproduces_compact_form() {
        let params = ParameterSet::from_text(COIN).unwrap();
        assert_eq!(params.to_text(), COIN);
        assert_eq!(params.to_string(), COIN);
    }

    #[test]
    fn test_values_parse_at_single_precision() {
        let text = COIN.replacen("0.5416", "0.123456789012345", 1);
        let params = ParameterSet::from_text(&text).unwrap();
        let narrowed: f32 = "0.123456789012345".parse().unwrap();
        assert_eq!(params.start_frequency, f64::from(narrowed));
        assert_ne!(params.start_frequency, 0.123456789012345);
    }

    #[test]
    fn test_text_matches_binary_precision() {
        let params = ParameterSet::from_text(COIN).unwrap();
        let bytes = params.to_binary(crate::binary::LATEST_VERSION).unwrap();
        let from_binary = ParameterSet::from_binary(&bytes).unwrap();
        assert_eq!(from_binary, params);
    }

    #[test]
    fn test_out_of_single_range_rejected() {
        let text = COIN.replacen("0.5416", "1e200", 1);
        let err = ParameterSet::from_text(&text).unwrap_err();
        assert!(matches!(err, FormatError::NonFinite { name: "start_frequency" }));
    }

    #[test]
    fn test_to_text_round_trip_negative_values() {
        let params = ParameterSet::from_text(
            "2,0.0028,0.9527,0.1807,0.4139,0.5534,,0.0022,-0.0816,,0.9387,-0.9916,,0.8259,0.0015,0.068,-0.2339,-0.132,0.8973,-0.0149,0.0783,0.0453,,0.5",
        )
        .unwrap();
        let parsed: ParameterSet = params.to_text().parse().unwrap();
        assert_eq!(parsed, params);
    }
}
