//! Sound parameter set and its field model.
//!
//! A [`ParameterSet`] is the compact, versioned description of one sound effect:
//! an oscillator shape plus 23 real-valued synthesis parameters. Values are stored
//! raw; every perceptual transform (squaring, cubing, clamping) happens in the
//! synthesis backend.

use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};

/// Oscillator waveform shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveShape {
    /// Pulse wave with a sweepable duty cycle.
    #[default]
    Square,
    /// Falling ramp.
    Sawtooth,
    /// Polynomial sine approximation.
    Sine,
    /// 32-step random noise, refreshed every period.
    Noise,
}

impl WaveShape {
    /// All shapes in wire-code order.
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Square,
        WaveShape::Sawtooth,
        WaveShape::Sine,
        WaveShape::Noise,
    ];

    /// Returns the numeric code used by both wire formats.
    pub fn code(self) -> i32 {
        match self {
            WaveShape::Square => 0,
            WaveShape::Sawtooth => 1,
            WaveShape::Sine => 2,
            WaveShape::Noise => 3,
        }
    }

    /// Maps a wire code to a shape. Unknown codes fall back to noise.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => WaveShape::Square,
            1 => WaveShape::Sawtooth,
            2 => WaveShape::Sine,
            _ => WaveShape::Noise,
        }
    }

    /// Returns the lowercase shape name.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveShape::Square => "square",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Sine => "sine",
            WaveShape::Noise => "noise",
        }
    }
}

impl std::fmt::Display for WaveShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized representation selector for [`ParameterSet::from_reader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterFormat {
    /// Comma-separated text, 24 fields.
    Text,
    /// Versioned little-endian `.sfxr` layout.
    Binary,
}

/// Identifies one of the real-valued fields of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MasterVolume,
    AttackTime,
    SustainTime,
    SustainPunch,
    DecayTime,
    StartFrequency,
    MinFrequency,
    Slide,
    DeltaSlide,
    VibratoDepth,
    VibratoSpeed,
    ChangeAmount,
    ChangeSpeed,
    SquareDuty,
    DutySweep,
    RepeatSpeed,
    PhaserOffset,
    PhaserSweep,
    LowPassCutoff,
    LowPassCutoffSweep,
    LowPassResonance,
    HighPassCutoff,
    HighPassCutoffSweep,
}

impl Field {
    /// Every real-valued field.
    pub const ALL: [Field; 23] = [
        Field::MasterVolume,
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
    ];

    /// Snake-case field name, matching the JSON representation.
    pub fn name(self) -> &'static str {
        match self {
            Field::MasterVolume => "master_volume",
            Field::AttackTime => "attack_time",
            Field::SustainTime => "sustain_time",
            Field::SustainPunch => "sustain_punch",
            Field::DecayTime => "decay_time",
            Field::StartFrequency => "start_frequency",
            Field::MinFrequency => "min_frequency",
            Field::Slide => "slide",
            Field::DeltaSlide => "delta_slide",
            Field::VibratoDepth => "vibrato_depth",
            Field::VibratoSpeed => "vibrato_speed",
            Field::ChangeAmount => "change_amount",
            Field::ChangeSpeed => "change_speed",
            Field::SquareDuty => "square_duty",
            Field::DutySweep => "duty_sweep",
            Field::RepeatSpeed => "repeat_speed",
            Field::PhaserOffset => "phaser_offset",
            Field::PhaserSweep => "phaser_sweep",
            Field::LowPassCutoff => "low_pass_cutoff",
            Field::LowPassCutoffSweep => "low_pass_cutoff_sweep",
            Field::LowPassResonance => "low_pass_resonance",
            Field::HighPassCutoff => "high_pass_cutoff",
            Field::HighPassCutoffSweep => "high_pass_cutoff_sweep",
        }
    }
}

/// A complete set of synthesis parameters.
///
/// Fields are unbounded reals; the conventional editor range is `[-1, 1]` (or
/// `[0, 1]` for durations and volumes). The default is the all-zero set with a
/// square oscillator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    /// Oscillator shape.
    pub wave_shape: WaveShape,

    /// Output gain, applied squared.
    pub master_volume: f64,
    pub attack_time: f64,
    pub sustain_time: f64,
    /// Extra volume boost at the start of the sustain stage.
    pub sustain_punch: f64,
    pub decay_time: f64,

    pub start_frequency: f64,
    /// Frequency floor; when non-zero, dropping below it ends the sound.
    pub min_frequency: f64,

    pub slide: f64,
    /// Acceleration of `slide`.
    pub delta_slide: f64,

    pub vibrato_depth: f64,
    pub vibrato_speed: f64,

    /// One-shot pitch jump; positive raises, negative lowers.
    pub change_amount: f64,
    pub change_speed: f64,

    /// Square duty cycle (square shape only).
    pub square_duty: f64,
    pub duty_sweep: f64,

    /// Rate at which slide/duty/change are re-derived during playback.
    pub repeat_speed: f64,

    pub phaser_offset: f64,
    pub phaser_sweep: f64,

    pub low_pass_cutoff: f64,
    pub low_pass_cutoff_sweep: f64,
    pub low_pass_resonance: f64,

    pub high_pass_cutoff: f64,
    pub high_pass_cutoff_sweep: f64,
}

impl ParameterSet {
    /// Creates the all-zero parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a parameter set from a byte stream in the given format.
    ///
    /// This is the boundary used by host content loaders: they supply the stream
    /// and format selector and receive a complete set or an error, never a
    /// partially populated one.
    pub fn from_reader<R: Read>(mut reader: R, format: ParameterFormat) -> FormatResult<Self> {
        match format {
            ParameterFormat::Text => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                let text = String::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)?;
                Self::from_text(&text)
            }
            ParameterFormat::Binary => crate::binary::read_binary(&mut reader),
        }
    }

    /// Parses an in-memory buffer in the given format.
    pub fn parse(data: &[u8], format: ParameterFormat) -> FormatResult<Self> {
        Self::from_reader(data, format)
    }

    /// Parses a JSON preset.
    pub fn from_json(json: &str) -> FormatResult<Self> {
        let params: ParameterSet = serde_json::from_str(json)?;
        params.ensure_finite()?;
        Ok(params)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> FormatResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the value of a field.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::MasterVolume => self.master_volume,
            Field::AttackTime => self.attack_time,
            Field::SustainTime => self.sustain_time,
            Field::SustainPunch => self.sustain_punch,
            Field::DecayTime => self.decay_time,
            Field::StartFrequency => self.start_frequency,
            Field::MinFrequency => self.min_frequency,
            Field::Slide => self.slide,
            Field::DeltaSlide => self.delta_slide,
            Field::VibratoDepth => self.vibrato_depth,
            Field::VibratoSpeed => self.vibrato_speed,
            Field::ChangeAmount => self.change_amount,
            Field::ChangeSpeed => self.change_speed,
            Field::SquareDuty => self.square_duty,
            Field::DutySweep => self.duty_sweep,
            Field::RepeatSpeed => self.repeat_speed,
            Field::PhaserOffset => self.phaser_offset,
            Field::PhaserSweep => self.phaser_sweep,
            Field::LowPassCutoff => self.low_pass_cutoff,
            Field::LowPassCutoffSweep => self.low_pass_cutoff_sweep,
            Field::LowPassResonance => self.low_pass_resonance,
            Field::HighPassCutoff => self.high_pass_cutoff,
            Field::HighPassCutoffSweep => self.high_pass_cutoff_sweep,
        }
    }

    /// Returns a mutable reference to a field.
    pub fn get_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::MasterVolume => &mut self.master_volume,
            Field::AttackTime => &mut self.attack_time,
            Field::SustainTime => &mut self.sustain_time,
            Field::SustainPunch => &mut self.sustain_punch,
            Field::DecayTime => &mut self.decay_time,
            Field::StartFrequency => &mut self.start_frequency,
            Field::MinFrequency => &mut self.min_frequency,
            Field::Slide => &mut self.slide,
            Field::DeltaSlide => &mut self.delta_slide,
            Field::VibratoDepth => &mut self.vibrato_depth,
            Field::VibratoSpeed => &mut self.vibrato_speed,
            Field::ChangeAmount => &mut self.change_amount,
            Field::ChangeSpeed => &mut self.change_speed,
            Field::SquareDuty => &mut self.square_duty,
            Field::DutySweep => &mut self.duty_sweep,
            Field::RepeatSpeed => &mut self.repeat_speed,
            Field::PhaserOffset => &mut self.phaser_offset,
            Field::PhaserSweep => &mut self.phaser_sweep,
            Field::LowPassCutoff => &mut self.low_pass_cutoff,
            Field::LowPassCutoffSweep => &mut self.low_pass_cutoff_sweep,
            Field::LowPassResonance => &mut self.low_pass_resonance,
            Field::HighPassCutoff => &mut self.high_pass_cutoff,
            Field::HighPassCutoffSweep => &mut self.high_pass_cutoff_sweep,
        }
    }

    /// Sets a field, builder style.
    pub fn with(mut self, field: Field, value: f64) -> Self {
        *self.get_mut(field) = value;
        self
    }

    /// Fails if any field is NaN or infinite.
    pub fn ensure_finite(&self) -> FormatResult<()> {
        match Field::ALL.iter().find(|f| !self.get(**f).is_finite()) {
            Some(field) => Err(FormatError::NonFinite {
                name: field.name(),
            }),
            None => Ok(()),
        }
    }
}

impl FromStr for ParameterSet {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl std::fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}
