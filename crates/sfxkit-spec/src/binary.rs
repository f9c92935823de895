//! Versioned little-endian `.sfxr` binary format.
//!
//! The layout is a 4-byte version tag followed by the entries of
//! [`BINARY_LAYOUT`] in order. Each entry names the first version that carries
//! it; entries newer than the file's version are absent from the stream and the
//! corresponding field keeps its default.
//!
//! Repeat speed has no slot in this layout; sets loaded from binary always have
//! it at zero.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{FormatError, FormatResult};
use crate::params::{Field, ParameterSet, WaveShape};

/// Versions accepted by the reader and writer.
pub const SUPPORTED_VERSIONS: [i32; 3] = [100, 101, 102];

/// Newest layout version.
pub const LATEST_VERSION: i32 = 102;

/// Master volume used when the stream predates version 102.
pub const DEFAULT_MASTER_VOLUME: f64 = 0.5;

/// What a layout entry holds on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Shape code, `i32`.
    Shape,
    /// A parameter, `f32`.
    Value(Field),
    /// Legacy vibrato delay, `f32`, read and discarded.
    VibratoDelay,
    /// Legacy filter-enabled flag, one byte, read and discarded.
    FilterEnabled,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Slot::Shape => "wave_shape",
            Slot::Value(field) => field.name(),
            Slot::VibratoDelay => "vibrato_delay",
            Slot::FilterEnabled => "filter_enabled",
        }
    }
}

/// One entry of the binary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Wire content.
    pub slot: Slot,
    /// First version in which the entry is present.
    pub since: i32,
}

const fn entry(slot: Slot, since: i32) -> LayoutEntry {
    LayoutEntry { slot, since }
}

/// Wire order of the binary format, after the version tag.
pub const BINARY_LAYOUT: [LayoutEntry; 25] = [
    entry(Slot::Shape, 100),
    entry(Slot::Value(Field::MasterVolume), 102),
    entry(Slot::Value(Field::StartFrequency), 100),
    entry(Slot::Value(Field::MinFrequency), 100),
    entry(Slot::Value(Field::Slide), 100),
    entry(Slot::Value(Field::DeltaSlide), 101),
    entry(Slot::Value(Field::SquareDuty), 100),
    entry(Slot::Value(Field::DutySweep), 100),
    entry(Slot::Value(Field::VibratoDepth), 100),
    entry(Slot::Value(Field::VibratoSpeed), 100),
    entry(Slot::VibratoDelay, 100),
    entry(Slot::Value(Field::AttackTime), 100),
    entry(Slot::Value(Field::SustainTime), 100),
    entry(Slot::Value(Field::DecayTime), 100),
    entry(Slot::Value(Field::SustainPunch), 100),
    entry(Slot::FilterEnabled, 100),
    entry(Slot::Value(Field::LowPassResonance), 100),
    entry(Slot::Value(Field::LowPassCutoff), 100),
    entry(Slot::Value(Field::LowPassCutoffSweep), 100),
    entry(Slot::Value(Field::HighPassCutoff), 100),
    entry(Slot::Value(Field::HighPassCutoffSweep), 100),
    entry(Slot::Value(Field::PhaserOffset), 100),
    entry(Slot::Value(Field::PhaserSweep), 100),
    entry(Slot::Value(Field::ChangeSpeed), 101),
    entry(Slot::Value(Field::ChangeAmount), 101),
];

/// Returns the layout entries present in a given version, in wire order.
pub fn entries_for(version: i32) -> impl Iterator<Item = &'static LayoutEntry> {
    BINARY_LAYOUT.iter().filter(move |e| e.since <= version)
}

fn check_version(version: i32) -> FormatResult<()> {
    if SUPPORTED_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(FormatError::UnsupportedVersion { version })
    }
}

fn eof_as(field: &'static str) -> impl FnOnce(io::Error) -> FormatError {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::UnexpectedEof { field }
        } else {
            FormatError::Io(err)
        }
    }
}

/// Reads a binary parameter set. Trailing bytes after the layout are ignored.
pub(crate) fn read_binary<R: Read>(reader: &mut R) -> FormatResult<ParameterSet> {
    let version = reader
        .read_i32::<LittleEndian>()
        .map_err(eof_as("version"))?;
    check_version(version)?;

    let mut params = ParameterSet {
        master_volume: DEFAULT_MASTER_VOLUME,
        ..ParameterSet::default()
    };

    for entry in entries_for(version) {
        let name = entry.slot.name();
        match entry.slot {
            Slot::Shape => {
                let code = reader.read_i32::<LittleEndian>().map_err(eof_as(name))?;
                params.wave_shape = WaveShape::from_code(code);
            }
            Slot::Value(field) => {
                let value = reader.read_f32::<LittleEndian>().map_err(eof_as(name))?;
                if !value.is_finite() {
                    return Err(FormatError::NonFinite { name });
                }
                *params.get_mut(field) = f64::from(value);
            }
            Slot::VibratoDelay => {
                reader.read_f32::<LittleEndian>().map_err(eof_as(name))?;
            }
            Slot::FilterEnabled => {
                reader.read_u8().map_err(eof_as(name))?;
            }
        }
    }

    Ok(params)
}

fn write_binary<W: Write>(params: &ParameterSet, version: i32, writer: &mut W) -> io::Result<()> {
    writer.write_i32::<LittleEndian>(version)?;

    let filters_on = (params.low_pass_cutoff - 1.0).abs() > 0.01 || params.high_pass_cutoff != 0.0;

    for entry in entries_for(version) {
        match entry.slot {
            Slot::Shape => writer.write_i32::<LittleEndian>(params.wave_shape.code())?,
            Slot::Value(field) => writer.write_f32::<LittleEndian>(params.get(field) as f32)?,
            Slot::VibratoDelay => writer.write_f32::<LittleEndian>(0.0)?,
            Slot::FilterEnabled => writer.write_u8(u8::from(filters_on))?,
        }
    }

    Ok(())
}

impl ParameterSet {
    /// Parses the binary `.sfxr` layout from a byte slice.
    pub fn from_binary(data: &[u8]) -> FormatResult<Self> {
        let mut cursor = data;
        read_binary(&mut cursor)
    }

    /// Serializes to the binary layout of the given version.
    ///
    /// Fields absent from that version are not written, so writing an older
    /// version loses them. Values are narrowed to `f32`.
    pub fn to_binary(&self, version: i32) -> FormatResult<Vec<u8>> {
        check_version(version)?;
        let mut out = Vec::with_capacity(4 + BINARY_LAYOUT.len() * 4);
        write_binary(self, version, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Builds a stream by hand, independent of the writer.
    struct Stream(Vec<u8>);

    impl Stream {
        fn new(version: i32) -> Self {
            Stream(version.to_le_bytes().to_vec())
        }

        fn int(mut self, v: i32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }

        fn float(mut self, v: f32) -> Self {
            self.0.extend_from_slice(&v.to_le_bytes());
            self
        }

        fn byte(mut self, v: u8) -> Self {
            self.0.push(v);
            self
        }

        /// Appends the fields common to every version after the optional ones.
        fn body(self) -> Self {
            self.float(0.35) // square duty
                .float(0.05) // duty sweep
                .float(0.25) // vibrato depth
                .float(0.125) // vibrato speed
                .float(9.0) // vibrato delay, discarded
                .float(0.0625) // attack
                .float(0.25) // sustain
                .float(0.5) // decay
                .float(0.75) // punch
                .byte(1) // filter flag, discarded
                .float(0.1) // lp resonance
                .float(0.875) // lp cutoff
                .float(-0.125) // lp sweep
                .float(0.0625) // hp cutoff
                .float(0.03125) // hp sweep
                .float(0.2) // phaser offset
                .float(-0.2) // phaser sweep
        }
    }

    #[test]
    fn test_layout_version_gating() {
        assert_eq!(entries_for(100).count(), 21);
        assert_eq!(entries_for(101).count(), 24);
        assert_eq!(entries_for(102).count(), 25);
        let v102: Vec<_> = entries_for(102).map(|e| e.slot).collect();
        assert_eq!(v102[1], Slot::Value(Field::MasterVolume));
    }

    #[test]
    fn test_version_100_defaults() {
        let data = Stream::new(100)
            .int(1)
            .float(0.5) // start frequency
            .float(0.125) // min frequency
            .float(0.25) // slide
            .body()
            // Bytes beyond the v100 layout must not be picked up.
            .float(0.9)
            .float(0.9)
            .0;

        let params = ParameterSet::from_binary(&data).unwrap();
        assert_eq!(params.wave_shape, WaveShape::Sawtooth);
        assert_eq!(params.master_volume, 0.5);
        assert_eq!(params.delta_slide, 0.0);
        assert_eq!(params.change_speed, 0.0);
        assert_eq!(params.change_amount, 0.0);
        assert_eq!(params.start_frequency, 0.5);
        assert_eq!(params.slide, 0.25);
        assert_eq!(params.phaser_sweep, f64::from(-0.2f32));
        assert_eq!(params.repeat_speed, 0.0);
    }

    #[test]
    fn test_version_101_reads_delta_slide_and_change() {
        let data = Stream::new(101)
            .int(2)
            .float(0.5)
            .float(0.0)
            .float(0.25)
            .float(-0.5) // delta slide
            .body()
            .float(0.75) // change speed
            .float(0.25) // change amount
            .0;

        let params = ParameterSet::from_binary(&data).unwrap();
        assert_eq!(params.wave_shape, WaveShape::Sine);
        assert_eq!(params.master_volume, 0.5);
        assert_eq!(params.delta_slide, -0.5);
        assert_eq!(params.change_speed, 0.75);
        assert_eq!(params.change_amount, 0.25);
    }

    #[test]
    fn test_version_102_reads_everything() {
        let data = Stream::new(102)
            .int(3)
            .float(0.25) // master volume
            .float(0.5)
            .float(0.125)
            .float(0.25)
            .float(-0.5)
            .body()
            .float(0.75)
            .float(0.25)
            .0;

        let params = ParameterSet::from_binary(&data).unwrap();
        assert_eq!(params.wave_shape, WaveShape::Noise);
        assert_eq!(params.master_volume, 0.25);
        assert_eq!(params.min_frequency, 0.125);
        assert_eq!(params.attack_time, 0.0625);
        assert_eq!(params.sustain_time, 0.25);
        assert_eq!(params.decay_time, 0.5);
        assert_eq!(params.sustain_punch, 0.75);
        assert_eq!(params.low_pass_cutoff, 0.875);
        assert_eq!(params.low_pass_cutoff_sweep, -0.125);
        assert_eq!(params.high_pass_cutoff, 0.0625);
        assert_eq!(params.high_pass_cutoff_sweep, 0.03125);
        assert_eq!(params.vibrato_depth, 0.25);
        assert_eq!(params.vibrato_speed, 0.125);
        assert_eq!(params.change_amount, 0.25);
    }

    #[test]
    fn test_unsupported_versions() {
        for version in [0, 99, 103, 200, -1] {
            let data = Stream::new(version).int(0).0;
            let err = ParameterSet::from_binary(&data).unwrap_err();
            assert!(
                matches!(err, FormatError::UnsupportedVersion { version: v } if v == version),
                "version {version}"
            );
        }
    }

    #[test]
    fn test_truncated_stream() {
        let data = Stream::new(102).int(0).float(0.5).0;
        let err = ParameterSet::from_binary(&data).unwrap_err();
        assert!(matches!(err, FormatError::UnexpectedEof { field: "start_frequency" }));

        let err = ParameterSet::from_binary(&[0x66, 0x00]).unwrap_err();
        assert!(matches!(err, FormatError::UnexpectedEof { field: "version" }));
    }

    #[test]
    fn test_nan_rejected() {
        let data = Stream::new(102).int(0).float(f32::NAN).0;
        let err = ParameterSet::from_binary(&data).unwrap_err();
        assert!(matches!(err, FormatError::NonFinite { name: "master_volume" }));
    }

    #[test]
    fn test_write_then_read_latest() {
        let params = ParameterSet::from_text(
            "3,,0.3822,0.4799,0.4721,0.3917,,-0.3271,,,,-0.4969,0.8651,,,,0.5645,-0.1034,1,,,,,0.5",
        )
        .unwrap();

        let bytes = params.to_binary(LATEST_VERSION).unwrap();
        assert_eq!(&bytes[0..4], &102i32.to_le_bytes());

        let parsed = ParameterSet::from_binary(&bytes).unwrap();
        assert_eq!(parsed.wave_shape, params.wave_shape);
        for field in Field::ALL {
            assert_eq!(
                parsed.get(field),
                f64::from(params.get(field) as f32),
                "{}",
                field.name()
            );
        }
    }

    #[test]
    fn test_write_older_version_drops_newer_fields() {
        let params = ParameterSet::new()
            .with(Field::MasterVolume, 0.25)
            .with(Field::DeltaSlide, 0.5)
            .with(Field::ChangeAmount, 0.5);

        let v100 = params.to_binary(100).unwrap();
        // version + shape + 19 floats + filter byte
        assert_eq!(v100.len(), 4 + 4 + 19 * 4 + 1);

        let parsed = ParameterSet::from_binary(&v100).unwrap();
        assert_eq!(parsed.master_volume, DEFAULT_MASTER_VOLUME);
        assert_eq!(parsed.delta_slide, 0.0);
        assert_eq!(parsed.change_amount, 0.0);

        assert!(matches!(
            params.to_binary(42),
            Err(FormatError::UnsupportedVersion { version: 42 })
        ));
    }
}
