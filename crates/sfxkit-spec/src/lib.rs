//! sfxkit Parameter Model
//!
//! This crate provides the [`ParameterSet`] type that describes one procedural
//! sound effect, together with its serialized forms.
//!
//! # Overview
//!
//! A parameter set is an oscillator [`WaveShape`] plus 23 real-valued synthesis
//! parameters (envelope, pitch slide, vibrato, arpeggio change, duty sweep,
//! repeat, phaser, low-/high-pass filters, master volume). Three encodings are
//! supported:
//!
//! - **Text** - 24 comma-separated fields, empty fields meaning zero
//! - **Binary** - the versioned little-endian `.sfxr` layout (versions 100-102)
//! - **JSON** - serde representation for presets on disk
//!
//! # Example
//!
//! ```
//! use sfxkit_spec::{ParameterFormat, ParameterSet, WaveShape};
//!
//! let text = "0,,0.0736,0.4591,0.3858,0.5416,,,,,,0.5273,0.5732,,,,,,1,,,,,0.5";
//! let params = ParameterSet::parse(text.as_bytes(), ParameterFormat::Text).unwrap();
//!
//! assert_eq!(params.wave_shape, WaveShape::Square);
//! assert_eq!(params.low_pass_cutoff, 1.0);
//! assert_eq!(params.to_text(), text);
//! ```
//!
//! # Modules
//!
//! - [`params`]: the parameter set, shapes and field identifiers
//! - [`text`]: comma-separated text format
//! - [`binary`]: versioned binary format
//! - [`mutate`]: random variation
//! - [`preset`]: built-in presets
//! - [`error`]: format errors

pub mod binary;
pub mod error;
pub mod mutate;
pub mod params;
pub mod preset;
pub mod text;

// Re-export commonly used types at the crate root
pub use binary::{BINARY_LAYOUT, DEFAULT_MASTER_VOLUME, LATEST_VERSION, SUPPORTED_VERSIONS};
pub use error::{FormatError, FormatResult};
pub use mutate::MUTABLE_FIELDS;
pub use params::{Field, ParameterFormat, ParameterSet, WaveShape};
pub use preset::Preset;
pub use text::{TEXT_FIELDS, TEXT_FIELD_COUNT};
