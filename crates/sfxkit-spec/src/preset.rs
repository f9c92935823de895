//! Built-in sound presets.

use crate::error::{FormatError, FormatResult};
use crate::params::ParameterSet;

/// A named, ready-to-play parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Short rising square blip.
    Coin,
    /// Falling square zap.
    Laser,
    /// Low noise burst with phaser.
    Explosion,
    /// Vibrato-heavy sine wail.
    Siren,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 4] = [Preset::Coin, Preset::Laser, Preset::Explosion, Preset::Siren];

    /// Lowercase preset name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Coin => "coin",
            Preset::Laser => "laser",
            Preset::Explosion => "explosion",
            Preset::Siren => "siren",
        }
    }

    /// Text form of the preset.
    pub fn text(self) -> &'static str {
        match self {
            Preset::Coin => "0,,0.0736,0.4591,0.3858,0.5416,,,,,,0.5273,0.5732,,,,,,1,,,,,0.5",
            Preset::Laser => "0,,0.0359,,0.4491,0.2968,,0.2727,,,,,,0.0191,,0.5249,,,1,,,,,0.5",
            Preset::Explosion => {
                "3,,0.3822,0.4799,0.4721,0.3917,,-0.3271,,,,-0.4969,0.8651,,,,0.5645,-0.1034,1,,,,,0.5"
            }
            Preset::Siren => {
                "2,0.0028,0.9527,0.1807,0.4139,0.5534,,0.0022,-0.0816,,0.9387,-0.9916,,0.8259,0.0015,0.068,-0.2339,-0.132,0.8973,-0.0149,0.0783,0.0453,,0.5"
            }
        }
    }

    /// Looks a preset up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> FormatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| FormatError::UnknownPreset {
                name: name.to_string(),
            })
    }

    /// Parses the preset into a parameter set.
    pub fn params(self) -> ParameterSet {
        // Preset strings are compile-time constants covered by tests.
        ParameterSet::from_text(self.text()).unwrap_or_default()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
