//! CLI command implementations

pub mod inspect;
pub mod mutate;
pub mod presets;
pub mod render;

use anyhow::{bail, Result};
use sfxkit_backend_audio::{SynthOptions, SAMPLE_RATE};

/// Builds synthesis options from the shared `--seed` / `--max-seconds` flags.
pub fn synth_options(seed: Option<u32>, max_seconds: Option<f64>) -> Result<SynthOptions> {
    let mut options = SynthOptions::default();
    if let Some(seed) = seed {
        options = options.with_seed(seed);
    }
    if let Some(seconds) = max_seconds {
        if !seconds.is_finite() || seconds <= 0.0 {
            bail!("--max-seconds must be a positive number, got {}", seconds);
        }
        options = options.with_max_samples((seconds * SAMPLE_RATE as f64).round() as usize);
    }
    options.validate()?;
    Ok(options)
}
