//! Synthesis options.

use crate::error::{AudioError, AudioResult};

/// Output sample rate in Hz. The synthesis loop is tuned for this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Longest sound the engine will render, in seconds.
pub const MAX_DURATION_SECONDS: usize = 30;

/// Default cap on rendered samples.
pub const MAX_SAMPLES: usize = MAX_DURATION_SECONDS * SAMPLE_RATE as usize;

/// Options controlling a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthOptions {
    /// Base seed for all random streams. `None` draws one from entropy.
    pub seed: Option<u32>,
    /// Hard cap on output samples.
    pub max_samples: usize,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_samples: MAX_SAMPLES,
        }
    }
}

impl SynthOptions {
    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the sample cap.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Checks the options are usable.
    pub fn validate(&self) -> AudioResult<()> {
        if self.max_samples == 0 {
            return Err(AudioError::invalid_option(
                "max_samples",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
