//! Run-to-completion synthesis engine.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use sfxkit_spec::ParameterSet;
use tracing::{debug, warn};

use crate::config::{SynthOptions, SAMPLE_RATE};
use crate::cursor::PcmCursor;
use crate::error::AudioResult;
use crate::rng::{create_stream_rng, random_seed, MUTATION_STREAM, NOISE_STREAM};
use crate::state::EngineState;
use crate::wav::WavResult;

/// Why synthesis stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The envelope ran past its decay stage.
    EnvelopeEnded,
    /// Pitch slid down to the minimum frequency.
    FrequencyFloor,
    /// The envelope's full length worth of samples was produced.
    LengthReached,
    /// The configured sample cap cut the sound short.
    SampleCap,
}

impl StopReason {
    /// Short lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::EnvelopeEnded => "envelope_ended",
            StopReason::FrequencyFloor => "frequency_floor",
            StopReason::LengthReached => "length_reached",
            StopReason::SampleCap => "sample_cap",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully rendered sound.
///
/// Construction derives the engine state and runs the synthesis loop to
/// completion; afterwards the engine only hands out its immutable PCM
/// buffer. Sounds are mono, 16-bit signed, at [`SAMPLE_RATE`].
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    params: ParameterSet,
    seed: u32,
    samples: Vec<i16>,
    pcm: Arc<[u8]>,
    stop_reason: StopReason,
}

impl SynthesisEngine {
    /// Renders `params` with an entropy-drawn seed.
    ///
    /// # Arguments
    /// * `params` - Parameter set to render; copied, never modified
    ///
    /// # Returns
    /// The finished sound, capped at [`MAX_SAMPLES`](crate::config::MAX_SAMPLES)
    pub fn new(params: &ParameterSet) -> Self {
        Self::render(params, random_seed(), SynthOptions::default().max_samples)
    }

    /// Renders `params` with a fixed seed. Equal seeds give identical PCM.
    ///
    /// # Arguments
    /// * `params` - Parameter set to render
    /// * `seed` - Base seed of the noise stream
    ///
    /// # Returns
    /// The finished sound
    pub fn with_seed(params: &ParameterSet, seed: u32) -> Self {
        Self::render(params, seed, SynthOptions::default().max_samples)
    }

    /// Renders `params` with explicit options.
    ///
    /// # Arguments
    /// * `params` - Parameter set to render
    /// * `options` - Seed and sample cap
    ///
    /// # Returns
    /// The finished sound, or [`AudioError::InvalidOption`](crate::AudioError::InvalidOption)
    /// if the options fail validation
    pub fn with_options(params: &ParameterSet, options: &SynthOptions) -> AudioResult<Self> {
        options.validate()?;
        let seed = options.seed.unwrap_or_else(random_seed);
        Ok(Self::render(params, seed, options.max_samples))
    }

    /// Mutates a copy of `params` and renders the result.
    ///
    /// Mutation draws come from the options' seed, so a fixed seed gives a
    /// reproducible variant.
    ///
    /// # Arguments
    /// * `params` - Parameter set to start from
    /// * `amount` - Largest offset applied to any one parameter
    /// * `options` - Seed and sample cap
    ///
    /// # Returns
    /// A new engine rendering the mutated copy
    pub fn from_mutation(
        params: &ParameterSet,
        amount: f64,
        options: &SynthOptions,
    ) -> AudioResult<Self> {
        options.validate()?;
        let seed = options.seed.unwrap_or_else(random_seed);
        let mut rng = create_stream_rng(seed, MUTATION_STREAM);
        let variant = params.mutated(amount, &mut rng);
        Ok(Self::render(&variant, seed, options.max_samples))
    }

    /// Renders a mutated variant of this sound. `self` is untouched.
    ///
    /// # Arguments
    /// * `amount` - Largest offset applied to any one parameter
    /// * `rng` - Source of the mutation draws and of the new engine's seed
    ///
    /// # Returns
    /// A new engine; the caller swaps it in for playback
    ///
    /// # Example
    ///
    /// ```
    /// use sfxkit_backend_audio::rng::create_rng;
    /// use sfxkit_backend_audio::SynthesisEngine;
    /// use sfxkit_spec::Preset;
    ///
    /// let engine = SynthesisEngine::with_seed(&Preset::Laser.params(), 1);
    /// let variant = engine.mutated(0.05, &mut create_rng(7));
    /// assert_eq!(engine.params(), &Preset::Laser.params());
    /// assert_ne!(variant.params(), engine.params());
    /// ```
    pub fn mutated<R: Rng + ?Sized>(&self, amount: f64, rng: &mut R) -> Self {
        let variant = self.params.mutated(amount, rng);
        Self::render(&variant, rng.gen(), SynthOptions::default().max_samples)
    }

    fn render(params: &ParameterSet, seed: u32, max_samples: usize) -> Self {
        let mut rng = create_stream_rng(seed, NOISE_STREAM);
        let mut state = EngineState::derive_all(params, &mut rng);

        // Saturating cast; a NaN length renders nothing.
        let full_length = state.envelope().full_length() as usize;
        let (limit, mut stop_reason) = if full_length > max_samples {
            warn!(
                full_length,
                max_samples, "sound exceeds sample cap, truncating"
            );
            (max_samples, StopReason::SampleCap)
        } else {
            (full_length, StopReason::LengthReached)
        };

        let mut samples = Vec::with_capacity(limit);
        while samples.len() < limit {
            let step = state.advance(&mut rng);
            samples.push(step.sample);
            if step.finished {
                stop_reason = if state.envelope().is_finished() {
                    StopReason::EnvelopeEnded
                } else {
                    StopReason::FrequencyFloor
                };
                break;
            }
        }

        debug!(
            seed,
            samples = samples.len(),
            reason = %stop_reason,
            "synthesis finished"
        );

        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        Self {
            params: *params,
            seed,
            samples,
            pcm: Arc::from(pcm),
            stop_reason,
        }
    }

    /// Parameters the sound was rendered from (before duration normalization).
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Base seed of the random streams.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rendered samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of rendered samples.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Why the synthesis loop stopped.
    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    /// Length of the sound in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }

    /// Packed PCM: 16-bit signed samples in host byte order.
    pub fn pcm(&self) -> &[u8] {
        &self.pcm
    }

    /// A playback cursor over the PCM buffer, positioned at the start.
    ///
    /// Cursors share the buffer; creating one does not copy the samples.
    pub fn cursor(&self) -> PcmCursor {
        PcmCursor::new(Arc::clone(&self.pcm))
    }

    /// Encodes the sound as a mono 16-bit WAV file.
    pub fn to_wav(&self) -> WavResult {
        WavResult::from_samples(&self.samples, SAMPLE_RATE)
    }
}
