//! Encoded WAV output.

use std::fs;
use std::path::Path;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16_le, write_wav_to_vec};
use crate::error::AudioResult;

/// A sound encoded as a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hex digest of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples.
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16_le(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the WAV bytes to `path`, replacing any existing file.
    ///
    /// # Arguments
    /// * `path` - Destination file
    ///
    /// # Returns
    /// [`AudioError::Io`](crate::AudioError::Io) if the file cannot be written
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> AudioResult<()> {
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}
