//! Deterministic WAV export.
//!
//! Sounds are written as canonical 44-byte-header RIFF files holding mono
//! 16-bit little-endian PCM. No timestamps or optional chunks are emitted, so
//! the same samples always produce the same file, and the BLAKE3 hash of the
//! PCM payload identifies a render.

mod format;
mod result;
mod writer;


pub use format::WavFormat;
pub use result::WavResult;
pub use writer::{pcm_data, pcm_hash, samples_to_pcm16_le, write_wav, write_wav_to_vec};
