//! sfxkit Synthesis Backend
//!
//! This crate renders a [`ParameterSet`](sfxkit_spec::ParameterSet) into a
//! short mono 16-bit sound using the classic sfxr synthesis loop.
//!
//! # Overview
//!
//! Rendering runs to completion when the engine is constructed:
//!
//! 1. every coefficient is derived from the parameters ([`EngineState::derive_all`])
//! 2. the loop computes one output sample at a time ([`EngineState::advance`]),
//!    each the average of 8 oversampled oscillator steps passed through the
//!    filter chain and the phaser
//! 3. samples are packed into an immutable PCM buffer read through [`PcmCursor`]
//!
//! # Determinism
//!
//! The only randomness is the noise buffer. It is drawn from a PCG32 stream
//! keyed off the engine seed, so a fixed seed produces byte-identical PCM.
//!
//! # Example
//!
//! ```
//! use sfxkit_backend_audio::SynthesisEngine;
//! use sfxkit_spec::Preset;
//!
//! let engine = SynthesisEngine::with_seed(&Preset::Coin.params(), 42);
//! assert_eq!(engine.pcm().len(), engine.num_samples() * 2);
//!
//! let wav = engine.to_wav();
//! assert_eq!(&wav.wav_data[0..4], b"RIFF");
//! ```
//!
//! # Crate Structure
//!
//! - [`engine`] - Run-to-completion engine and mutate-and-recreate
//! - [`state`] - Per-sample synthesis state
//! - [`envelope`] - Attack/sustain/decay envelope
//! - [`oscillator`] - Waveforms and the noise buffer
//! - [`filter`] - Low-pass/high-pass chain
//! - [`phaser`] - Swept delay phaser
//! - [`cursor`] - Playback cursor over rendered PCM
//! - [`config`] - Synthesis options
//! - [`rng`] - Seeded random streams
//! - [`wav`] - Deterministic WAV export

pub mod config;
pub mod cursor;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod oscillator;
pub mod phaser;
pub mod rng;
pub mod state;
pub mod wav;

// Re-export main types at crate root
pub use config::{SynthOptions, MAX_SAMPLES, SAMPLE_RATE};
pub use cursor::PcmCursor;
pub use engine::{StopReason, SynthesisEngine};
pub use envelope::{Envelope, EnvelopeStage};
pub use error::{AudioError, AudioResult};
pub use state::{EngineState, Step};
pub use wav::WavResult;
