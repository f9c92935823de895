//! Waveform evaluation.
//!
//! The oscillator works on an integer phase counter that runs from 0 up to
//! the current (integer) period. Each shape maps `phase / period` to a value
//! in roughly `[-1, 1]`.

use rand::Rng;
use sfxkit_spec::WaveShape;

/// Number of entries in the noise buffer.
pub const NOISE_BUFFER_LEN: usize = 32;

/// Parabolic sine approximation coefficients.
const SINE_LINEAR: f64 = 1.273_239_54;
const SINE_QUADRATIC: f64 = 0.405_284_735;
const SINE_CORRECTION: f64 = 0.225;
const TWO_PI: f64 = 6.283_185_31;

/// 32 random values in `[-1, 1)` replayed across one oscillator period.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBuffer {
    values: [f64; NOISE_BUFFER_LEN],
}

impl Default for NoiseBuffer {
    fn default() -> Self {
        Self {
            values: [0.0; NOISE_BUFFER_LEN],
        }
    }
}

impl NoiseBuffer {
    /// Creates a buffer already filled from `rng`.
    ///
    /// # Arguments
    /// * `rng` - Random source for the initial values
    ///
    /// # Returns
    /// A buffer of [`NOISE_BUFFER_LEN`] values in `[-1, 1)`
    pub fn filled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut buffer = Self::default();
        buffer.refill(rng);
        buffer
    }

    /// Replaces every entry with a fresh value.
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in &mut self.values {
            *value = rng.gen::<f64>() * 2.0 - 1.0;
        }
    }

    /// Value for a position within the period.
    ///
    /// The period is split into [`NOISE_BUFFER_LEN`] equal slots using integer
    /// division, so each value is held for `period / 32` sub-samples.
    ///
    /// # Arguments
    /// * `phase` - Oscillator phase counter
    /// * `period` - Oscillator period in sub-samples, positive
    ///
    /// # Returns
    /// The buffered value for the slot containing `phase`
    pub fn at(&self, phase: i64, period: i64) -> f64 {
        let index = (phase * NOISE_BUFFER_LEN as i64 / period).rem_euclid(NOISE_BUFFER_LEN as i64);
        self.values[index as usize]
    }

    /// Raw buffer contents.
    pub fn values(&self) -> &[f64; NOISE_BUFFER_LEN] {
        &self.values
    }
}

/// Fast parabolic sine of `position` in `[0, 1)` of a cycle.
///
/// A parabola fitted to one sine cycle, sharpened by a second parabolic
/// correction. The peak error against `sin` stays around 1e-3.
///
/// # Arguments
/// * `position` - Fraction of the cycle, `0.5` is the half-way point
///
/// # Returns
/// An approximation of `sin(2π · position)`
pub fn fast_sine(position: f64) -> f64 {
    let pos = if position > 0.5 {
        (position - 1.0) * TWO_PI
    } else {
        position * TWO_PI
    };

    let s = if pos < 0.0 {
        SINE_LINEAR * pos + SINE_QUADRATIC * pos * pos
    } else {
        SINE_LINEAR * pos - SINE_QUADRATIC * pos * pos
    };

    if s < 0.0 {
        SINE_CORRECTION * (s * -s - s) + s
    } else {
        SINE_CORRECTION * (s * s - s) + s
    }
}

/// Evaluates one oscillator sub-sample.
///
/// `period` must be positive; the engine never lets it drop below 8.
///
/// # Arguments
/// * `shape` - Waveform to evaluate
/// * `phase` - Phase counter, normally in `[0, period)`
/// * `period` - Oscillator period in sub-samples
/// * `duty` - Square duty threshold, ignored by other shapes
/// * `noise` - Noise buffer, read only for [`WaveShape::Noise`]
///
/// # Returns
/// The raw oscillator value: `±0.5` for square, roughly `[-1, 1]` otherwise
pub fn evaluate(shape: WaveShape, phase: i64, period: i64, duty: f64, noise: &NoiseBuffer) -> f64 {
    let position = phase as f64 / period as f64;
    match shape {
        WaveShape::Square => {
            if position < duty {
                0.5
            } else {
                -0.5
            }
        }
        WaveShape::Sawtooth => 1.0 - position * 2.0,
        WaveShape::Sine => fast_sine(position),
        WaveShape::Noise => noise.at(phase, period),
    }
}
