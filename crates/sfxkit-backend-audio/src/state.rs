//! Per-sample synthesis state.
//!
//! [`EngineState`] holds everything the synthesis loop mutates while it
//! renders one sound: oscillator phase and period, modulation countdowns, the
//! envelope, the filter chain, the phaser and the noise buffer. It is built by
//! [`EngineState::derive_all`] and stepped one output sample at a time with
//! [`EngineState::advance`].

use rand::Rng;
use sfxkit_spec::{ParameterSet, WaveShape};
use tracing::{debug, trace};

use crate::envelope::{normalize_durations, Envelope};
use crate::filter::FilterChain;
use crate::oscillator::{self, NoiseBuffer};
use crate::phaser::Phaser;

/// Sub-samples computed per output sample.
pub const OVERSAMPLING: usize = 8;

/// Shortest oscillator period in sub-samples.
pub const MIN_PERIOD: i64 = 8;

/// Peak amplitude of quantized output.
pub const OUTPUT_SCALE: f64 = 32_000.0;

/// One output sample produced by [`EngineState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Quantized sample in `[-32000, 32000]`.
    pub sample: i16,
    /// The sound ended on this sample; it is still part of the output.
    pub finished: bool,
}

/// Mutable state of one synthesis run.
#[derive(Debug, Clone)]
pub struct EngineState {
    params: ParameterSet,
    master_volume: f64,

    phase: i64,
    period: f64,
    max_period: f64,
    slide: f64,
    delta_slide: f64,

    square_duty: f64,
    duty_sweep: f64,

    vibrato_phase: f64,
    vibrato_speed: f64,
    vibrato_amplitude: f64,

    change_amount: f64,
    change_time: u32,
    change_limit: u32,

    repeat_time: u32,
    repeat_limit: u32,

    envelope: Envelope,
    filters: FilterChain,
    phaser: Phaser,
    noise: NoiseBuffer,
}

impl EngineState {
    /// Total reset: derives every coefficient from `params`.
    ///
    /// Durations are normalized first (see
    /// [`normalize_durations`](crate::envelope::normalize_durations)); the
    /// normalized copy is what later partial re-derivations read from.
    /// Every finite parameter value is accepted. Countdown lengths saturate
    /// instead of overflowing.
    ///
    /// # Arguments
    /// * `params` - Parameter set to derive from
    /// * `rng` - Random source for the initial noise buffer
    ///
    /// # Returns
    /// A state positioned before the first output sample
    pub fn derive_all<R: Rng + ?Sized>(params: &ParameterSet, rng: &mut R) -> Self {
        let mut params = *params;
        normalize_durations(&mut params);

        let repeat_limit = if params.repeat_speed == 0.0 {
            0
        } else {
            countdown((1.0 - params.repeat_speed).powi(2) * 20_000.0).saturating_add(32)
        };

        let mut state = Self {
            params,
            master_volume: params.master_volume * params.master_volume,
            phase: 0,
            period: 0.0,
            max_period: 0.0,
            slide: 0.0,
            delta_slide: 0.0,
            square_duty: 0.0,
            duty_sweep: 0.0,
            vibrato_phase: 0.0,
            vibrato_speed: params.vibrato_speed * params.vibrato_speed * 0.01,
            vibrato_amplitude: params.vibrato_depth * 0.5,
            change_amount: 1.0,
            change_time: 0,
            change_limit: 0,
            repeat_time: 0,
            repeat_limit,
            envelope: Envelope::from_params(&params),
            filters: FilterChain::from_params(&params),
            phaser: Phaser::from_params(&params),
            noise: NoiseBuffer::filled(rng),
        };
        state.rederive_modulation(&params);

        debug!(
            shape = %params.wave_shape,
            envelope = ?state.envelope.lengths(),
            filters = state.filters.is_enabled(),
            phaser = state.phaser.is_enabled(),
            repeat_limit,
            "derived engine state"
        );
        state
    }

    /// Partial reset used by the repeat mechanism.
    ///
    /// Restores the pitch, slide, duty and change coefficients. Envelope,
    /// filters, phaser, vibrato and oscillator phase are left alone.
    ///
    /// # Arguments
    /// * `params` - Normalized parameters, normally [`EngineState::params`]
    pub fn rederive_modulation(&mut self, params: &ParameterSet) {
        self.period = 100.0 / (params.start_frequency * params.start_frequency + 0.001);
        self.max_period = 100.0 / (params.min_frequency * params.min_frequency + 0.001);
        self.slide = 1.0 - params.slide.powi(3) * 0.01;
        self.delta_slide = -params.delta_slide.powi(3) * 0.000001;

        if params.wave_shape == WaveShape::Square {
            self.square_duty = 0.5 - params.square_duty * 0.5;
            self.duty_sweep = -params.duty_sweep * 0.00005;
        }

        self.change_amount = if params.change_amount > 0.0 {
            1.0 - params.change_amount * params.change_amount * 0.9
        } else {
            1.0 + params.change_amount * params.change_amount * 10.0
        };
        self.change_time = 0;
        self.change_limit = if (params.change_speed - 1.0).abs() < 0.01 {
            0
        } else {
            countdown((1.0 - params.change_speed).powi(2) * 20_000.0 + 32.0)
        };
    }

    /// Computes the next output sample.
    ///
    /// Runs one pass of the per-sample order: repeat and change countdowns,
    /// slide and vibrato, duty sweep, envelope, phaser and filter sweeps, then
    /// [`OVERSAMPLING`] oscillator steps averaged, scaled, clipped to
    /// `[-1, 1]` and quantized.
    ///
    /// # Arguments
    /// * `rng` - Random source for noise refills
    ///
    /// # Returns
    /// The quantized sample and whether the sound ended on it
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        let mut finished = false;

        if self.repeat_limit != 0 {
            self.repeat_time += 1;
            if self.repeat_time >= self.repeat_limit {
                self.repeat_time = 0;
                let params = self.params;
                self.rederive_modulation(&params);
                trace!(repeat_limit = self.repeat_limit, "repeat re-derivation");
            }
        }

        if self.change_limit != 0 {
            self.change_time += 1;
            if self.change_time >= self.change_limit {
                self.change_limit = 0;
                self.period *= self.change_amount;
            }
        }

        self.slide += self.delta_slide;
        self.period *= self.slide;
        if self.period > self.max_period {
            self.period = self.max_period;
            if self.params.min_frequency > 0.0 {
                finished = true;
            }
        }

        let mut period = self.period;
        if self.vibrato_amplitude > 0.0 {
            self.vibrato_phase += self.vibrato_speed;
            period = self.period * (1.0 + self.vibrato_phase.sin() * self.vibrato_amplitude);
        }
        // Saturating cast; NaN lands on 0 and is lifted to the minimum.
        let period = (period as i64).max(MIN_PERIOD);

        if self.params.wave_shape == WaveShape::Square {
            self.square_duty = (self.square_duty + self.duty_sweep).clamp(0.0, 0.5);
        }

        let volume = self.envelope.advance();
        if self.envelope.is_finished() {
            finished = true;
        }

        self.phaser.sweep();
        self.filters.sweep();

        let mut sum = 0.0;
        for _ in 0..OVERSAMPLING {
            self.phase += 1;
            if self.phase >= period {
                self.phase -= period;
                if self.params.wave_shape == WaveShape::Noise {
                    self.noise.refill(rng);
                }
            }

            let mut sample = oscillator::evaluate(
                self.params.wave_shape,
                self.phase,
                period,
                self.square_duty,
                &self.noise,
            );
            sample = self.filters.process(sample);
            sample = self.phaser.process(sample);
            sum += sample;
        }

        let out = (self.master_volume * volume * sum * 0.125).clamp(-1.0, 1.0);
        Step {
            sample: (out * OUTPUT_SCALE) as i16,
            finished,
        }
    }

    /// Normalized parameters the state was derived from.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// The volume envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// The filter chain.
    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// The phaser.
    pub fn phaser(&self) -> &Phaser {
        &self.phaser
    }

    /// The noise buffer.
    pub fn noise(&self) -> &NoiseBuffer {
        &self.noise
    }

    /// Squared master volume.
    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    /// Current oscillator period in sub-samples, before vibrato.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Period ceiling (lowest pitch).
    pub fn max_period(&self) -> f64 {
        self.max_period
    }

    /// Current slide multiplier.
    pub fn slide(&self) -> f64 {
        self.slide
    }

    /// Current square duty.
    pub fn square_duty(&self) -> f64 {
        self.square_duty
    }

    /// Pitch multiplier applied once by the change countdown.
    pub fn change_amount(&self) -> f64 {
        self.change_amount
    }

    /// Change countdown length; 0 when disabled or already fired.
    pub fn change_limit(&self) -> u32 {
        self.change_limit
    }

    /// Repeat countdown length; 0 when disabled.
    pub fn repeat_limit(&self) -> u32 {
        self.repeat_limit
    }
}

// Truncates a countdown length; negative and NaN inputs land on 0.
fn countdown(value: f64) -> u32 {
    value as u32
}
