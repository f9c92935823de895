//! One-pole low-pass and high-pass filters with cutoff sweep.
//!
//! The low-pass is a resonant one-pole integrator whose cutoff is swept
//! multiplicatively every sub-sample. Its output drives a leaky high-pass
//! whose cutoff is swept once per output sample.

use sfxkit_spec::ParameterSet;

/// Upper bound on either cutoff coefficient.
pub const MAX_CUTOFF: f64 = 0.1;

/// Lower bound on the high-pass cutoff while sweeping.
pub const MIN_HIGH_PASS_CUTOFF: f64 = 0.00001;

/// Largest damping amount before it is inverted into a feedback factor.
const MAX_DAMPING: f64 = 0.8;

/// Resonant one-pole low-pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LowPass {
    active: bool,
    position: f64,
    delta: f64,
    cutoff: f64,
    cutoff_sweep: f64,
    damping: f64,
}

impl LowPass {
    /// Derives the filter from cutoff, sweep and resonance parameters.
    pub fn new(cutoff: f64, sweep: f64, resonance: f64) -> Self {
        let coefficient = cutoff * cutoff * cutoff * 0.1;
        let damping =
            (5.0 / (1.0 + resonance * resonance * 20.0) * (0.01 + coefficient)).min(MAX_DAMPING);
        Self {
            // Cutoff 1.0 means wide open.
            active: (cutoff - 1.0).abs() > 0.01,
            position: 0.0,
            delta: 0.0,
            cutoff: coefficient,
            cutoff_sweep: 1.0 + sweep * 0.0001,
            damping: 1.0 - damping,
        }
    }

    /// Whether the filter is doing anything (cutoff not wide open).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current cutoff coefficient.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Feedback factor applied to the integrator velocity.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Filters one sub-sample and returns the new filter position.
    pub fn process(&mut self, input: f64) -> f64 {
        self.cutoff = (self.cutoff * self.cutoff_sweep).clamp(0.0, MAX_CUTOFF);

        if self.active {
            self.delta += (input - self.position) * self.cutoff;
            self.delta *= self.damping;
        } else {
            self.position = input;
            self.delta = 0.0;
        }

        self.position += self.delta;
        self.position
    }
}

/// Leaky one-pole high-pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HighPass {
    position: f64,
    cutoff: f64,
    cutoff_sweep: f64,
}

impl HighPass {
    /// Derives the filter from cutoff and sweep parameters.
    pub fn new(cutoff: f64, sweep: f64) -> Self {
        Self {
            position: 0.0,
            cutoff: cutoff * cutoff * 0.1,
            cutoff_sweep: 1.0 + sweep * 0.0003,
        }
    }

    /// Current cutoff coefficient.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Applies the per-sample cutoff sweep.
    pub fn sweep(&mut self) {
        if self.cutoff_sweep != 0.0 {
            self.cutoff = (self.cutoff * self.cutoff_sweep).clamp(MIN_HIGH_PASS_CUTOFF, MAX_CUTOFF);
        }
    }

    /// Feeds the change in low-pass position through the high-pass.
    pub fn process(&mut self, low_pass_change: f64) -> f64 {
        self.position += low_pass_change;
        self.position *= 1.0 - self.cutoff;
        self.position
    }
}

/// Low-pass into high-pass filter chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    enabled: bool,
    low_pass: LowPass,
    high_pass: HighPass,
}

impl FilterChain {
    /// Builds the chain from a parameter set.
    ///
    /// The chain is enabled if the low-pass is active or a high-pass cutoff
    /// is set at all.
    pub fn from_params(params: &ParameterSet) -> Self {
        let low_pass = LowPass::new(
            params.low_pass_cutoff,
            params.low_pass_cutoff_sweep,
            params.low_pass_resonance,
        );

        Self {
            enabled: low_pass.active || params.high_pass_cutoff != 0.0,
            low_pass,
            high_pass: HighPass::new(params.high_pass_cutoff, params.high_pass_cutoff_sweep),
        }
    }

    /// Whether the chain touches the signal.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The low-pass stage.
    pub fn low_pass(&self) -> &LowPass {
        &self.low_pass
    }

    /// The high-pass stage.
    pub fn high_pass(&self) -> &HighPass {
        &self.high_pass
    }

    /// Per-output-sample update (high-pass cutoff sweep).
    pub fn sweep(&mut self) {
        if self.enabled {
            self.high_pass.sweep();
        }
    }

    /// Filters one sub-sample; a disabled chain passes it through.
    pub fn process(&mut self, input: f64) -> f64 {
        if !self.enabled {
            return input;
        }
        let previous = self.low_pass.position;
        let current = self.low_pass.process(input);
        self.high_pass.process(current - previous)
    }
}
