//! Attack/sustain/decay volume envelope.
//!
//! The envelope walks three linear stages and then stays silent:
//!
//! - **Attack** ramps volume from 0 up to 1
//! - **Sustain** holds at 1, lifted by `punch` at the start of the stage
//! - **Decay** ramps from 1 back down to 0
//!
//! Stage lengths are measured in output samples and derived from the
//! normalized durations as `duration^2 * 100000` (decay gets 10 extra
//! samples so a sound never ends abruptly).

use sfxkit_spec::ParameterSet;

/// Shortest allowed sustain duration.
pub const MIN_SUSTAIN: f64 = 0.01;

/// Shortest allowed combined attack + sustain + decay duration.
pub const MIN_TOTAL_DURATION: f64 = 0.18;

/// Samples per unit of squared duration.
const LENGTH_SCALE: f64 = 100_000.0;

/// Envelope stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnvelopeStage {
    /// Volume rising from 0 to 1.
    Attack,
    /// Volume held at 1 plus punch.
    Sustain,
    /// Volume falling from 1 to 0.
    Decay,
    /// Envelope has run out; volume is 0.
    Finished,
}

impl EnvelopeStage {
    /// Zero-based stage index (3 for [`EnvelopeStage::Finished`]).
    pub fn index(self) -> usize {
        match self {
            EnvelopeStage::Attack => 0,
            EnvelopeStage::Sustain => 1,
            EnvelopeStage::Decay => 2,
            EnvelopeStage::Finished => 3,
        }
    }

    fn next(self) -> Self {
        match self {
            EnvelopeStage::Attack => EnvelopeStage::Sustain,
            EnvelopeStage::Sustain => EnvelopeStage::Decay,
            EnvelopeStage::Decay | EnvelopeStage::Finished => EnvelopeStage::Finished,
        }
    }
}

/// Applies the duration floor rules to a parameter set.
///
/// Sustain is raised to [`MIN_SUSTAIN`], then if the three durations sum to
/// less than [`MIN_TOTAL_DURATION`] they are scaled up proportionally so the
/// sum is exactly that minimum.
pub fn normalize_durations(params: &mut ParameterSet) {
    if params.sustain_time < MIN_SUSTAIN {
        params.sustain_time = MIN_SUSTAIN;
    }

    let total = params.attack_time + params.sustain_time + params.decay_time;
    // A zero total can only come from negative durations cancelling out.
    if total < MIN_TOTAL_DURATION && total != 0.0 {
        let multiplier = MIN_TOTAL_DURATION / total;
        params.attack_time *= multiplier;
        params.sustain_time *= multiplier;
        params.decay_time *= multiplier;
    }
}

/// Three-stage volume envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    lengths: [f64; 3],
    inverse: [f64; 3],
    punch: f64,
    stage: EnvelopeStage,
    time: f64,
    volume: f64,
}

impl Envelope {
    /// Builds the envelope from already normalized durations.
    pub fn new(attack: f64, sustain: f64, decay: f64, punch: f64) -> Self {
        let lengths = [
            attack * attack * LENGTH_SCALE,
            sustain * sustain * LENGTH_SCALE,
            decay * decay * LENGTH_SCALE + 10.0,
        ];
        Self {
            lengths,
            inverse: lengths.map(|len| 1.0 / len),
            punch,
            stage: EnvelopeStage::Attack,
            time: 0.0,
            volume: 0.0,
        }
    }

    /// Builds the envelope from a normalized parameter set.
    pub fn from_params(params: &ParameterSet) -> Self {
        Self::new(
            params.attack_time,
            params.sustain_time,
            params.decay_time,
            params.sustain_punch,
        )
    }

    /// Stage lengths in samples.
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    /// Sum of the three stage lengths.
    pub fn full_length(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Current stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Samples elapsed in the current stage.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Volume produced by the last call to [`Envelope::advance`].
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether the envelope has run past its decay stage.
    pub fn is_finished(&self) -> bool {
        self.stage == EnvelopeStage::Finished
    }

    fn current_length(&self) -> f64 {
        match self.stage {
            EnvelopeStage::Attack => self.lengths[0],
            EnvelopeStage::Sustain => self.lengths[1],
            EnvelopeStage::Decay | EnvelopeStage::Finished => self.lengths[2],
        }
    }

    /// Advances one output sample and returns the new volume.
    pub fn advance(&mut self) -> f64 {
        self.time += 1.0;
        if self.time > self.current_length() {
            self.time = 0.0;
            self.stage = self.stage.next();
        }

        self.volume = match self.stage {
            EnvelopeStage::Attack => self.time * self.inverse[0],
            EnvelopeStage::Sustain => {
                1.0 + (1.0 - self.time * self.inverse[1]) * 2.0 * self.punch
            }
            EnvelopeStage::Decay => 1.0 - self.time * self.inverse[2],
            EnvelopeStage::Finished => 0.0,
        };
        self.volume
    }
}
