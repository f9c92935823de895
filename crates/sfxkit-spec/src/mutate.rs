//! Random variation of parameter sets.

use rand::Rng;

use crate::params::{Field, ParameterSet};

/// Fields touched by mutation, in draw order. Master volume and shape are
/// never mutated.
pub const MUTABLE_FIELDS: [Field; 22] = [
    Field::StartFrequency,
    Field::MinFrequency,
    Field::Slide,
    Field::DeltaSlide,
    Field::SquareDuty,
    Field::DutySweep,
    Field::VibratoDepth,
    Field::VibratoSpeed,
    Field::AttackTime,
    Field::SustainTime,
    Field::DecayTime,
    Field::SustainPunch,
    Field::LowPassCutoff,
    Field::LowPassCutoffSweep,
    Field::LowPassResonance,
    Field::HighPassCutoff,
    Field::HighPassCutoffSweep,
    Field::PhaserOffset,
    Field::PhaserSweep,
    Field::RepeatSpeed,
    Field::ChangeSpeed,
    Field::ChangeAmount,
];

impl ParameterSet {
    /// Perturbs the set in place.
    ///
    /// Each field in [`MUTABLE_FIELDS`] independently has a 50% chance of
    /// receiving a uniform offset in `[-amount, amount)`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, amount: f64, rng: &mut R) {
        for field in MUTABLE_FIELDS {
            if rng.gen::<f64>() < 0.5 {
                *self.get_mut(field) += rng.gen::<f64>() * amount * 2.0 - amount;
            }
        }
    }

    /// Returns a mutated copy, leaving `self` untouched.
    pub fn mutated<R: Rng + ?Sized>(&self, amount: f64, rng: &mut R) -> Self {
        let mut copy = *self;
        copy.mutate(amount, rng);
        copy
    }
}
