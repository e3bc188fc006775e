//! Simulated Z-basis measurements and their running statistics.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::error::{BlochError, Result};
use super::state::{BlochVector, QuantumState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Zero,
    One,
}

impl Outcome {
    pub fn bit(self) -> u8 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

/// Running counts for one sampling run. Values only grow; a new run starts from `default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MeasurementStats {
    pub count0: u64,
    pub count1: u64,
    pub total: u64,
}

impl MeasurementStats {
    #[must_use]
    pub fn record(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Zero => Self { count0: self.count0 + 1, total: self.total + 1, ..self },
            Outcome::One => Self { count1: self.count1 + 1, total: self.total + 1, ..self },
        }
    }

    pub fn p_zero(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.count0 as f64 / self.total as f64 }
    }

    pub fn p_one(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.count1 as f64 / self.total as f64 }
    }
}

/// Collapsed reading: |0⟩ is the north pole, |1⟩ the south pole.
pub fn current_vector(outcome: Outcome) -> BlochVector {
    match outcome {
        Outcome::Zero => BlochVector::NORTH,
        Outcome::One => BlochVector::SOUTH,
    }
}

/// Empirical ⟨Z⟩ as a vector on the z axis. An unmeasured system reads as |0⟩.
pub fn average_vector(stats: &MeasurementStats) -> BlochVector {
    if stats.total == 0 {
        return BlochVector::NORTH;
    }
    let z = (stats.count0 as f64 - stats.count1 as f64) / stats.total as f64;
    BlochVector::new(0.0, 0.0, z)
}

pub fn validate_probability(prob_one: f64) -> Result<f64> {
    if prob_one.is_finite() && (0.0..=1.0).contains(&prob_one) {
        Ok(prob_one)
    } else {
        Err(BlochError::InvalidProbability(prob_one))
    }
}

pub struct MeasurementSampler<R: Rng = StdRng> {
    rng: R,
}

impl MeasurementSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> MeasurementSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample_one(&mut self, prob_one: f64) -> Result<Outcome> {
        let p = validate_probability(prob_one)?;
        Ok(self.draw(p))
    }

    /// `p` must already be validated.
    pub(crate) fn draw(&mut self, p: f64) -> Outcome {
        let u: f64 = self.rng.gen();
        if u < p { Outcome::One } else { Outcome::Zero }
    }

    /// Draws `shots` outcomes from the computational-basis distribution of `state`.
    pub fn sample_counts(&mut self, state: &QuantumState, shots: u64) -> Result<MeasurementStats> {
        let p = validate_probability(state.prob_one().clamp(0.0, 1.0))?;
        Ok((0..shots).fold(MeasurementStats::default(), |stats, _| stats.record(self.draw(p))))
    }
}
