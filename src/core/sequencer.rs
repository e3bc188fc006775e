//! Pull-driven frame production.
//!
//! A [`FrameSequencer`] is a finite, lazy iterator over [`Frame`]s. Each pull runs
//! one step of a [`Schedule`] with the running [`MeasurementStats`] passed in by
//! value and the updated stats handed back, so no counters live outside the run.
//! Consumers set the pace: a slow renderer only delays the next pull.
use std::iter::FusedIterator;

use rand::Rng;

use super::cancel::CancelToken;
use super::error::{BlochError, Result};
use super::frame::{Frame, FrameDetail};
use super::sampler::{average_vector, current_vector, validate_probability, MeasurementSampler, MeasurementStats, Outcome};
use super::state::{from_rotation_angle, BlochVector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Running,
    Done,
}

/// Output of one schedule step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub current: BlochVector,
    pub average: BlochVector,
    pub stats: MeasurementStats,
    pub detail: FrameDetail,
}

pub trait Schedule {
    fn step(&mut self, index: usize, stats: MeasurementStats) -> Step;
}

impl<F> Schedule for F
where
    F: FnMut(usize, MeasurementStats) -> Step,
{
    fn step(&mut self, index: usize, stats: MeasurementStats) -> Step {
        self(index, stats)
    }
}

pub struct FrameSequencer<S: Schedule> {
    n_frames: usize,
    next_index: usize,
    state: SequencerState,
    stats: MeasurementStats,
    schedule: S,
    cancel: CancelToken,
}

impl<S: Schedule> FrameSequencer<S> {
    pub fn new(n_frames: usize, schedule: S, cancel: CancelToken) -> Self {
        Self {
            n_frames,
            next_index: 0,
            state: SequencerState::Idle,
            stats: MeasurementStats::default(),
            schedule,
            cancel,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }
}

impl<S: Schedule> Iterator for FrameSequencer<S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.state == SequencerState::Done {
            return None;
        }
        if self.cancel.is_cancelled() {
            tracing::debug!(emitted = self.next_index, "sequencer cancelled");
            self.state = SequencerState::Done;
            return None;
        }
        self.state = SequencerState::Running;
        if self.next_index >= self.n_frames {
            self.state = SequencerState::Done;
            return None;
        }

        let index = self.next_index;
        let step = self.schedule.step(index, self.stats);
        self.stats = step.stats;
        self.next_index += 1;
        Some(Frame {
            index,
            total: self.n_frames,
            current: step.current,
            average: step.average,
            stats: step.stats,
            detail: step.detail,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == SequencerState::Done {
            return (0, Some(0));
        }
        // cancellation can cut the run short
        (0, Some(self.n_frames - self.next_index))
    }
}

impl<S: Schedule> FusedIterator for FrameSequencer<S> {}

/// Deterministic R_y sweep from `start` to `end` over `frames` steps.
#[derive(Clone, Copy, Debug)]
pub struct RotationSchedule {
    pub start: f64,
    pub end: f64,
    pub frames: usize,
}

impl RotationSchedule {
    pub fn new(start: f64, end: f64, frames: usize) -> Self {
        Self { start, end, frames }
    }

    pub fn theta(&self, index: usize) -> f64 {
        if self.frames <= 1 {
            return self.start;
        }
        self.start + (self.end - self.start) * index as f64 / (self.frames - 1) as f64
    }
}

impl Schedule for RotationSchedule {
    fn step(&mut self, index: usize, stats: MeasurementStats) -> Step {
        let theta = self.theta(index);
        let v = from_rotation_angle(theta);
        Step { current: v, average: v, stats, detail: FrameDetail::Rotation { theta } }
    }
}

/// Stochastic Z-basis readout at a fixed probability of `1`.
///
/// `current` is the outcome of the last shot drawn in the frame; every shot feeds
/// the running average.
pub struct MeasurementSchedule<R: Rng> {
    prob_one: f64,
    shots_per_frame: u32,
    sampler: MeasurementSampler<R>,
}

impl<R: Rng> MeasurementSchedule<R> {
    pub fn new(prob_one: f64, shots_per_frame: u32, sampler: MeasurementSampler<R>) -> Result<Self> {
        let prob_one = validate_probability(prob_one)?;
        if shots_per_frame == 0 {
            return Err(BlochError::InvalidShots);
        }
        Ok(Self { prob_one, shots_per_frame, sampler })
    }
}

impl<R: Rng> Schedule for MeasurementSchedule<R> {
    fn step(&mut self, _index: usize, mut stats: MeasurementStats) -> Step {
        let mut last = Outcome::Zero;
        for _ in 0..self.shots_per_frame {
            last = self.sampler.draw(self.prob_one);
            stats = stats.record(last);
        }
        Step {
            current: current_vector(last),
            average: average_vector(&stats),
            stats,
            detail: FrameDetail::Measurement { last_outcome: last, shots_this_frame: self.shots_per_frame },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(_i: usize, stats: MeasurementStats) -> Step {
        Step {
            current: BlochVector::NORTH,
            average: BlochVector::NORTH,
            stats,
            detail: FrameDetail::Rotation { theta: 0.0 },
        }
    }

    #[test]
    fn idle_until_first_pull() {
        let mut seq = FrameSequencer::new(2, still, CancelToken::new());
        assert_eq!(seq.state(), SequencerState::Idle);
        seq.next();
        assert_eq!(seq.state(), SequencerState::Running);
        seq.next();
        assert_eq!(seq.state(), SequencerState::Running);
        assert!(seq.next().is_none());
        assert_eq!(seq.state(), SequencerState::Done);
        assert!(seq.next().is_none());
    }

    #[test]
    fn theta_schedule_endpoints() {
        let s = RotationSchedule::new(0.0, 1.0, 5);
        assert_eq!(s.theta(0), 0.0);
        assert_eq!(s.theta(4), 1.0);
        assert_eq!(s.theta(2), 0.5);
        assert_eq!(RotationSchedule::new(0.3, 1.0, 1).theta(0), 0.3);
    }

    #[test]
    fn measurement_schedule_validates_up_front() {
        let bad_p = MeasurementSchedule::new(2.0, 1, MeasurementSampler::seeded(0));
        assert!(matches!(bad_p, Err(BlochError::InvalidProbability(_))));
        let bad_shots = MeasurementSchedule::new(0.5, 0, MeasurementSampler::seeded(0));
        assert!(matches!(bad_shots, Err(BlochError::InvalidShots)));
    }
}
