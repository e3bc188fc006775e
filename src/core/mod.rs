//! Core module tree: state projection, sampling and frame sequencing.
//! Nothing in here touches the terminal or a window.

pub mod cancel;
pub mod error;
pub mod frame;
pub mod gates;
pub mod sampler;
pub mod sequencer;
pub mod state;

pub use cancel::CancelToken;
pub use error::BlochError;
pub use frame::{Frame, FrameDetail};
pub use sampler::{MeasurementSampler, MeasurementStats, Outcome};
pub use sequencer::{FrameSequencer, MeasurementSchedule, RotationSchedule, Schedule, SequencerState, Step};
pub use state::{BlochVector, QuantumState};
