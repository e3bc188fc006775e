use bloch_scope::core::{
    BlochVector, CancelToken, FrameDetail, FrameSequencer, MeasurementSampler, MeasurementSchedule,
    MeasurementStats, Outcome, RotationSchedule, SequencerState,
};
use bloch_scope::core::sampler::current_vector;
use std::f64::consts::FRAC_PI_2;

fn flicker(frames: usize, prob_one: f64, shots: u32, seed: u64) -> FrameSequencer<MeasurementSchedule<rand::rngs::StdRng>> {
    let schedule = MeasurementSchedule::new(prob_one, shots, MeasurementSampler::seeded(seed)).unwrap();
    FrameSequencer::new(frames, schedule, CancelToken::new())
}

#[test]
fn emits_exactly_n_frames_in_order() {
    let seq = FrameSequencer::new(60, RotationSchedule::new(0.0, FRAC_PI_2, 60), CancelToken::new());
    let frames: Vec<_> = seq.collect();
    assert_eq!(frames.len(), 60);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index, i);
        assert_eq!(f.total, 60);
    }
    let first = frames[0].current;
    let last = frames[59].current;
    assert!((first.z - 1.0).abs() < 1e-12);
    assert!((last.x - 1.0).abs() < 1e-9 && last.z.abs() < 1e-9);
}

#[test]
fn zero_frames_finishes_immediately() {
    let mut seq = FrameSequencer::new(0, RotationSchedule::new(0.0, 1.0, 0), CancelToken::new());
    assert!(seq.next().is_none());
    assert_eq!(seq.state(), SequencerState::Done);
}

#[test]
fn single_frame_rotation_shows_start_angle() {
    let frames: Vec<_> = FrameSequencer::new(1, RotationSchedule::new(0.4, 2.0, 1), CancelToken::new()).collect();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].detail, FrameDetail::Rotation { theta: 0.4 });
}

#[test]
fn cancellation_stops_the_stream() {
    let cancel = CancelToken::new();
    let mut seq = FrameSequencer::new(100, RotationSchedule::new(0.0, 1.0, 100), cancel.clone());
    let mut seen = 0;
    while let Some(frame) = seq.next() {
        seen += 1;
        if frame.index == 9 {
            cancel.cancel();
        }
    }
    assert_eq!(seen, 10);
    assert_eq!(seq.state(), SequencerState::Done);
    assert!(seq.next().is_none());
}

#[test]
fn measurement_stats_only_grow() {
    let mut prev = MeasurementStats::default();
    for (i, frame) in flicker(500, 0.4, 1, 9).enumerate() {
        let s = frame.stats;
        assert_eq!(s.total, i as u64 + 1);
        assert_eq!(s.count0 + s.count1, s.total);
        assert!(s.count0 >= prev.count0 && s.count1 >= prev.count1);
        assert!(frame.average.length() <= 1.0 + 1e-12);
        assert!((frame.average.z - (s.count0 as f64 - s.count1 as f64) / s.total as f64).abs() < 1e-12);
        prev = s;
    }
}

#[test]
fn current_vector_is_a_pole() {
    for frame in flicker(200, 0.5, 1, 21) {
        let FrameDetail::Measurement { last_outcome, shots_this_frame } = frame.detail else {
            panic!("expected a measurement frame");
        };
        assert_eq!(shots_this_frame, 1);
        let expected = match last_outcome {
            Outcome::Zero => BlochVector::NORTH,
            Outcome::One => BlochVector::SOUTH,
        };
        assert_eq!(frame.current, expected);
    }
}

#[test]
fn several_shots_per_frame_feed_the_average() {
    let frames: Vec<_> = flicker(50, 0.25, 8, 4).collect();
    assert_eq!(frames.len(), 50);
    assert_eq!(frames.last().map(|f| f.stats.total), Some(400));
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.stats.total, 8 * (i as u64 + 1));
    }
}

#[test]
fn current_vector_follows_last_shot_of_each_frame() {
    let shots = 3;
    let mut replay = MeasurementSampler::seeded(13);
    for frame in flicker(20, 0.5, shots, 13) {
        let mut last = Outcome::Zero;
        for _ in 0..shots {
            last = replay.sample_one(0.5).unwrap();
        }
        let FrameDetail::Measurement { last_outcome, shots_this_frame } = frame.detail else {
            panic!("expected a measurement frame");
        };
        assert_eq!(shots_this_frame, shots);
        assert_eq!(last_outcome, last, "frame {}", frame.index);
        assert_eq!(frame.current, current_vector(last), "frame {}", frame.index);
    }
}

#[test]
fn certain_outcomes_pin_both_vectors() {
    for frame in flicker(20, 0.0, 1, 0) {
        assert_eq!(frame.current, BlochVector::NORTH);
        assert_eq!(frame.average.z, 1.0);
    }
    for frame in flicker(20, 1.0, 1, 0) {
        assert_eq!(frame.current, BlochVector::SOUTH);
        assert_eq!(frame.average.z, -1.0);
    }
}

#[test]
fn same_seed_replays_the_same_run() {
    let a: Vec<_> = flicker(100, 0.3, 2, 77).map(|f| f.stats).collect();
    let b: Vec<_> = flicker(100, 0.3, 2, 77).map(|f| f.stats).collect();
    assert_eq!(a, b);
}
