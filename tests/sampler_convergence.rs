use bloch_scope::core::sampler::{average_vector, current_vector};
use bloch_scope::core::{BlochError, BlochVector, MeasurementSampler, MeasurementStats, Outcome};

#[test]
fn running_average_converges_to_one_minus_two_p() {
    let p = 0.3;
    let mut sampler = MeasurementSampler::seeded(42);
    let mut stats = MeasurementStats::default();
    for _ in 0..100_000 {
        stats = stats.record(sampler.sample_one(p).unwrap());
    }
    assert_eq!(stats.total, 100_000);
    assert_eq!(stats.count0 + stats.count1, stats.total);
    let z = average_vector(&stats).z;
    assert!((0.38..=0.42).contains(&z), "z = {z}");
}

#[test]
fn tolerance_shrinks_with_more_shots() {
    let p = 0.8;
    let expected = 1.0 - 2.0 * p;
    let mut sampler = MeasurementSampler::seeded(3);
    let mut stats = MeasurementStats::default();
    let mut errors = Vec::new();
    for checkpoint in [100u64, 10_000, 200_000] {
        while stats.total < checkpoint {
            stats = stats.record(sampler.sample_one(p).unwrap());
        }
        errors.push((average_vector(&stats).z - expected).abs());
    }
    assert!(errors[2] < 0.01, "errors = {errors:?}");
    assert!(errors[2] <= errors[0] + 1e-12, "errors = {errors:?}");
}

#[test]
fn same_seed_same_sequence() {
    let mut a = MeasurementSampler::seeded(11);
    let mut b = MeasurementSampler::seeded(11);
    let xs: Vec<Outcome> = (0..64).map(|_| a.sample_one(0.5).unwrap()).collect();
    let ys: Vec<Outcome> = (0..64).map(|_| b.sample_one(0.5).unwrap()).collect();
    assert_eq!(xs, ys);
}

#[test]
fn invalid_probability_is_an_error() {
    let mut s = MeasurementSampler::seeded(0);
    match s.sample_one(1.5) {
        Err(BlochError::InvalidProbability(p)) => assert_eq!(p, 1.5),
        other => panic!("expected InvalidProbability, got {other:?}"),
    }
}

#[test]
fn collapsed_and_average_vectors() {
    assert_eq!(current_vector(Outcome::Zero), BlochVector::new(0.0, 0.0, 1.0));
    assert_eq!(current_vector(Outcome::One), BlochVector::new(0.0, 0.0, -1.0));
    let stats = MeasurementStats { count0: 1, count1: 3, total: 4 };
    let avg = average_vector(&stats);
    assert_eq!((avg.x, avg.y, avg.z), (0.0, 0.0, -0.5));
    assert!(avg.length() <= 1.0);
}

#[test]
fn sample_counts_follow_the_state() {
    use bloch_scope::core::gates::{prepare, Gate};
    let one = prepare(&[Gate::X]).unwrap();
    let stats = MeasurementSampler::seeded(5).sample_counts(&one, 500).unwrap();
    assert_eq!(stats, MeasurementStats { count0: 0, count1: 500, total: 500 });

    let plus = prepare(&[Gate::H]).unwrap();
    let stats = MeasurementSampler::seeded(5).sample_counts(&plus, 20_000).unwrap();
    assert!((stats.p_one() - 0.5).abs() < 0.03, "p_one = {}", stats.p_one());
}
