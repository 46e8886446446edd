//! Configuration validation, two-point durations and approach ordering

use cautious_intersection::simulation::{
    Direction, RandomSource, RngSource, ScriptedSource, SimConfig, SimError, TwoPointDuration,
    CLEAR_TIME, MAX_IN_INTERSECTION, MEAN_ARRIVAL_TIME, STOP_TIME, TOTAL_ARRIVALS,
};

fn rejected_field(config: &SimConfig) -> Option<&'static str> {
    match config.validate() {
        Err(SimError::InvalidConfig { field, .. }) => Some(field),
        _ => None,
    }
}

#[test]
fn test_default_config() {
    let config = SimConfig::default();
    assert_eq!(config.total_arrivals, TOTAL_ARRIVALS);
    assert_eq!(config.mean_arrival_time, MEAN_ARRIVAL_TIME);
    assert_eq!(config.stop_time, TwoPointDuration::fixed(STOP_TIME));
    assert_eq!(config.clear_time, TwoPointDuration::fixed(CLEAR_TIME));
    assert_eq!(config.capacity, MAX_IN_INTERSECTION);
    assert!(!config.trace_events);
    assert_eq!(config.upper_arrival_time(), 20.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_are_rejected_not_clamped() {
    assert_eq!(rejected_field(&SimConfig::new(0)), Some("total_arrivals"));
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_capacity(0)),
        Some("capacity")
    );
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_mean_arrival_time(0.0)),
        Some("mean_arrival_time")
    );
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_mean_arrival_time(f64::NAN)),
        Some("mean_arrival_time")
    );
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_stop_time(TwoPointDuration::new(-1.0, 2.0))),
        Some("stop_time")
    );
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_clear_time(TwoPointDuration::fixed(0.0))),
        Some("clear_time")
    );
    assert_eq!(
        rejected_field(&SimConfig::new(5).with_clear_time(TwoPointDuration::new(9.0, 3.0))),
        Some("clear_time")
    );
    assert_eq!(
        rejected_field(
            &SimConfig::new(5).with_stop_time(TwoPointDuration::new(1.0, f64::INFINITY))
        ),
        Some("stop_time")
    );
}

#[test]
fn test_zero_stop_time_is_allowed() {
    let config = SimConfig::new(5).with_stop_time(TwoPointDuration::fixed(0.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_centered_duration_spans_shift() {
    let duration = TwoPointDuration::centered(7.0, 2.0);
    assert_eq!(duration.low, 5.0);
    assert_eq!(duration.high, 9.0);
}

#[test]
fn test_two_point_sample_is_a_coin_flip() {
    let duration = TwoPointDuration::new(3.0, 11.0);
    let mut rng = ScriptedSource::new(vec![0.0, 0.49, 0.5, 0.99]);
    let samples: Vec<f64> = (0..4).map(|_| duration.sample(&mut rng)).collect();
    assert_eq!(samples, vec![3.0, 3.0, 11.0, 11.0]);
    assert_eq!(rng.draws_taken(), 4);
}

#[test]
fn test_two_point_sample_only_yields_bounds() {
    let duration = TwoPointDuration::new(4.0, 10.0);
    let mut rng = RngSource::seeded(11);
    let samples: Vec<f64> = (0..1000).map(|_| duration.sample(&mut rng)).collect();
    let lows = samples.iter().filter(|s| **s == 4.0).count();
    let highs = samples.iter().filter(|s| **s == 10.0).count();
    assert_eq!(lows + highs, 1000);
    assert!(lows > 400 && highs > 400);
}

#[test]
fn test_rng_source_stays_in_unit_interval() {
    let mut rng = RngSource::seeded(5);
    for _ in 0..1000 {
        let draw = rng.uniform();
        assert!((0.0..1.0).contains(&draw));
    }
}

#[test]
fn test_counter_clockwise_successors() {
    assert_eq!(Direction::North.counter_clockwise(), Direction::West);
    assert_eq!(Direction::West.counter_clockwise(), Direction::South);
    assert_eq!(Direction::South.counter_clockwise(), Direction::East);
    assert_eq!(Direction::East.counter_clockwise(), Direction::North);

    assert_eq!(
        Direction::North.round_robin_from(),
        [Direction::West, Direction::South, Direction::East, Direction::North]
    );
    assert_eq!(
        Direction::South.round_robin_from(),
        [Direction::East, Direction::North, Direction::West, Direction::South]
    );
}

#[test]
fn test_direction_from_draw_quarters() {
    assert_eq!(Direction::from_draw(0.0), Direction::North);
    assert_eq!(Direction::from_draw(0.24), Direction::North);
    assert_eq!(Direction::from_draw(0.25), Direction::East);
    assert_eq!(Direction::from_draw(0.5), Direction::South);
    assert_eq!(Direction::from_draw(0.75), Direction::West);
    assert_eq!(Direction::from_draw(0.999), Direction::West);
}
