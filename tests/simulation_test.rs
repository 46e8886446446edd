//! End-to-end runs of the simulation loop

use cautious_intersection::simulation::{
    Direction, Dispatch, RandomSource, RngSource, ScriptedSource, SimConfig, SimError,
    Simulation, TraceEntry, TwoPointDuration,
};

fn collect_trace<R: RandomSource>(simulation: &mut Simulation<R>) -> Vec<TraceEntry> {
    let mut entries = Vec::new();
    simulation
        .run_with_trace(|entry| entries.push(entry.clone()))
        .expect("simulation should run to completion");
    entries
}

fn dispatches(entries: &[TraceEntry]) -> Vec<Dispatch> {
    entries.iter().filter_map(|entry| entry.dispatch).collect()
}

fn varied_config(total_arrivals: u64, capacity: usize) -> SimConfig {
    SimConfig::new(total_arrivals)
        .with_mean_arrival_time(4.0)
        .with_stop_time(TwoPointDuration::centered(5.0, 2.0))
        .with_clear_time(TwoPointDuration::centered(7.0, 3.0))
        .with_capacity(capacity)
}

/// Draw 0.2 gives a gap of 4 and always picks North
#[test]
fn test_capacity_two_clears_concurrently() {
    let config = SimConfig::new(10)
        .with_stop_time(TwoPointDuration::fixed(5.0))
        .with_clear_time(TwoPointDuration::fixed(7.0));
    let mut simulation = Simulation::new(config, ScriptedSource::constant(0.2)).unwrap();

    let entries = collect_trace(&mut simulation);
    let dispatched = dispatches(&entries);

    assert!(dispatched.len() >= 5);
    assert!(dispatched.iter().all(|d| d.direction == Direction::North));
    assert!(simulation.durations().iter().all(|d| *d == 12.0));

    // Driver 1 arrives at 4, stops at 9, clears at 16
    assert_eq!(dispatched[0].dispatched_at, 9.0);
    assert_eq!(dispatched[0].clear_time, 16.0);
    // Driver 2 goes in at 13 without waiting for driver 1 to leave
    assert_eq!(dispatched[1].dispatched_at, 13.0);
    assert!(dispatched[1].dispatched_at < dispatched[0].clear_time);

    let peak = entries
        .iter()
        .map(|entry| entry.snapshot.in_intersection)
        .max()
        .unwrap();
    assert_eq!(peak, 2);
}

#[test]
fn test_capacity_one_clears_serially() {
    for seed in 0..10 {
        let mut simulation =
            Simulation::new(varied_config(300, 1), RngSource::seeded(seed)).unwrap();
        let entries = collect_trace(&mut simulation);
        let dispatched = dispatches(&entries);

        assert!(!dispatched.is_empty());
        for pair in dispatched.windows(2) {
            assert!(
                pair[1].dispatched_at >= pair[0].clear_time,
                "seed {}: {:?} overlaps {:?}",
                seed,
                pair[1],
                pair[0]
            );
        }
        assert!(entries.iter().all(|e| e.snapshot.in_intersection <= 1));
    }
}

#[test]
fn test_invariants_hold_across_seeded_runs() {
    for seed in 0..20 {
        let config = varied_config(500, 2);
        let mut simulation = Simulation::new(config, RngSource::seeded(seed)).unwrap();
        let entries = collect_trace(&mut simulation);

        for entry in &entries {
            assert!(entry.snapshot.in_intersection <= 2);
            for direction in Direction::ALL {
                if entry.snapshot.is_ready(direction) {
                    assert!(entry.snapshot.queue_length(direction) > 0);
                }
            }
        }

        // Events come out in time order
        for pair in entries.windows(2) {
            assert!(pair[0].event.time() <= pair[1].event.time());
        }

        let dispatched = dispatches(&entries);
        assert_eq!(dispatched.len(), simulation.durations().len());
        for (dispatch, duration) in dispatched.iter().zip(simulation.durations()) {
            assert_eq!(dispatch.duration, *duration);
            assert!(*duration >= 0.0);
        }
    }
}

#[test]
fn test_same_draws_give_same_run() {
    let run = |seed: u64| {
        let mut simulation =
            Simulation::new(varied_config(400, 2), RngSource::seeded(seed)).unwrap();
        let entries = collect_trace(&mut simulation);
        (entries, simulation.into_durations())
    };

    let (first_trace, first_durations) = run(7);
    let (second_trace, second_durations) = run(7);
    assert_eq!(first_trace, second_trace);
    assert_eq!(first_durations, second_durations);

    let (other_trace, _) = run(8);
    assert_ne!(first_trace, other_trace);
}

#[test]
fn test_terminates_after_target_arrivals_scheduled() {
    let mut simulation =
        Simulation::new(varied_config(50, 2), RngSource::seeded(3)).unwrap();
    assert_eq!(simulation.arrivals_scheduled(), 1);
    assert!(!simulation.is_finished());

    simulation.run().unwrap();

    assert!(simulation.is_finished());
    assert_eq!(simulation.arrivals_scheduled(), 51);
    assert!(simulation.events_processed() >= 50);
    assert!(simulation.pending_events() >= 1);
}

#[test]
fn test_single_arrival_target() {
    let config = SimConfig::new(1)
        .with_stop_time(TwoPointDuration::fixed(5.0))
        .with_clear_time(TwoPointDuration::fixed(7.0));
    let mut simulation = Simulation::new(config, ScriptedSource::constant(0.2)).unwrap();
    let entries = collect_trace(&mut simulation);

    // Only the first arrival is processed; scheduling the next one ends the run
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event.time(), 4.0);
    assert!(simulation.durations().is_empty());
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let result = Simulation::new(SimConfig::new(0), ScriptedSource::constant(0.5));
    assert!(matches!(
        result,
        Err(SimError::InvalidConfig {
            field: "total_arrivals",
            ..
        })
    ));

    let result = Simulation::new(
        SimConfig::new(10).with_capacity(0),
        ScriptedSource::constant(0.5),
    );
    assert!(matches!(
        result,
        Err(SimError::InvalidConfig {
            field: "capacity",
            ..
        })
    ));
}

#[test]
fn test_trace_entries_describe_events() {
    let config = SimConfig::new(3)
        .with_stop_time(TwoPointDuration::fixed(5.0))
        .with_clear_time(TwoPointDuration::fixed(7.0));
    let mut simulation = Simulation::new(config, ScriptedSource::constant(0.2)).unwrap();
    let entries = collect_trace(&mut simulation);

    let first = entries[0].to_string();
    assert!(first.starts_with("4: A driver arrives from the North."));
    assert!(first.contains("[N,E,S,W] = [1,0,0,0]"));
    assert!(first.contains("Number in the intersection: 0"));

    let stop = entries
        .iter()
        .find(|entry| entry.dispatch.is_some())
        .unwrap()
        .to_string();
    assert!(stop.contains("has stopped."));
    assert!(stop.contains("Driver 1 from the North enters the intersection, clears at 16."));
}
