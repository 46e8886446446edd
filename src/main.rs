use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cautious_intersection::simulation::{
    average, DurationSummary, RandomSource, RngSource, SimConfig, SimTime, Simulation,
    TwoPointDuration, CLEAR_TIME, CLEAR_TIME_SHIFT, MAX_IN_INTERSECTION, MEAN_ARRIVAL_TIME,
    STOP_TIME, STOP_TIME_SHIFT, TOTAL_ARRIVALS,
};

#[derive(Parser)]
#[command(name = "cautious_intersection")]
#[command(about = "Discrete-event simulation of a cautious four-way intersection")]
struct Cli {
    /// Number of arrivals to schedule before the run stops
    #[arg(long, default_value_t = TOTAL_ARRIVALS)]
    arrivals: u64,

    /// Mean time between arrivals (gaps are uniform in [0, 2 * mean))
    #[arg(long, default_value_t = MEAN_ARRIVAL_TIME)]
    mean_arrival_time: f64,

    /// Centre of the two-point stop duration
    #[arg(long, default_value_t = STOP_TIME)]
    stop_time: f64,

    /// Stop duration is either stop_time - shift or stop_time + shift
    #[arg(long, default_value_t = STOP_TIME_SHIFT)]
    stop_time_shift: f64,

    /// Centre of the two-point clear duration
    #[arg(long, default_value_t = CLEAR_TIME)]
    clear_time: f64,

    /// Clear duration is either clear_time - shift or clear_time + shift
    #[arg(long, default_value_t = CLEAR_TIME_SHIFT)]
    clear_time_shift: f64,

    /// Maximum number of vehicles clearing at once
    #[arg(long, default_value_t = MAX_IN_INTERSECTION)]
    capacity: usize,

    /// Seed for reproducible runs; replication i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs
    #[arg(long, default_value = "1")]
    replications: u32,

    /// Print every event and the queue state as the run proceeds
    #[arg(long)]
    print_events: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig::new(cli.arrivals)
        .with_mean_arrival_time(cli.mean_arrival_time)
        .with_stop_time(TwoPointDuration::centered(cli.stop_time, cli.stop_time_shift))
        .with_clear_time(TwoPointDuration::centered(cli.clear_time, cli.clear_time_shift))
        .with_capacity(cli.capacity)
        .with_trace_events(cli.print_events);
    config.validate().context("Invalid simulation parameters")?;

    println!("Running cautious intersection simulation...");
    println!(
        "Arrivals: {}, Mean arrival gap: {}, Capacity: {}",
        config.total_arrivals, config.mean_arrival_time, config.capacity
    );
    println!();

    let mut means = Vec::new();
    for replication in 0..cli.replications.max(1) {
        let durations = match cli.seed {
            Some(seed) => run_once(
                &config,
                RngSource::seeded(seed.wrapping_add(u64::from(replication))),
            ),
            None => run_once(&config, RngSource::thread()),
        }
        .with_context(|| format!("Replication {} failed", replication + 1))?;

        println!("=== Replication {} ===", replication + 1);
        match DurationSummary::from_durations(&durations) {
            Some(summary) => {
                println!("{}", summary);
                means.push(summary.mean);
            }
            None => println!("No driver cleared the intersection."),
        }
        println!();
    }

    if means.len() > 1 {
        println!("=== Across {} replications ===", means.len());
        println!("Mean of means: {:.3}", average(&means));
    }

    Ok(())
}

/// Run one simulation and return its recorded clear durations
fn run_once<R: RandomSource>(config: &SimConfig, rng: R) -> Result<Vec<SimTime>> {
    let mut simulation = Simulation::new(config.clone(), rng)?;
    if config.trace_events {
        simulation.run_with_trace(|entry| {
            println!("{}", entry);
            println!();
        })?;
    } else {
        simulation.run()?;
    }
    info!(
        "Processed {} events over {:.3} time units",
        simulation.events_processed(),
        simulation.clock()
    );
    Ok(simulation.into_durations())
}
