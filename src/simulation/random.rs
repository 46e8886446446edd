//! Sources of uniform random draws
//!
//! The engine only ever asks for a float in [0,1). Seeded `rand` generators
//! give reproducible runs; `ScriptedSource` replays exact draws for tests.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Supplies uniform draws in [0,1)
pub trait RandomSource {
    fn uniform(&mut self) -> f64;
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Create a reproducible source from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RngSource<ThreadRng> {
    /// Create a source backed by the thread-local generator
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, starting over when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedSource {
    /// Panics if `draws` is empty or holds a value outside [0,1).
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        assert!(
            draws.iter().all(|d| (0.0..1.0).contains(d)),
            "scripted draws must lie in [0,1)"
        );
        Self { draws, position: 0 }
    }

    /// Always returns the same draw
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }

    /// Number of draws handed out so far
    pub fn draws_taken(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}
