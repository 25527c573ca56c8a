//! Injectable randomness for the spawner
//!
//! The simulation never reaches for a global RNG. Every draw goes through a
//! [`RandomSource`], so runs are reproducible from a seed and tests can feed
//! exact sequences.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::consts::{MAX_BATCH_SIZE, OBSTACLE_MAX_HEIGHT, OBSTACLE_MIN_HEIGHT};

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats the fallback forever
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl SequenceSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            // 0.99 never passes a spawn chance check
            fallback: 0.99,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Draws not consumed yet
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

/// Pull one draw, pinned into `[0, 1)` even if the source misbehaves
fn unit<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.next_unit();
    if u.is_nan() {
        0.0
    } else {
        u.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Bernoulli trial with probability `p`
pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit(rng) < p
}

/// Number of obstacles in a batch, uniform in `1..=MAX_BATCH_SIZE`
pub fn batch_size<R: RandomSource + ?Sized>(rng: &mut R) -> usize {
    let n = (unit(rng) * MAX_BATCH_SIZE as f64).floor() as usize + 1;
    n.clamp(1, MAX_BATCH_SIZE)
}

/// Obstacle height, uniform integer in `[OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT)`
pub fn obstacle_height<R: RandomSource + ?Sized>(rng: &mut R) -> u32 {
    let span = OBSTACLE_MAX_HEIGHT - OBSTACLE_MIN_HEIGHT;
    let h = (unit(rng) * span as f64).floor() as u32 + OBSTACLE_MIN_HEIGHT;
    h.clamp(OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT - 1)
}
