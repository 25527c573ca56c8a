//! Obstacle spawner
//!
//! Two rules can fire a batch:
//! - the field has been empty since the run began more than
//!   [`FIRST_SPAWN_DELAY_MS`] ago, so the first cacti always show up
//! - the cooldown since the last batch has passed and a random draw succeeds

use serde::{Deserialize, Serialize};

use super::rng::{RandomSource, batch_size, chance, obstacle_height};
use super::state::{Obstacle, RunTimers};
use crate::consts::*;

/// How the random spawn chance relates to frame timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnCadence {
    /// One draw at [`SPAWN_CHANCE`] per simulated frame, whatever the refresh rate
    #[default]
    PerFrame,
    /// [`SPAWN_CHANCE`] is per 60 Hz reference frame, scaled to the real frame interval
    FrameRateIndependent,
}

impl SpawnCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnCadence::PerFrame => "per-frame",
            SpawnCadence::FrameRateIndependent => "frame-rate-independent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per-frame" | "frame" => Some(SpawnCadence::PerFrame),
            "frame-rate-independent" | "independent" | "time" => {
                Some(SpawnCadence::FrameRateIndependent)
            }
            _ => None,
        }
    }

    /// Probability of the random rule firing on a frame `frame_ms` long
    pub fn frame_chance(&self, frame_ms: f64) -> f64 {
        match self {
            SpawnCadence::PerFrame => SPAWN_CHANCE,
            SpawnCadence::FrameRateIndependent => {
                let frames = (frame_ms / REFERENCE_FRAME_MS).max(0.0);
                1.0 - (1.0 - SPAWN_CHANCE).powf(frames)
            }
        }
    }
}

/// Whether a batch should spawn this frame
///
/// Draws from `rng` only when the cooldown has passed and the first-spawn
/// rule did not already fire.
pub fn should_spawn<R: RandomSource + ?Sized>(
    field_empty: bool,
    timers: &RunTimers,
    now: f64,
    cadence: SpawnCadence,
    rng: &mut R,
) -> bool {
    if field_empty && now - timers.run_start > FIRST_SPAWN_DELAY_MS {
        return true;
    }
    if now - timers.last_spawn > SPAWN_COOLDOWN_MS {
        let frame_ms = timers
            .last_frame
            .map(|prev| now - prev)
            .unwrap_or(REFERENCE_FRAME_MS);
        return chance(rng, cadence.frame_chance(frame_ms));
    }
    false
}

/// Build a batch of 1-3 staggered obstacles entering past the right edge
pub fn spawn_batch<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Obstacle> {
    let count = batch_size(rng);
    (0..count)
        .map(|i| {
            let x = OBSTACLE_SPAWN_X + i as f32 * OBSTACLE_SPACING;
            Obstacle::new(x, obstacle_height(rng))
        })
        .collect()
}

/// Run the spawner for one frame, appending any batch to `obstacles`
///
/// Returns the number of obstacles added.
pub fn run_spawner<R: RandomSource + ?Sized>(
    obstacles: &mut Vec<Obstacle>,
    timers: &mut RunTimers,
    now: f64,
    cadence: SpawnCadence,
    rng: &mut R,
) -> usize {
    if !should_spawn(obstacles.is_empty(), timers, now, cadence, rng) {
        return 0;
    }

    let batch = spawn_batch(rng);
    let added = batch.len();
    log::debug!(
        "Spawned {} obstacle(s) at t={:.0}ms, heights {:?}",
        added,
        now - timers.run_start,
        batch.iter().map(|o| o.height).collect::<Vec<_>>()
    );
    obstacles.extend(batch);
    timers.last_spawn = now;
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;

    #[test]
    fn test_no_spawn_before_first_delay() {
        let timers = RunTimers::starting_at(0.0);
        let mut rng = SequenceSource::new([0.0]);
        assert!(!should_spawn(true, &timers, 2000.0, SpawnCadence::PerFrame, &mut rng));
        // Nothing drawn while the cooldown is running
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_first_spawn_rule_skips_random_draw() {
        let timers = RunTimers::starting_at(0.0);
        let mut rng = SequenceSource::new([0.99]);
        assert!(should_spawn(true, &timers, 2001.0, SpawnCadence::PerFrame, &mut rng));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_first_spawn_rule_needs_empty_field() {
        let timers = RunTimers::starting_at(0.0);
        let mut rng = SequenceSource::new([0.0]);
        assert!(!should_spawn(false, &timers, 2500.0, SpawnCadence::PerFrame, &mut rng));
    }

    #[test]
    fn test_random_rule_after_cooldown() {
        let mut timers = RunTimers::starting_at(0.0);
        timers.last_spawn = 1000.0;

        let mut miss = SequenceSource::new([0.5]);
        assert!(!should_spawn(false, &timers, 4001.0, SpawnCadence::PerFrame, &mut miss));
        assert_eq!(miss.remaining(), 0);

        let mut hit = SequenceSource::new([0.1]);
        assert!(should_spawn(false, &timers, 4001.0, SpawnCadence::PerFrame, &mut hit));

        // Exactly at the cooldown is still too early
        let mut early = SequenceSource::new([0.0]);
        assert!(!should_spawn(false, &timers, 4000.0, SpawnCadence::PerFrame, &mut early));
    }

    #[test]
    fn test_spawn_batch_positions_and_heights() {
        // count draw 0.9 -> 3, heights 0.0 -> 20, 0.5 -> 40, 0.975 -> 59
        let mut rng = SequenceSource::new([0.9, 0.0, 0.5, 0.975]);
        let batch = spawn_batch(&mut rng);
        let xs: Vec<f32> = batch.iter().map(|o| o.x).collect();
        let hs: Vec<f32> = batch.iter().map(|o| o.height).collect();
        assert_eq!(xs, vec![780.0, 980.0, 1180.0]);
        assert_eq!(hs, vec![20.0, 40.0, 59.0]);
        assert!(batch.iter().all(|o| o.width == OBSTACLE_WIDTH));
    }

    #[test]
    fn test_run_spawner_resets_cooldown() {
        let mut timers = RunTimers::starting_at(0.0);
        let mut obstacles = Vec::new();
        let mut rng = SequenceSource::new([0.0, 0.5]);

        let added = run_spawner(&mut obstacles, &mut timers, 2100.0, SpawnCadence::PerFrame, &mut rng);
        assert_eq!(added, 1);
        assert_eq!(obstacles, vec![Obstacle::new(780.0, 40)]);
        assert_eq!(timers.last_spawn, 2100.0);
    }

    #[test]
    fn test_frame_chance_scaling() {
        let per_frame = SpawnCadence::PerFrame;
        assert_eq!(per_frame.frame_chance(8.0), SPAWN_CHANCE);

        let independent = SpawnCadence::FrameRateIndependent;
        let at_ref = independent.frame_chance(REFERENCE_FRAME_MS);
        assert!((at_ref - SPAWN_CHANCE).abs() < 1e-9);
        // Twice the interval: 1 - 0.8^2
        let doubled = independent.frame_chance(REFERENCE_FRAME_MS * 2.0);
        assert!((doubled - 0.36).abs() < 1e-9);
        assert!(independent.frame_chance(REFERENCE_FRAME_MS / 2.0) < SPAWN_CHANCE);
        assert_eq!(independent.frame_chance(-5.0), 0.0);
    }

    #[test]
    fn test_cadence_parse() {
        assert_eq!(SpawnCadence::from_str("Per-Frame"), Some(SpawnCadence::PerFrame));
        assert_eq!(
            SpawnCadence::from_str("time"),
            Some(SpawnCadence::FrameRateIndependent)
        );
        assert_eq!(SpawnCadence::from_str("sometimes"), None);
        assert_eq!(
            SpawnCadence::from_str(SpawnCadence::FrameRateIndependent.as_str()),
            Some(SpawnCadence::FrameRateIndependent)
        );
    }
}
