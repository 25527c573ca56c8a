//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through `TickInput` and action timestamps only
//! - Randomness comes in through a `RandomSource` only
//! - Stable obstacle order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod jump;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, first_hit};
pub use jump::Jump;
pub use rng::{RandomSource, SequenceSource};
pub use spawn::{SpawnCadence, run_spawner, spawn_batch};
pub use state::{FrameSnapshot, GameState, Obstacle, RunTimers};
pub use tick::{ActionOutcome, FrameReport, TickInput, on_action, tick};
