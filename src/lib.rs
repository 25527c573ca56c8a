//! Dino Runner - jump the cacti, survive as long as you can
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump, spawning, motion, collisions)
//! - `renderer`: WebGPU rendering of the play-field
//! - `platform`: Clock source and frame-callback registration
//! - `settings`: Player preferences and spawn cadence

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SpawnCadence};

/// Game configuration constants (pixels and milliseconds)
pub mod consts {
    /// Width of the visible play-field
    pub const FIELD_WIDTH: f32 = 780.0;
    /// Height of the visible play-field (ground sits at the bottom)
    pub const FIELD_HEIGHT: f32 = 300.0;

    /// Character hitbox (fixed horizontal position)
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 40.0;
    pub const DINO_HEIGHT: f32 = 40.0;

    /// Jump tuning
    pub const JUMP_INITIAL_HEIGHT: f32 = 80.0;
    pub const JUMP_BOOST: f32 = 40.0;
    pub const JUMP_MAX_HEIGHT: f32 = 200.0;
    /// Hang time window; extra presses only count inside it
    pub const JUMP_DURATION_MS: f64 = 1000.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 20;
    /// Exclusive upper bound
    pub const OBSTACLE_MAX_HEIGHT: u32 = 60;
    pub const OBSTACLE_SPAWN_X: f32 = 780.0;
    pub const OBSTACLE_SPACING: f32 = 200.0;
    /// Horizontal scroll per simulated frame
    pub const OBSTACLE_SPEED: f32 = 5.0;
    /// Obstacles at or left of this x are dropped
    pub const OBSTACLE_CULL_X: f32 = -50.0;

    /// Spawn cadence
    pub const FIRST_SPAWN_DELAY_MS: f64 = 2000.0;
    pub const SPAWN_COOLDOWN_MS: f64 = 3000.0;
    pub const SPAWN_CHANCE: f64 = 0.2;
    pub const MAX_BATCH_SIZE: usize = 3;

    /// Frame interval the per-frame spawn chance was tuned against (60 Hz)
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
}
