//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates. The
//! presentation layer only reads it, through the accessors or a
//! [`FrameSnapshot`].

use serde::{Deserialize, Serialize};

use super::jump::Jump;
use crate::consts::*;

/// A cactus scrolling toward the character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height above the ground, integer valued in `[20, 60)`
    pub height: f32,
    pub width: f32,
}

impl Obstacle {
    pub fn new(x: f32, height: u32) -> Self {
        Self {
            x,
            height: height as f32,
            width: OBSTACLE_WIDTH,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully scrolled off the left side
    pub fn is_off_screen(&self) -> bool {
        self.x <= OBSTACLE_CULL_X
    }
}

/// Wall-clock references for the current run (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTimers {
    /// When the current run (or restart) began
    pub run_start: f64,
    /// When the last obstacle batch spawned
    pub last_spawn: f64,
    /// Time of the previous simulated frame, if any
    pub last_frame: Option<f64>,
}

impl RunTimers {
    pub fn starting_at(now: f64) -> Self {
        Self {
            run_start: now,
            last_spawn: now,
            last_frame: None,
        }
    }
}

/// Read-only per-frame view for presentation collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub score: u64,
    pub started: bool,
    pub over: bool,
    pub jump_height: f32,
    pub obstacles: Vec<Obstacle>,
}

/// Complete game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// A run has begun at least once
    pub(crate) started: bool,
    /// The current run ended in a collision
    pub(crate) over: bool,
    /// Frames survived in the current run
    pub(crate) score: u64,
    pub(crate) jump: Jump,
    /// Spawn order, oldest first
    pub(crate) obstacles: Vec<Obstacle>,
    /// Not part of the presented state
    #[serde(skip)]
    pub(crate) timers: RunTimers,
}

impl GameState {
    /// Fresh state, waiting for the first action
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn over(&self) -> bool {
        self.over
    }

    /// Frames advance only while a run is live
    pub fn is_active(&self) -> bool {
        self.started && !self.over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_jumping()
    }

    /// Character vertical offset, capped at `JUMP_MAX_HEIGHT`
    pub fn jump_height(&self) -> f32 {
        self.jump.height()
    }

    pub fn jump(&self) -> Jump {
        self.jump
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn timers(&self) -> &RunTimers {
        &self.timers
    }

    /// Begin the first run
    pub fn start(&mut self, now: f64) {
        self.clear_run(now);
        self.started = true;
    }

    /// Begin a new run after game over; `started` stays set
    pub fn reset(&mut self, now: f64) {
        self.clear_run(now);
    }

    fn clear_run(&mut self, now: f64) {
        self.over = false;
        self.score = 0;
        self.jump = Jump::Grounded;
        self.obstacles.clear();
        self.timers = RunTimers::starting_at(now);
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            score: self.score,
            started: self.started,
            over: self.over,
            jump_height: self.jump_height(),
            obstacles: self.obstacles.clone(),
        }
    }
}
