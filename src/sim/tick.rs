//! Per-frame simulation step and action handling
//!
//! [`tick`] is the whole update engine: land timed-out jumps, spawn, scroll,
//! cull, collide, score. [`on_action`] interprets the single input the game
//! recognises.

use super::collision::{Hitbox, first_hit};
use super::rng::RandomSource;
use super::spawn::{SpawnCadence, run_spawner};
use super::state::GameState;
use crate::consts::OBSTACLE_SPEED;

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time of this frame (ms)
    pub now: f64,
    /// The presentation layer is mounted. When false, collisions are not
    /// checked this frame.
    pub surface_ready: bool,
    pub cadence: SpawnCadence,
}

impl TickInput {
    pub fn at(now: f64) -> Self {
        Self {
            now,
            surface_ready: true,
            cadence: SpawnCadence::default(),
        }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame was simulated (run live at entry)
    pub advanced: bool,
    /// A timed-out jump snapped back to the ground
    pub landed: bool,
    /// Obstacles added by the spawner
    pub spawned: usize,
    /// Obstacles dropped off the left edge
    pub culled: usize,
    /// The run ended this frame
    pub collided: bool,
}

/// Advance the game state by one frame
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
) -> FrameReport {
    let mut report = FrameReport::default();
    if !state.is_active() {
        return report;
    }
    report.advanced = true;
    let now = input.now;

    if state.jump.update(now) {
        report.landed = true;
        log::debug!("Landed at score {}", state.score);
    }

    // Work on a copy so a collision leaves the previous frame's field intact
    let mut obstacles = state.obstacles.clone();
    report.spawned = run_spawner(&mut obstacles, &mut state.timers, now, input.cadence, rng);

    for obstacle in &mut obstacles {
        obstacle.x -= OBSTACLE_SPEED;
    }
    let before = obstacles.len();
    obstacles.retain(|obs| !obs.is_off_screen());
    report.culled = before - obstacles.len();

    state.timers.last_frame = Some(now);

    if input.surface_ready {
        let hitbox = Hitbox::at_rise(state.jump_height());
        if let Some(idx) = first_hit(&hitbox, &obstacles) {
            let obs = &obstacles[idx];
            log::info!(
                "Game over: hit obstacle at x={} (height {}) with rise {}, score {}",
                obs.x,
                obs.height,
                hitbox.rise,
                state.score
            );
            state.over = true;
            report.collided = true;
            return report;
        }
    }

    state.obstacles = obstacles;
    state.score += 1;
    report
}

/// Which lifecycle path an action took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// First run began
    Started,
    /// A finished run was replaced by a fresh one
    Restarted,
    /// Jump press; `changed` is false when it fell outside the hang-time window
    /// or the jump was already at full height
    Jumped { changed: bool },
}

/// Interpret the action input against the current state
pub fn on_action(state: &mut GameState, now: f64) -> ActionOutcome {
    if !state.started {
        state.start(now);
        log::info!("Run started");
        ActionOutcome::Started
    } else if state.over {
        let final_score = state.score;
        state.reset(now);
        log::info!("Run restarted (previous score {})", final_score);
        ActionOutcome::Restarted
    } else {
        let changed = state.jump.press(now);
        if changed {
            log::debug!("Jump height now {}", state.jump_height());
        }
        ActionOutcome::Jumped { changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::jump::Jump;
    use crate::sim::rng::SequenceSource;
    use crate::sim::state::Obstacle;

    /// Started state with no spawns possible for a while
    fn running_state() -> GameState {
        let mut state = GameState::new();
        state.start(0.0);
        state
    }

    fn quiet_rng() -> SequenceSource {
        SequenceSource::new(Vec::<f64>::new())
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new();
        let report = tick(&mut state, &TickInput::at(5000.0), &mut quiet_rng());
        assert!(!report.advanced);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_score_increments_each_frame() {
        let mut state = running_state();
        let mut rng = quiet_rng();
        for frame in 1..=10 {
            tick(&mut state, &TickInput::at(frame as f64 * 16.0), &mut rng);
            assert_eq!(state.score(), frame);
        }
    }

    #[test]
    fn test_obstacles_scroll_and_cull() {
        let mut state = running_state();
        state.obstacles = vec![Obstacle::new(400.0, 20), Obstacle::new(-44.0, 20)];

        let report = tick(&mut state, &TickInput::at(16.0), &mut quiet_rng());
        assert_eq!(report.culled, 0);
        assert_eq!(state.obstacles()[0].x, 395.0);
        assert_eq!(state.obstacles()[1].x, -49.0);

        let report = tick(&mut state, &TickInput::at(32.0), &mut quiet_rng());
        assert_eq!(report.culled, 1);
        assert_eq!(state.obstacles(), &[Obstacle::new(390.0, 20)]);
    }

    #[test]
    fn test_grounded_collision_ends_run() {
        let mut state = running_state();
        state.score = 10;
        // Lands at x=60 after the move
        state.obstacles = vec![Obstacle::new(65.0, 30)];

        let report = tick(&mut state, &TickInput::at(16.0), &mut quiet_rng());
        assert!(report.collided);
        assert!(state.over());
        assert_eq!(state.score(), 10);
        // Field frozen as it was before the frame
        assert_eq!(state.obstacles(), &[Obstacle::new(65.0, 30)]);

        // Nothing moves afterwards
        let report = tick(&mut state, &TickInput::at(32.0), &mut quiet_rng());
        assert!(!report.advanced);
        assert_eq!(state.score(), 10);
        assert_eq!(state.obstacles()[0].x, 65.0);
    }

    #[test]
    fn test_high_jump_avoids_collision() {
        let mut state = running_state();
        state.jump = Jump::Airborne {
            started_at: 0.0,
            height: 200.0,
        };
        state.obstacles = vec![Obstacle::new(65.0, 30)];

        let report = tick(&mut state, &TickInput::at(16.0), &mut quiet_rng());
        assert!(!report.collided);
        assert_eq!(state.score(), 1);
        assert_eq!(state.obstacles()[0].x, 60.0);
    }

    #[test]
    fn test_low_jump_still_collides() {
        let mut state = running_state();
        state.jump = Jump::Airborne {
            started_at: 0.0,
            height: 80.0,
        };
        state.obstacles = vec![Obstacle::new(65.0, 59)];
        assert!(!tick(&mut state, &TickInput::at(16.0), &mut quiet_rng()).collided);

        let mut state = running_state();
        state.jump = Jump::Airborne {
            started_at: 0.0,
            height: 40.0,
        };
        state.obstacles = vec![Obstacle::new(65.0, 59)];
        assert!(tick(&mut state, &TickInput::at(16.0), &mut quiet_rng()).collided);
    }

    #[test]
    fn test_collision_skipped_without_surface() {
        let mut state = running_state();
        state.obstacles = vec![Obstacle::new(65.0, 30)];
        let input = TickInput {
            now: 16.0,
            surface_ready: false,
            ..Default::default()
        };

        let report = tick(&mut state, &input, &mut quiet_rng());
        assert!(!report.collided);
        assert!(!state.over());
        assert_eq!(state.score(), 1);

        // Next mounted frame catches it
        assert!(tick(&mut state, &TickInput::at(32.0), &mut quiet_rng()).collided);
    }

    #[test]
    fn test_jump_times_out_on_frame() {
        let mut state = running_state();
        assert_eq!(on_action(&mut state, 100.0), ActionOutcome::Jumped { changed: true });

        let report = tick(&mut state, &TickInput::at(1099.0), &mut quiet_rng());
        assert!(!report.landed);
        assert!(state.is_jumping());

        let report = tick(&mut state, &TickInput::at(1100.0), &mut quiet_rng());
        assert!(report.landed);
        assert!(!state.is_jumping());
        assert_eq!(state.jump_height(), 0.0);
        // Landing frame still scores
        assert_eq!(state.score(), 2);
    }

    #[test]
    fn test_first_batch_after_delay() {
        let mut state = running_state();
        // batch size 0.5 -> 2, heights 0.25 -> 30, 0.75 -> 50
        let mut rng = SequenceSource::new([0.5, 0.25, 0.75]);

        let report = tick(&mut state, &TickInput::at(2000.0), &mut rng);
        assert_eq!(report.spawned, 0);

        let report = tick(&mut state, &TickInput::at(2001.0), &mut rng);
        assert_eq!(report.spawned, 2);
        // Spawned then scrolled once in the same frame
        assert_eq!(
            state.obstacles(),
            &[Obstacle::new(775.0, 30), Obstacle::new(975.0, 50)]
        );
        assert_eq!(state.timers().last_spawn, 2001.0);
    }

    #[test]
    fn test_action_dispatch() {
        let mut state = GameState::new();
        assert_eq!(on_action(&mut state, 0.0), ActionOutcome::Started);
        assert!(state.is_active());

        assert_eq!(on_action(&mut state, 10.0), ActionOutcome::Jumped { changed: true });
        assert_eq!(state.jump_height(), 80.0);
        assert_eq!(on_action(&mut state, 20.0), ActionOutcome::Jumped { changed: true });
        assert_eq!(state.jump_height(), 120.0);

        state.over = true;
        state.obstacles.push(Obstacle::new(70.0, 30));
        assert_eq!(on_action(&mut state, 3000.0), ActionOutcome::Restarted);
        assert!(state.started());
        assert!(!state.over());
        assert_eq!(state.score(), 0);
        assert!(state.obstacles().is_empty());
        assert!(!state.is_jumping());
        assert_eq!(state.timers().run_start, 3000.0);
    }

    #[test]
    fn test_determinism() {
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let mut state1 = running_state();
        let mut state2 = running_state();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for frame in 1..=600 {
            let input = TickInput {
                now: frame as f64 * 16.0,
                surface_ready: false,
                ..Default::default()
            };
            tick(&mut state1, &input, &mut rng1);
            tick(&mut state2, &input, &mut rng2);
        }

        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.obstacles(), state2.obstacles());
        assert_eq!(state1.timers().last_spawn, state2.timers().last_spawn);
        assert!(state1.timers().last_spawn > 2000.0);
    }
}
