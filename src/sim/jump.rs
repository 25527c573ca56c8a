//! Jump state machine
//!
//! A jump is a fixed-height hop, not a physics arc. The first press lifts the
//! character to [`JUMP_INITIAL_HEIGHT`], presses inside the hang-time window add
//! [`JUMP_BOOST`] up to [`JUMP_MAX_HEIGHT`], and once the window closes the
//! character snaps back to the ground.

use serde::{Deserialize, Serialize};

use crate::consts::{JUMP_BOOST, JUMP_DURATION_MS, JUMP_INITIAL_HEIGHT, JUMP_MAX_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Jump {
    #[default]
    Grounded,
    /// In the air since `started_at` (ms), at `height` above the ground
    Airborne { started_at: f64, height: f32 },
}

impl Jump {
    pub fn is_jumping(&self) -> bool {
        matches!(self, Jump::Airborne { .. })
    }

    /// Vertical offset of the character (0 when grounded)
    pub fn height(&self) -> f32 {
        match *self {
            Jump::Grounded => 0.0,
            Jump::Airborne { height, .. } => height.min(JUMP_MAX_HEIGHT),
        }
    }

    /// Handle a jump press at `now`
    ///
    /// Returns true if the press changed the jump.
    pub fn press(&mut self, now: f64) -> bool {
        match self {
            Jump::Grounded => {
                *self = Jump::Airborne {
                    started_at: now,
                    height: JUMP_INITIAL_HEIGHT,
                };
                true
            }
            Jump::Airborne { started_at, height } => {
                if now - *started_at < JUMP_DURATION_MS {
                    let boosted = (*height + JUMP_BOOST).min(JUMP_MAX_HEIGHT);
                    let changed = boosted != *height;
                    *height = boosted;
                    changed
                } else {
                    // Window closed; the next frame lands us
                    false
                }
            }
        }
    }

    /// Per-frame timeout check. Returns true if the character just landed.
    pub fn update(&mut self, now: f64) -> bool {
        if let Jump::Airborne { started_at, .. } = *self {
            if now - started_at >= JUMP_DURATION_MS {
                *self = Jump::Grounded;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_from_ground() {
        let mut jump = Jump::default();
        assert!(!jump.is_jumping());
        assert_eq!(jump.height(), 0.0);

        assert!(jump.press(100.0));
        assert!(jump.is_jumping());
        assert_eq!(jump.height(), 80.0);
    }

    #[test]
    fn test_boost_clamps_at_max() {
        let mut jump = Jump::default();
        jump.press(0.0);
        let heights: Vec<f32> = (1..=6)
            .map(|i| {
                jump.press(i as f64 * 100.0);
                jump.height()
            })
            .collect();
        assert_eq!(heights, vec![120.0, 160.0, 200.0, 200.0, 200.0, 200.0]);
    }

    #[test]
    fn test_press_after_window_is_noop() {
        let mut jump = Jump::default();
        jump.press(0.0);
        assert!(!jump.press(1000.0));
        assert_eq!(jump.height(), 80.0);
        assert!(jump.is_jumping());
    }

    #[test]
    fn test_timeout_forces_grounded() {
        let mut jump = Jump::default();
        jump.press(500.0);
        jump.press(600.0);
        jump.press(700.0);
        jump.press(800.0);
        assert_eq!(jump.height(), 200.0);

        assert!(!jump.update(1499.0));
        assert!(jump.is_jumping());

        assert!(jump.update(1500.0));
        assert_eq!(jump, Jump::Grounded);
        assert_eq!(jump.height(), 0.0);

        // Already grounded
        assert!(!jump.update(5000.0));
    }

    #[test]
    fn test_height_reads_clamped() {
        let jump = Jump::Airborne {
            started_at: 0.0,
            height: 999.0,
        };
        assert_eq!(jump.height(), 200.0);
    }
}
