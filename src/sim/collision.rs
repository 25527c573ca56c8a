//! Character-versus-obstacle collision
//!
//! The character has a fixed horizontal span. Vertically it only clears an
//! obstacle once its rise is strictly above that obstacle's height: being in
//! the air at or below the top of a cactus still counts as a hit.

use super::state::Obstacle;
use crate::consts::{DINO_WIDTH, DINO_X};

/// The character's hitbox for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub width: f32,
    /// Upward offset from the ground (0 = grounded)
    pub rise: f32,
}

impl Hitbox {
    pub fn at_rise(rise: f32) -> Self {
        Self {
            x: DINO_X,
            width: DINO_WIDTH,
            rise,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn overlaps_horizontally(&self, obstacle: &Obstacle) -> bool {
        obstacle.x < self.right() && obstacle.right() > self.x
    }

    pub fn overlaps_vertically(&self, obstacle: &Obstacle) -> bool {
        self.rise >= 0.0 && self.rise <= obstacle.height
    }

    pub fn hits(&self, obstacle: &Obstacle) -> bool {
        self.overlaps_horizontally(obstacle) && self.overlaps_vertically(obstacle)
    }
}

/// Index of the first obstacle the character touches, if any
pub fn first_hit(hitbox: &Hitbox, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|obs| hitbox.hits(obs))
}
