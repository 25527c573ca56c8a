//! Shape generation for the play-field
//!
//! Field coordinates: x grows right from the left edge, y grows up from the
//! bottom of the canvas. The ground line sits at [`GROUND_Y`].

use glam::Vec2;

use super::vertex::{Palette, Vertex};
use crate::consts::{DINO_HEIGHT, DINO_WIDTH, DINO_X, FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{GameState, Obstacle};

/// Height of the ground line above the canvas bottom
pub const GROUND_Y: f32 = 40.0;
/// Thickness of the ground line
pub const GROUND_THICKNESS: f32 = 2.0;

/// Vertices per axis-aligned rectangle
pub const RECT_VERTICES: usize = 6;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; RECT_VERTICES] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Character body, raised by the current jump height
pub fn dino(jump_height: f32, color: [f32; 4]) -> [Vertex; RECT_VERTICES] {
    rect(
        Vec2::new(DINO_X, GROUND_Y + jump_height),
        Vec2::new(DINO_WIDTH, DINO_HEIGHT),
        color,
    )
}

/// A cactus standing on the ground
pub fn cactus(obstacle: &Obstacle, color: [f32; 4]) -> [Vertex; RECT_VERTICES] {
    rect(
        Vec2::new(obstacle.x, GROUND_Y),
        Vec2::new(obstacle.width, obstacle.height),
        color,
    )
}

/// Whether any part of the obstacle is inside the visible field
pub fn is_visible(obstacle: &Obstacle) -> bool {
    obstacle.right() > 0.0 && obstacle.x < FIELD_WIDTH
}

/// Build the whole frame: ground, visible cacti, then the character on top
pub fn scene(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let obstacles = state.obstacles();
    let mut vertices = Vec::with_capacity((obstacles.len() + 2) * RECT_VERTICES);

    vertices.extend(rect(
        Vec2::new(0.0, GROUND_Y - GROUND_THICKNESS),
        Vec2::new(FIELD_WIDTH, GROUND_THICKNESS),
        palette.ground,
    ));

    for obstacle in obstacles.iter().filter(|o| is_visible(o)) {
        vertices.extend(cactus(obstacle, palette.cactus));
    }

    let color = if state.over() {
        palette.dino_hit
    } else {
        palette.dino
    };
    vertices.extend(dino(state.jump_height(), color));

    vertices
}

/// Map field coordinates onto normalized device coordinates (-1..1)
pub fn field_to_ndc(p: Vec2) -> Vec2 {
    Vec2::new(p.x / FIELD_WIDTH * 2.0 - 1.0, p.y / FIELD_HEIGHT * 2.0 - 1.0)
}
