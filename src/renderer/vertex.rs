//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub ground: [f32; 4],
    pub dino: [f32; 4],
    /// Character tint once the run has ended
    pub dino_hit: [f32; 4],
    pub cactus: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        background: [0.96, 0.96, 0.94, 1.0],
        ground: [0.33, 0.33, 0.33, 1.0],
        dino: [0.33, 0.33, 0.33, 1.0],
        dino_hit: [0.8, 0.2, 0.2, 1.0],
        cactus: [0.2, 0.55, 0.25, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [1.0, 1.0, 1.0, 1.0],
        ground: [0.0, 0.0, 0.0, 1.0],
        dino: [0.0, 0.0, 0.0, 1.0],
        dino_hit: [0.9, 0.0, 0.0, 1.0],
        cactus: [0.0, 0.35, 0.0, 1.0],
    };

    pub fn for_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}
