//! WebGPU rendering module
//!
//! A flat-colored triangle list rebuilt from `GameState` every frame. The
//! renderer only reads simulation state.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Palette;
