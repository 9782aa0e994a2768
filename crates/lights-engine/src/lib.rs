//! Lights Out engine crate.
//!
//! Platform and GPU plumbing for the game: a single-window winit runtime,
//! per-frame input, a frame clock, logging setup and two instanced wgpu
//! renderers (solid quads and glyph-atlas text) fed from a [`scene::DrawList`].

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
