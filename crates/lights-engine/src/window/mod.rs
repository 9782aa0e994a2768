//! Window and event loop.
//!
//! Owns the winit event loop and a single window, binds the GPU surface to it
//! and drives the [`App`](crate::core::App) once per redraw.

mod runtime;
mod translate;

pub use runtime::{Runtime, RuntimeConfig};
