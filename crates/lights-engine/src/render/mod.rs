//! GPU renderers.
//!
//! Each renderer owns its pipeline and buffers, creates them lazily on first
//! use and rebuilds the pipeline if the surface format changes. Geometry is
//! recorded in logical pixels (top-left origin, +Y down); the vertex shaders
//! map it to NDC through a viewport uniform.

mod common;
mod ctx;
mod quad;
mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
pub use text::TextRenderer;
