//! Geometry in logical pixels.
//!
//! Origin top-left, +X right, +Y down. Renderers map to NDC in their vertex
//! shaders through a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
