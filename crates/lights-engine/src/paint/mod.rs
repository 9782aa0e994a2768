//! Color model shared by the scene and the renderers.

mod color;

pub use color::Color;
