use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Solid axis-aligned quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadCmd {
    pub rect: Rect,
    pub color: Color,
}

/// One run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Pixel size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block.
    pub origin: Vec2,
    /// Wrapping width. `None` = single line.
    pub max_width: Option<f32>,
}

impl TextCmd {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color,
            origin,
            max_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
    Text(TextCmd),
}
