/// Drawable size in logical pixels, uploaded to the renderers' viewport uniform.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size with both axes clamped to at least one pixel, safe to divide by.
    #[inline]
    pub fn clamped(self) -> [f32; 2] {
        [self.width.max(1.0), self.height.max(1.0)]
    }
}
