use wgpu::{CompositeAlphaMode, SurfaceError, TextureFormat};

/// What the frame loop should do after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame should succeed.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Unrecoverable (out of memory); shut down.
    Fatal,
}

impl SurfaceErrorAction {
    pub(crate) fn for_error(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

/// Picks an sRGB format when asked and available, else the surface's first.
pub(crate) fn choose_surface_format(
    formats: &[TextureFormat],
    prefer_srgb: bool,
) -> Option<TextureFormat> {
    const SRGB: [TextureFormat; 2] = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb];

    prefer_srgb
        .then(|| SRGB.into_iter().find(|f| formats.contains(f)))
        .flatten()
        .or_else(|| formats.first().copied())
}

/// Honors `requested` when supported, else the surface's first mode.
pub(crate) fn choose_alpha_mode(
    supported: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}
