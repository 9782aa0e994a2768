use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lights_engine::text::{FontId, FontSystem};

/// Searched in order when no font path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads the configured font, falling back to the first usable system font.
///
/// Returns `None` when nothing loads; the game then runs without text.
pub fn load(fonts: &mut FontSystem, configured: Option<&Path>) -> Option<FontId> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

    let id = load_first(fonts, candidates);
    if id.is_none() {
        log::warn!("no usable font found; text will not be drawn");
    }
    id
}

fn load_first(fonts: &mut FontSystem, candidates: impl IntoIterator<Item = PathBuf>) -> Option<FontId> {
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_file(fonts, &path) {
            Ok(id) => {
                log::info!("loaded font {}", path.display());
                return Some(id);
            }
            Err(err) => log::warn!("{err:#}"),
        }
    }
    None
}

fn load_file(fonts: &mut FontSystem, path: &Path) -> Result<FontId> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    let id = fonts
        .load_font(&bytes)
        .with_context(|| format!("failed to parse font {}", path.display()))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_skipped() {
        let mut fonts = FontSystem::new();
        let id = load_first(
            &mut fonts,
            [PathBuf::from("/nonexistent/lights-out/a.ttf"), PathBuf::from("/nonexistent/b.otf")],
        );
        assert!(id.is_none());
        assert!(fonts.is_empty());
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("lights-out-bad-font-{}.ttf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();

        let mut fonts = FontSystem::new();
        let err = load_file(&mut fonts, &path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse font"));
        assert!(load_first(&mut fonts, [path.clone()]).is_none());
        assert!(fonts.is_empty());

        std::fs::remove_file(&path).unwrap();
    }
}
