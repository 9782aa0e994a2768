use std::time::Instant;

use crate::geometry::Point;

/// Input sample for one frame, already mapped into board layout space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInput {
    /// Pointer position; `None` when the pointer is outside the window.
    pub pointer: Option<Point>,
    /// Primary button currently held.
    pub primary_down: bool,
    /// Begin key pressed this frame.
    pub begin_requested: bool,
    /// Monotonic timestamp of the frame.
    pub now: Instant,
}

impl FrameInput {
    /// No pointer, no buttons, no keys.
    pub fn idle(now: Instant) -> Self {
        Self {
            pointer: None,
            primary_down: false,
            begin_requested: false,
            now,
        }
    }
}

/// Falling-edge detector for a held button.
///
/// Reports a release on the first sample that is up after a sample that was
/// down, so a click registers once no matter how many frames it was held.
#[derive(Debug, Copy, Clone, Default)]
pub struct ReleaseDetector {
    was_down: bool,
}

impl ReleaseDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds this frame's button state; returns `true` on a release.
    pub fn sample(&mut self, down: bool) -> bool {
        let released = self.was_down && !down;
        self.was_down = down;
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_fires_once_per_click() {
        let mut d = ReleaseDetector::new();
        let samples = [false, true, true, true, false, false, true, false];
        let fired: Vec<bool> = samples.iter().map(|&s| d.sample(s)).collect();
        assert_eq!(fired, vec![false, false, false, false, true, false, false, true]);
    }

    #[test]
    fn idle_input_has_nothing_pressed() {
        let input = FrameInput::idle(Instant::now());
        assert!(input.pointer.is_none());
        assert!(!input.primary_down);
        assert!(!input.begin_requested);
    }
}
