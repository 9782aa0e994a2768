use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// What is held right now for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state and records any edge into `frame`.
    ///
    /// Repeats of an already-held key produce no new edge.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases delivered to another window would leave these stuck.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(*button) {
                        frame.buttons_pressed.insert(*button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(button) {
                        frame.buttons_released.insert(*button);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    fn button(state: ButtonState) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
        }
    }

    #[test]
    fn key_repeat_is_a_single_press_edge() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Letter('S'), ButtonState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Letter('S'), ButtonState::Pressed, true));
        assert!(frame.key_pressed(Key::Letter('S')));
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        state.apply_event(&mut frame, key(Key::Letter('S'), ButtonState::Pressed, true));
        assert!(frame.keys_pressed.is_empty());
        assert!(state.keys_down.contains(&Key::Letter('S')));
    }

    #[test]
    fn button_release_edge_and_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(ButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));

        frame.clear();
        state.apply_event(&mut frame, button(ButtonState::Released));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.button_released(MouseButton::Left));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(ButtonState::Released));
        assert!(frame.buttons_released.is_empty());
    }

    #[test]
    fn focus_loss_drops_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, button(ButtonState::Pressed));
        state.apply_event(&mut frame, key(Key::Escape, ButtonState::Pressed, false));

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.focused);
        assert!(state.buttons_down.is_empty());
        assert!(state.keys_down.is_empty());
    }

    #[test]
    fn pointer_tracks_moves_and_leaving() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 12.5, y: 40.0 });
        assert_eq!(state.pointer_pos, Some((12.5, 40.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
