use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{ButtonState, InputEvent, Key, MouseButton};

/// Maps the winit events the input layer cares about; everything else is `None`.
pub(super) fn translate_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(window, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button)?,
            state: map_state(*state),
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

/// Back/forward buttons are dropped.
fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Other(v) => Some(MouseButton::Other(v)),
        WinitMouseButton::Back | WinitMouseButton::Forward => None,
    }
}

fn map_key(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        other => letter(other)
            .map(Key::Letter)
            .or_else(|| digit(other).map(Key::Digit))
            .unwrap_or(Key::Unknown(other as u32)),
    }
}

fn letter(code: KeyCode) -> Option<char> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    LETTERS
        .iter()
        .position(|&k| k == code)
        .map(|i| (b'A' + i as u8) as char)
}

fn digit(code: KeyCode) -> Option<u8> {
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    DIGITS.iter().position(|&k| k == code).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_uppercase() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyS)), Key::Letter('S'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Key::Letter('A'));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyZ)), Key::Letter('Z'));
    }

    #[test]
    fn control_and_digit_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit7)), Key::Digit(7));
    }

    #[test]
    fn unmapped_keys_are_unknown() {
        assert!(matches!(
            map_key(PhysicalKey::Code(KeyCode::F5)),
            Key::Unknown(_)
        ));
    }

    #[test]
    fn side_buttons_are_dropped() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_mouse_button(WinitMouseButton::Back), None);
    }
}
