//! Input subsystem.
//!
//! Platform-agnostic: the window runtime translates winit events into
//! [`InputEvent`]s, [`InputState`] keeps what is held right now and
//! [`InputFrame`] collects this frame's press/release edges.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
