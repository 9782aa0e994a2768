//! Contract between the window runtime and the game.
//!
//! The runtime owns the event loop, window and GPU; the game implements
//! [`App`] and sees one [`FrameCtx`] per frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
