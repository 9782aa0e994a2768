use super::ctx::FrameCtx;

/// Returned from app callbacks to keep running or shut down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Implemented by the game.
pub trait App {
    /// Called once per frame after the frame's input has been applied.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called when the window is asked to close. Returning `Continue` keeps
    /// it open.
    fn on_close_requested(&mut self) -> AppControl {
        AppControl::Exit
    }
}
