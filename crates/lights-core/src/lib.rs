//! Lights Out puzzle engine.
//!
//! - [`Grid`]: 5x5 board with cross-shaped toggle propagation and win check
//! - [`PuzzleGenerator`]: random boards filtered to the solvable ones
//! - [`StateMachine`]: one-way `Start -> Playing -> Won` screen flow
//! - [`Session`]: owns one game and advances it from per-frame input
//!
//! Nothing here touches the GPU or the window. The frame loop converts its
//! platform input into a [`FrameInput`] and draws from a [`SessionView`].

mod cell;
mod generator;
mod geometry;
mod grid;
mod input;
mod session;
mod state;
mod view;

pub use cell::{Cell, Status};
pub use generator::{random_grid, PuzzleGenerator};
pub use geometry::{BoardLayout, Bounds, Point};
pub use grid::{Grid, Parity, SIZE};
pub use input::{FrameInput, ReleaseDetector};
pub use session::{Session, SessionEvent};
pub use state::{GameState, StateMachine};
pub use view::{CellView, SessionView};
