use std::time::Duration;

use crate::cell::Status;
use crate::geometry::{BoardLayout, Bounds, Point};
use crate::grid::{Grid, SIZE};
use crate::state::GameState;

/// What the renderer needs to draw one cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub status: Status,
    pub bounds: Bounds,
    /// Outline drawn behind the cell while it is hovered.
    pub highlight: Bounds,
    pub hovered: bool,
}

/// Read-only frame snapshot of a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub cells: [[CellView; SIZE]; SIZE],
    pub state: GameState,
    pub moves: u32,
    pub elapsed: Duration,
}

impl SessionView {
    pub(crate) fn new(
        grid: &Grid,
        layout: &BoardLayout,
        hover: Option<Point>,
        state: GameState,
        moves: u32,
        elapsed: Duration,
    ) -> Self {
        let cells = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let bounds = layout.cell_bounds(row, col);
                CellView {
                    row,
                    col,
                    status: grid.status(row, col),
                    bounds,
                    highlight: layout.highlight_bounds(row, col),
                    hovered: hover.is_some_and(|p| bounds.contains(p)),
                }
            })
        });

        Self { cells, state, moves, elapsed }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &CellView> {
        self.cells.iter().flatten()
    }

    /// Elapsed play time in whole seconds, as shown on screen.
    #[inline]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}
