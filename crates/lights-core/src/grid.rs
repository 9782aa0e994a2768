use std::fmt;

use crate::cell::{Cell, Status};

/// Board side length.
pub const SIZE: usize = 5;

/// Rows (resp. columns) summed by the parity check.
const PARITY_LINES: [usize; 3] = [0, 2, 4];

/// Positions along a parity line; the middle one is skipped.
const PARITY_STOPS: [usize; 4] = [0, 1, 3, 4];

/// The two sums that decide whether a 5x5 board can be switched off.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Parity {
    /// Lit cells on rows 0, 2, 4 excluding the middle column.
    pub rows: u32,
    /// Lit cells on columns 0, 2, 4 excluding the middle row.
    pub cols: u32,
}

impl Parity {
    #[inline]
    pub fn is_even(self) -> bool {
        self.rows % 2 == 0 && self.cols % 2 == 0
    }
}

/// 5x5 light board, row-major.
///
/// Statuses change only through [`Grid::toggle`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    cells: [[Cell; SIZE]; SIZE],
}

impl Grid {
    /// Builds a grid by asking `status` for every `(row, col)` in row-major order.
    pub fn from_fn(mut status: impl FnMut(usize, usize) -> Status) -> Self {
        let cells = std::array::from_fn(|row| {
            std::array::from_fn(|col| Cell::new(row, col, status(row, col)))
        });
        Self { cells }
    }

    /// All lights off.
    pub fn solved() -> Self {
        Self::from_fn(|_, _| Status::Off)
    }

    /// Grid with exactly the listed cells lit.
    pub fn with_lit(lit: &[(usize, usize)]) -> Self {
        Self::from_fn(|row, col| Status::from(lit.contains(&(row, col))))
    }

    #[inline]
    pub fn status(&self, row: usize, col: usize) -> Status {
        self.cells[row][col].status
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Coordinates of lit cells in row-major order.
    pub fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells().filter(|c| c.status.is_on()).map(|c| (c.row, c.col))
    }

    pub fn lit_count(&self) -> usize {
        self.lit().count()
    }

    /// Flips `(row, col)` and its in-bounds orthogonal neighbours.
    ///
    /// Returns the number of cells flipped: 3 at a corner, 4 on an edge, 5 inside.
    ///
    /// # Panics
    /// Panics if `row` or `col` is outside `0..SIZE`; callers only pass
    /// coordinates produced by hit-testing.
    pub fn toggle(&mut self, row: usize, col: usize) -> usize {
        assert!(
            row < SIZE && col < SIZE,
            "toggle out of range: ({row}, {col})"
        );

        let mut flipped = 0;
        for (r, c) in cross(row, col) {
            self.cells[r][c].flip();
            flipped += 1;
        }
        flipped
    }

    /// True when every light is off.
    pub fn is_solved(&self) -> bool {
        self.cells().all(|c| !c.status.is_on())
    }

    pub fn parity(&self) -> Parity {
        let mut rows = 0;
        let mut cols = 0;
        for line in PARITY_LINES {
            for stop in PARITY_STOPS {
                rows += self.status(line, stop).bit();
                cols += self.status(stop, line).bit();
            }
        }
        Parity { rows, cols }
    }

    /// Whether some sequence of toggles switches every light off.
    #[inline]
    pub fn is_solvable(&self) -> bool {
        self.parity().is_even()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::solved()
    }
}

/// `(row, col)` followed by its orthogonal neighbours that lie on the board.
fn cross(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = row.checked_sub(1).map(|r| (r, col));
    let down = (row + 1 < SIZE).then_some((row + 1, col));
    let left = col.checked_sub(1).map(|c| (row, c));
    let right = (col + 1 < SIZE).then_some((row, col + 1));

    std::iter::once((row, col)).chain([up, down, left, right].into_iter().flatten())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.status)?;
            }
        }
        Ok(())
    }
}
