use rand::Rng;

use crate::cell::Status;
use crate::grid::Grid;

/// Random board generator that only returns solvable boards.
///
/// Each attempt lights every cell with probability 1/2, then keeps the board
/// only if both parity sums are even. Roughly one attempt in four succeeds.
///
/// The random source is passed in, so tests use a seeded `StdRng` while the
/// game seeds from the OS.
#[derive(Debug, Copy, Clone)]
pub struct PuzzleGenerator {
    allow_solved: bool,
}

impl PuzzleGenerator {
    pub fn new() -> Self {
        Self { allow_solved: true }
    }

    /// Whether an all-off board may be returned. Defaults to `true`.
    pub fn allow_solved(mut self, v: bool) -> Self {
        self.allow_solved = v;
        self
    }

    /// Draws boards until one is accepted. No attempt limit.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        loop {
            if let Some(grid) = self.try_generate(&mut *rng, u32::MAX) {
                return grid;
            }
        }
    }

    /// Like [`generate`](Self::generate) but gives up after `max_attempts` draws.
    pub fn try_generate<R: Rng + ?Sized>(&self, rng: &mut R, max_attempts: u32) -> Option<Grid> {
        for attempt in 1..=max_attempts {
            let grid = random_grid(&mut *rng);
            if self.accepts(&grid) {
                log::debug!(
                    "generated board after {attempt} attempt(s), {} lit",
                    grid.lit_count()
                );
                return Some(grid);
            }
        }
        None
    }

    fn accepts(&self, grid: &Grid) -> bool {
        grid.is_solvable() && (self.allow_solved || !grid.is_solved())
    }
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One unconstrained draw: every cell is an independent fair coin flip.
pub fn random_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    Grid::from_fn(|_, _| Status::from(rng.random_bool(0.5)))
}
