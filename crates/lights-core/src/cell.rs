use std::fmt;

/// Light status of a single cell.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Status {
    #[default]
    Off,
    On,
}

impl Status {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Status::Off => Status::On,
            Status::On => Status::Off,
        }
    }

    #[inline]
    pub fn is_on(self) -> bool {
        self == Status::On
    }

    /// `0` for off, `1` for on. Used by the parity sums.
    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Status::Off => 0,
            Status::On => 1,
        }
    }
}

impl From<bool> for Status {
    #[inline]
    fn from(on: bool) -> Self {
        if on { Status::On } else { Status::Off }
    }
}

/// One board cell. Position is fixed; only `status` changes during play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub status: Status,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize, status: Status) -> Self {
        Self { row, col, status }
    }

    #[inline]
    pub(crate) fn flip(&mut self) {
        self.status = self.status.flipped();
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_on() { "#" } else { "." })
    }
}
