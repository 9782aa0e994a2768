use crate::grid::SIZE;

/// Point in board layout space (logical pixels, origin top-left, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box described by its centre and full extent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub center: Point,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[inline]
    pub const fn square(center: Point, side: f32) -> Self {
        Self { center, width: side, height: side }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.center.x - self.width * 0.5
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.center.x + self.width * 0.5
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.center.y - self.height * 0.5
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.center.y + self.height * 0.5
    }

    /// Closed containment: a point on any edge is inside.
    ///
    /// Two boxes that share an edge therefore both contain the points on it.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Same centre, grown by `amount` in width and height.
    #[inline]
    pub fn grown(self, amount: f32) -> Self {
        Self {
            center: self.center,
            width: self.width + amount,
            height: self.height + amount,
        }
    }
}

/// Placement of the 5x5 board in layout space.
///
/// Cell `(0, 0)` is centred on `first_center`; each following row/column is
/// offset by `cell_side + gap`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardLayout {
    pub first_center: Point,
    pub cell_side: f32,
    pub gap: f32,
    /// Extra width of the hover outline drawn behind a cell.
    pub highlight_border: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            first_center: Point::new(100.0, 100.0),
            cell_side: 100.0,
            gap: 25.0,
            highlight_border: 10.0,
        }
    }
}

impl BoardLayout {
    #[inline]
    fn pitch(&self) -> f32 {
        self.cell_side + self.gap
    }

    pub fn cell_bounds(&self, row: usize, col: usize) -> Bounds {
        let center = Point::new(
            self.first_center.x + self.pitch() * col as f32,
            self.first_center.y + self.pitch() * row as f32,
        );
        Bounds::square(center, self.cell_side)
    }

    pub fn highlight_bounds(&self, row: usize, col: usize) -> Bounds {
        self.cell_bounds(row, col).grown(self.highlight_border)
    }

    /// Cells whose bounds contain `p`, in row-major order.
    ///
    /// With a positive gap this yields at most one cell. A zero or negative
    /// gap makes boxes touch or overlap, and a boundary point then hits every
    /// box it lies on.
    pub fn hits(&self, p: Point) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.cell_bounds(row, col).contains(p))
    }
}
