use pathfix_kinematics::Waypoint;

/// Represents a cell of the occupancy grid by row and column index.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// The row index in the grid.
    pub row: usize,
    /// The column index in the grid.
    pub col: usize,
}

impl GridCell {
    /// Creates a new `GridCell`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the cell displaced by `(d_row, d_col)`, or `None` if either
    /// index would become negative or overflow.
    #[must_use]
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for GridCell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl Waypoint for GridCell {
    fn row(&self) -> i64 {
        self.row as i64
    }

    fn col(&self) -> i64 {
        self.col as i64
    }
}
