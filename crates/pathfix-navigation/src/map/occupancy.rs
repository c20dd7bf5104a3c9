#![warn(missing_docs)]

use super::GridCell;
use crate::error::NavigationError;

/// A rectangular occupancy grid, `true` = blocked.
///
/// Cells are stored row-major. The grid is only read by the planner; edits
/// happen before a planning call through [`OccupancyGrid::set_blocked`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// Blocked flags, `rows * cols` entries
    data: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates a new, fully free grid.
    ///
    /// # Arguments
    /// * `rows` - Number of rows
    /// * `cols` - Number of columns
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The grid or an error if a dimension is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self, NavigationError> {
        if rows == 0 || cols == 0 {
            return Err(NavigationError::InvalidDimensions("Rows and columns must be non-zero"));
        }

        // Check for potential overflow in data allocation
        let len = rows
            .checked_mul(cols)
            .ok_or(NavigationError::InvalidDimensions("Grid dimensions too large, would cause overflow"))?;

        Ok(OccupancyGrid {
            rows,
            cols,
            data: vec![false; len],
        })
    }

    /// Creates a grid from nested rows of blocked flags.
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The grid, or an error if there are no rows,
    ///   the first row is empty, or the rows are ragged
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, NavigationError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(rows.len(), cols)?;
        if rows.iter().any(|row| row.len() != cols) {
            return Err(NavigationError::InvalidDimensions("All rows must have the same length"));
        }
        grid.data = rows.into_iter().flatten().collect();
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_index(&self, cell: GridCell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Returns true if `cell` lies inside the grid.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns whether `cell` is blocked.
    ///
    /// # Returns
    /// * `Result<bool, NavigationError>` - The flag, or an error if out of bounds
    pub fn is_blocked(&self, cell: GridCell) -> Result<bool, NavigationError> {
        if self.contains(cell) {
            Ok(self.data[self.get_index(cell)])
        } else {
            Err(NavigationError::OutOfBounds("Grid index out of bounds"))
        }
    }

    /// Returns true if `cell` is inside the grid and not blocked.
    pub fn is_free(&self, cell: GridCell) -> bool {
        matches!(self.is_blocked(cell), Ok(false))
    }

    /// Marks `cell` as blocked or free.
    ///
    /// # Returns
    /// * `Result<(), NavigationError>` - Success or error if out of bounds
    pub fn set_blocked(&mut self, cell: GridCell, blocked: bool) -> Result<(), NavigationError> {
        if self.contains(cell) {
            let index = self.get_index(cell);
            self.data[index] = blocked;
            Ok(())
        } else {
            Err(NavigationError::OutOfBounds("Grid index out of bounds"))
        }
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Marks every cell free.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }
}

impl std::fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "OccupancyGrid ({}x{})", self.rows, self.cols)?;
        for row in self.data.chunks(self.cols) {
            for &blocked in row {
                write!(f, "{}", if blocked { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = OccupancyGrid::new(10, 4).unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.len(), 40);
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn test_invalid_creation() {
        assert!(matches!(
            OccupancyGrid::new(0, 10),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            OccupancyGrid::new(10, 0),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            OccupancyGrid::from_rows(vec![]),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            OccupancyGrid::from_rows(vec![vec![false, false], vec![false]]),
            Err(NavigationError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = OccupancyGrid::from_rows(vec![
            vec![false, true, false],
            vec![false, false, true],
        ])
        .unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(grid.is_blocked(GridCell::new(0, 1)).unwrap());
        assert!(grid.is_blocked(GridCell::new(1, 2)).unwrap());
        assert!(!grid.is_blocked(GridCell::new(1, 1)).unwrap());
    }

    #[test]
    fn test_cell_operations() {
        let mut grid = OccupancyGrid::new(5, 5).unwrap();
        let cell = GridCell::new(2, 3);

        grid.set_blocked(cell, true).unwrap();
        assert!(grid.is_blocked(cell).unwrap());
        assert!(!grid.is_free(cell));
        assert_eq!(grid.blocked_count(), 1);

        // Out of bounds is neither free nor settable
        let outside = GridCell::new(5, 0);
        assert!(!grid.is_free(outside));
        assert!(matches!(
            grid.set_blocked(outside, true),
            Err(NavigationError::OutOfBounds(_))
        ));
        assert!(matches!(
            grid.is_blocked(GridCell::new(0, 5)),
            Err(NavigationError::OutOfBounds(_))
        ));

        grid.clear();
        assert!(grid.is_free(cell));
    }

    #[test]
    fn test_display() {
        let mut grid = OccupancyGrid::new(2, 3).unwrap();
        grid.set_blocked(GridCell::new(1, 0), true).unwrap();
        let display_str = format!("{}", grid);
        assert!(display_str.contains("OccupancyGrid (2x3)"));
        assert!(display_str.contains("...\n#..\n"));
    }
}
