//! Projection of geodetic fixes onto grid cells.

use pathfix_navigation::GridCell;
use pathfix_ubx::GeodeticFix;
use thiserror::Error;

/// WGS-84 equatorial radius (m).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),
    #[error("fix {fix} maps to ({row:.0}, {col:.0}), outside the {rows}x{cols} grid")]
    OutsideGrid {
        fix: GeodeticFix,
        row: f64,
        col: f64,
        rows: usize,
        cols: usize,
    },
}

/// Maps fixes to cells with an equirectangular projection about an origin.
///
/// The origin is cell `(0, 0)`. Northward offsets increase the row,
/// eastward offsets increase the column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapper {
    origin: GeodeticFix,
    cell_size_m: f64,
    rows: usize,
    cols: usize,
}

impl GridMapper {
    pub fn new(origin: GeodeticFix, cell_size_m: f64, rows: usize, cols: usize) -> Result<Self, MapperError> {
        if !(cell_size_m > 0.0) {
            return Err(MapperError::InvalidCellSize(cell_size_m));
        }
        Ok(Self {
            origin,
            cell_size_m,
            rows,
            cols,
        })
    }

    /// North and east offsets of `fix` from the origin (m).
    pub fn local_offset_m(&self, fix: &GeodeticFix) -> (f64, f64) {
        let d_lat = (fix.latitude_deg - self.origin.latitude_deg).to_radians();
        let d_lon = (fix.longitude_deg - self.origin.longitude_deg).to_radians();
        let north = d_lat * EARTH_RADIUS_M;
        let east = d_lon * EARTH_RADIUS_M * self.origin.latitude_deg.to_radians().cos();
        (north, east)
    }

    /// Rounds `fix` to the nearest cell.
    pub fn to_grid_cell(&self, fix: &GeodeticFix) -> Result<GridCell, MapperError> {
        let (north, east) = self.local_offset_m(fix);
        let row = (north / self.cell_size_m).round();
        let col = (east / self.cell_size_m).round();

        let inside = |value: f64, limit: usize| value >= 0.0 && value < limit as f64;
        if !(inside(row, self.rows) && inside(col, self.cols)) {
            return Err(MapperError::OutsideGrid {
                fix: *fix,
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(GridCell::new(row as usize, col as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: GeodeticFix = GeodeticFix::new(45.3456789, 13.9398792, 0.0);

    #[test]
    fn test_origin_is_first_cell() {
        let mapper = GridMapper::new(ORIGIN, 1.0, 10, 10).unwrap();
        assert_eq!(mapper.to_grid_cell(&ORIGIN).unwrap(), GridCell::new(0, 0));
    }

    #[test]
    fn test_north_is_row_east_is_col() {
        let mapper = GridMapper::new(ORIGIN, 1.0, 10, 10).unwrap();
        // 270e-7 deg north is ~3.006 m, 256e-7 deg east at this latitude is ~2.003 m
        let fix = GeodeticFix::new(ORIGIN.latitude_deg + 270e-7, ORIGIN.longitude_deg + 256e-7, 0.0);
        let (north, east) = mapper.local_offset_m(&fix);
        assert!((north - 3.0056).abs() < 1e-3);
        assert!((east - 2.0029).abs() < 1e-3);
        assert_eq!(mapper.to_grid_cell(&fix).unwrap(), GridCell::new(3, 2));
    }

    #[test]
    fn test_cell_size_scales() {
        let mapper = GridMapper::new(ORIGIN, 2.0, 10, 10).unwrap();
        let fix = GeodeticFix::new(ORIGIN.latitude_deg + 270e-7, ORIGIN.longitude_deg, 0.0);
        // 3.006 m / 2 m rounds to 2
        assert_eq!(mapper.to_grid_cell(&fix).unwrap(), GridCell::new(2, 0));
    }

    #[test]
    fn test_outside_grid() {
        let mapper = GridMapper::new(ORIGIN, 1.0, 10, 10).unwrap();
        let south = GeodeticFix::new(ORIGIN.latitude_deg - 270e-7, ORIGIN.longitude_deg, 0.0);
        assert!(matches!(
            mapper.to_grid_cell(&south),
            Err(MapperError::OutsideGrid { .. })
        ));
        let far_north = GeodeticFix::new(ORIGIN.latitude_deg + 1e-3, ORIGIN.longitude_deg, 0.0);
        assert!(matches!(
            mapper.to_grid_cell(&far_north),
            Err(MapperError::OutsideGrid { .. })
        ));
    }

    #[test]
    fn test_invalid_cell_size() {
        assert_eq!(
            GridMapper::new(ORIGIN, 0.0, 10, 10),
            Err(MapperError::InvalidCellSize(0.0))
        );
        assert!(GridMapper::new(ORIGIN, f64::NAN, 10, 10).is_err());
    }
}
