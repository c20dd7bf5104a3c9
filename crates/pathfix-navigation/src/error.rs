//! This module defines the error types used by the `pathfix-navigation` crate.

#![warn(missing_docs)]

/// Error type for navigation operations.
///
/// This enum encapsulates the errors that can occur while building or
/// editing an occupancy grid. Failing to find a path is not an error; the
/// planner reports it as an empty path.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// Error for invalid grid dimensions.
    /// This variant is returned when the row or column count is zero, or rows have different lengths.
    InvalidDimensions(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when attempting to access cells outside the grid.
    OutOfBounds(&'static str),
}

impl core::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NavigationError::InvalidDimensions(msg) => write!(f, "Invalid grid dimensions: {}", msg),
            NavigationError::OutOfBounds(msg) => write!(f, "Grid access out of bounds: {}", msg),
        }
    }
}

impl core::error::Error for NavigationError {}
