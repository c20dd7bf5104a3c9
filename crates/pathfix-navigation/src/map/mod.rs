//! Map-related functionality for navigation.
//!
//! This module provides the occupancy grid the planner searches and the
//! cell type used to address it.

pub mod occupancy;
pub mod point_types;

pub use occupancy::OccupancyGrid;
pub use point_types::GridCell;
