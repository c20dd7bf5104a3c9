//! Grid path planning for `pathfix`.
//!
//! The crate holds the [`OccupancyGrid`](map::OccupancyGrid) the planner
//! searches and the A* [`Planner`](astar::Planner) itself. Planning calls
//! are pure: they borrow the grid, own their frontier and cost maps, and
//! return the path by value.

pub mod astar;
pub mod error;
pub mod map;

pub use astar::{Connectivity, Path, PathResult, Planner, astar_search};
pub use error::NavigationError;
pub use map::{GridCell, OccupancyGrid};
