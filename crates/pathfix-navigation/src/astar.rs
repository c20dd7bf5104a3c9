/*

A* = f(n) = g(n) + h(n)

Where:
    n = a cell of the occupancy grid
    g(n) = actual cost from the start cell to n
    h(n) = estimated cost from n to the goal (heuristic)
    f(n) = total estimated cost of the cheapest path through n

The frontier may hold several entries for the same cell. Instead of a
decrease-key, a fresh entry is pushed whenever a cheaper route is found and
stale entries are dropped when popped, because their cell is already closed.

*/

use crate::map::{GridCell, OccupancyGrid};
use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost of a move that changes exactly one coordinate.
pub const ORTHOGONAL_COST: f64 = 1.0;

/// Cost of a diagonal move in the eight-connected model.
pub const DIAGONAL_COST: f64 = 1.4142;

const FOUR_CONNECTED_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const EIGHT_CONNECTED_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Movement model of the planner.
///
/// | Model | Moves | Heuristic | Equal-f tie-break |
/// |-------|-------|-----------|-------------------|
/// | `EightConnected` | orthogonal 1.0, diagonal [`DIAGONAL_COST`] | octile | larger g first |
/// | `FourConnected` | orthogonal 1.0 | Euclidean | cell order only |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// Up, down, left and right.
    FourConnected,
    /// Orthogonal and diagonal neighbors.
    #[default]
    EightConnected,
}

impl Connectivity {
    /// Neighbor offsets `(d_row, d_col)` explored from each cell.
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::FourConnected => &FOUR_CONNECTED_OFFSETS,
            Connectivity::EightConnected => &EIGHT_CONNECTED_OFFSETS,
        }
    }

    /// Cost of moving by `(d_row, d_col)`.
    pub fn step_cost(&self, d_row: isize, d_col: isize) -> f64 {
        if d_row != 0 && d_col != 0 {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }

    /// Admissible estimate of the cost between `a` and `b`.
    pub fn heuristic(&self, a: GridCell, b: GridCell) -> f64 {
        let dx = a.row.abs_diff(b.row) as f64;
        let dy = a.col.abs_diff(b.col) as f64;
        match self {
            Connectivity::FourConnected => (dx * dx + dy * dy).sqrt(),
            Connectivity::EightConnected => (dx + dy) + (DIAGONAL_COST - 2.0) * dx.min(dy),
        }
    }

    /// Whether equal-f frontier entries are ordered by larger g first.
    fn prefers_deeper(&self) -> bool {
        matches!(self, Connectivity::EightConnected)
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::FourConnected => write!(f, "4-connected"),
            Connectivity::EightConnected => write!(f, "8-connected"),
        }
    }
}

/// An ordered sequence of cells from start to goal inclusive.
/// Empty when no path exists.
pub type Path = Vec<GridCell>;

/// Represents the result of an A* pathfinding operation with metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    /// The computed path; empty if none was found.
    pub path: Path,
    /// The total cost of the path.
    pub total_cost: Option<f64>,
    /// The number of cells closed during the search.
    pub nodes_explored: usize,
}

impl PathResult {
    /// Creates a new PathResult for a successful path.
    pub fn success(path: Path, total_cost: f64, nodes_explored: usize) -> Self {
        Self {
            path,
            total_cost: Some(total_cost),
            nodes_explored,
        }
    }

    /// Creates a new PathResult for a failed path search.
    pub fn failure(nodes_explored: usize) -> Self {
        Self {
            path: Vec::new(),
            total_cost: None,
            nodes_explored,
        }
    }

    /// Returns true if a path was found.
    pub fn is_success(&self) -> bool {
        !self.path.is_empty()
    }

    /// The number of cells on the path.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }

    /// Returns the path, empty if none was found.
    pub fn into_path(self) -> Path {
        self.path
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_cost {
            Some(cost) => write!(
                f,
                "PathResult {{ success: true, path_length: {}, total_cost: {:.4}, nodes_explored: {} }}",
                self.path.len(),
                cost,
                self.nodes_explored
            ),
            None => write!(
                f,
                "PathResult {{ success: false, nodes_explored: {} }}",
                self.nodes_explored
            ),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct SearchNode {
    cell: GridCell,
    g_cost: OrderedFloat<f64>,
    f_cost: OrderedFloat<f64>,
    /// Secondary key for equal `f_cost`: g for the deeper-first policy, zero otherwise.
    tie_break: OrderedFloat<f64>,
}

// BinaryHeap is a max-heap, so the f ordering is flipped.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| self.tie_break.cmp(&other.tie_break))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reconstructs the path from a map of `came_from` links.
fn reconstruct_path(came_from: &HashMap<GridCell, GridCell>, mut current: GridCell) -> Path {
    let mut path = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Best-first grid planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Planner {
    connectivity: Connectivity,
}

impl Planner {
    /// Creates a planner for the given movement model.
    pub const fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }

    /// Returns the movement model.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Finds a minimum-cost path from `start` to `goal`.
    ///
    /// # Returns
    /// * `Path` - Cells from start to goal inclusive, empty if no path exists
    pub fn plan(&self, grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> Path {
        self.plan_detailed(grid, start, goal).into_path()
    }

    /// Finds a minimum-cost path from `start` to `goal` with search metadata.
    ///
    /// Start or goal cells that are outside the grid or blocked yield a
    /// failed result without searching.
    pub fn plan_detailed(&self, grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> PathResult {
        let mut nodes_explored = 0;

        if !grid.is_free(start) || !grid.is_free(goal) {
            debug!(%start, %goal, "Start or goal is outside the grid or blocked");
            return PathResult::failure(nodes_explored);
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        let mut g_score: HashMap<GridCell, f64> = HashMap::new();
        let mut closed: HashSet<GridCell> = HashSet::new();

        g_score.insert(start, 0.0);
        open_set.push(self.node(start, 0.0, goal));

        while let Some(SearchNode { cell: current, g_cost, .. }) = open_set.pop() {
            if !closed.insert(current) {
                continue;
            }
            nodes_explored += 1;
            trace!(%current, g = g_cost.into_inner(), "Closed cell");

            let Some(&current_g) = g_score.get(&current) else {
                continue;
            };

            if current == goal {
                let path = reconstruct_path(&came_from, current);
                debug!(
                    connectivity = %self.connectivity,
                    path_length = path.len(),
                    total_cost = current_g,
                    nodes_explored,
                    "A* search reached goal"
                );
                return PathResult::success(path, current_g, nodes_explored);
            }

            for &(d_row, d_col) in self.connectivity.offsets() {
                let Some(neighbor) = current.offset(d_row, d_col) else {
                    continue;
                };
                if !grid.is_free(neighbor) {
                    continue;
                }

                let tentative_g = current_g + self.connectivity.step_cost(d_row, d_col);
                if g_score.get(&neighbor).is_none_or(|&known| tentative_g < known) {
                    trace!(%neighbor, g = tentative_g, "Relaxed neighbor");
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(self.node(neighbor, tentative_g, goal));
                }
            }
        }

        debug!(%start, %goal, nodes_explored, "A* frontier exhausted without reaching goal");
        PathResult::failure(nodes_explored)
    }

    fn node(&self, cell: GridCell, g_cost: f64, goal: GridCell) -> SearchNode {
        let f_cost = g_cost + self.connectivity.heuristic(cell, goal);
        let tie_break = if self.connectivity.prefers_deeper() { g_cost } else { 0.0 };
        SearchNode {
            cell,
            g_cost: OrderedFloat(g_cost),
            f_cost: OrderedFloat(f_cost),
            tie_break: OrderedFloat(tie_break),
        }
    }
}

/// Finds a path with the default eight-connected planner.
///
/// # Arguments
/// * `grid` - The occupancy grid to plan in.
/// * `start` - Starting cell.
/// * `goal` - Goal cell.
///
/// # Returns
/// * `Path` - The path if found, empty otherwise.
pub fn astar_search(grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> Path {
    Planner::default().plan(grid, start, goal)
}
