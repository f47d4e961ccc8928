//! Search over bounded 2D grids.
//!
//! A [`Grid`] holds typed cells. A [`NeighborRule`] or [`CostRule`] decides which states follow a
//! given state, and the [`frontier`] functions drain a queue of states until it is empty or a goal
//! is reached.
//!
//! ```
//! use grid_search::{Grid, Position, breadth_first_distances, from_fn};
//!
//! let grid = Grid::filled(3, 3, ());
//! let open = from_fn(|&position: &Position| {
//!     grid.orthogonal_neighbors(position)
//!         .map(|(_, next)| next)
//!         .collect()
//! });
//!
//! let distances = breadth_first_distances(&open, [Position::new(0, 0)], None);
//! assert_eq!(distances[&Position::new(2, 2)], 4);
//! ```

pub mod frontier;
pub mod grid;
pub mod rule;
pub mod rules;

pub use frontier::{SearchError, breadth_first_distances, cheapest_cost, reachable_states};
pub use grid::{Direction, Grid, GridError, Position};
pub use rule::{CostRule, NeighborRule, from_fn};
