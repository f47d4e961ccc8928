//! Neighbor rules: how a search moves from one state to the next.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use num_traits::{CheckedAdd, Zero};

/// Successor generation for unweighted searches.
///
/// A state is usually a grid position, optionally paired with a discriminator such as a heading.
/// States are deduplicated by full equality, so states sharing a position but differing in
/// discriminator are explored independently.
pub trait NeighborRule {
    type State: Clone + Eq + Hash;

    /// The states reachable in one step from `state`. Implementations never return states outside
    /// the grid they search.
    fn neighbors(&self, state: &Self::State) -> Vec<Self::State>;
}

/// Successor generation for searches where each step has a cost.
pub trait CostRule {
    type State: Clone + Eq + Hash;
    type Cost: Copy + Ord + Zero + CheckedAdd + Debug;

    /// The states reachable in one step from `state`, paired with the cost of that step.
    fn weighted_neighbors(&self, state: &Self::State) -> Vec<(Self::State, Self::Cost)>;
}

/// A [`NeighborRule`] built from a closure, see [`from_fn`].
pub struct FromFn<S, F> {
    neighbors: F,
    state: PhantomData<fn(&S)>,
}

/// Wrap a closure producing successors as a [`NeighborRule`].
pub fn from_fn<S, F>(neighbors: F) -> FromFn<S, F>
where
    S: Clone + Eq + Hash,
    F: Fn(&S) -> Vec<S>,
{
    FromFn {
        neighbors,
        state: PhantomData,
    }
}

impl<S, F> NeighborRule for FromFn<S, F>
where
    S: Clone + Eq + Hash,
    F: Fn(&S) -> Vec<S>,
{
    type State = S;

    fn neighbors(&self, state: &S) -> Vec<S> {
        (self.neighbors)(state)
    }
}
