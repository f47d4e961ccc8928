//! Frontier search over the states of a [`NeighborRule`] or [`CostRule`].

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use num_traits::CheckedAdd;
use thiserror::Error;
use tracing::{debug, trace};

use crate::rule::{CostRule, NeighborRule};

/// A search ended without an answer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("frontier exhausted after expanding {expanded} states without reaching a goal")]
    Unreachable { expanded: usize },

    #[error("accumulated cost overflowed")]
    CostOverflow,
}

/// Breadth-first search from `starts`, mapping every visited state to its distance in steps.
///
/// The queue is first-in first-out, so the first time a state is reached is along a shortest path;
/// a state already in the map is never expanded again. With a `budget`, states at exactly that
/// distance are recorded but not expanded.
pub fn breadth_first_distances<R, I>(
    rule: &R,
    starts: I,
    budget: Option<u32>,
) -> HashMap<R::State, u32>
where
    R: NeighborRule,
    I: IntoIterator<Item = R::State>,
{
    let mut distances = HashMap::new();
    let mut queue: VecDeque<_> = starts.into_iter().map(|state| (state, 0u32)).collect();

    while let Some((state, distance)) = queue.pop_front() {
        let Entry::Vacant(entry) = distances.entry(state) else {
            continue;
        };
        let state = entry.key().clone();
        entry.insert(distance);

        if budget.is_some_and(|budget| distance >= budget) {
            continue;
        }

        let next_distance = distance.saturating_add(1);
        queue.extend(
            rule.neighbors(&state)
                .into_iter()
                .filter(|next| !distances.contains_key(next))
                .map(|next| (next, next_distance)),
        );
    }

    debug!(visited = distances.len(), "breadth-first search finished");
    distances
}

/// The set of states reachable from `starts`, including the starts themselves.
pub fn reachable_states<R, I>(rule: &R, starts: I) -> HashSet<R::State>
where
    R: NeighborRule,
    I: IntoIterator<Item = R::State>,
{
    breadth_first_distances(rule, starts, None)
        .into_keys()
        .collect()
}

/// An entry of the priority frontier, ordered so [`BinaryHeap`] pops the lowest cost first.
struct Candidate<S, C> {
    cost: C,
    state: S,
}

impl<S, C: Ord> PartialEq for Candidate<S, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<S, C: Ord> Eq for Candidate<S, C> {}

impl<S, C: Ord> PartialOrd for Candidate<S, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, C: Ord> Ord for Candidate<S, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

/// Dijkstra's search from `starts` for the cheapest state satisfying `is_goal`.
///
/// Stale frontier entries are skipped when popped instead of being decreased in place, so a state
/// popped after it was already visited is ignored. The search stops on the first popped goal state.
///
/// # Errors
///
/// [`SearchError::CostOverflow`] if no goal is popped and some accumulated cost overflowed along
/// the way, otherwise [`SearchError::Unreachable`] if the frontier empties before any goal is
/// popped. Overflowing candidates are dropped, so they only matter when nothing else is found.
pub fn cheapest_cost<R, I, G>(rule: &R, starts: I, is_goal: G) -> Result<R::Cost, SearchError>
where
    R: CostRule,
    I: IntoIterator<Item = R::State>,
    G: Fn(&R::State) -> bool,
{
    let mut visited = HashSet::new();
    let mut overflowed = false;
    let mut frontier: BinaryHeap<_> = starts
        .into_iter()
        .map(|state| Candidate {
            cost: num_traits::zero(),
            state,
        })
        .collect();

    while let Some(Candidate { cost, state }) = frontier.pop() {
        if visited.contains(&state) {
            continue;
        }
        if is_goal(&state) {
            debug!(expanded = visited.len(), ?cost, "cheapest goal found");
            return Ok(cost);
        }

        for (next, step_cost) in rule.weighted_neighbors(&state) {
            if visited.contains(&next) {
                continue;
            }
            match CheckedAdd::checked_add(&cost, &step_cost) {
                Some(next_cost) => frontier.push(Candidate {
                    cost: next_cost,
                    state: next,
                }),
                None => {
                    trace!(?cost, ?step_cost, "dropping overflowing candidate");
                    overflowed = true;
                }
            }
        }
        visited.insert(state);
    }

    trace!(overflowed, "frontier exhausted");
    if overflowed {
        return Err(SearchError::CostOverflow);
    }
    Err(SearchError::Unreachable {
        expanded: visited.len(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::grid::{Grid, Position};
    use crate::rule::from_fn;

    /// Moves on a line of `len` cells, one step right or left.
    fn line_rule(len: u32) -> impl NeighborRule<State = u32> {
        from_fn(move |&x: &u32| {
            [x.checked_sub(1), x.checked_add(1).filter(|&next| next < len)]
                .into_iter()
                .flatten()
                .collect()
        })
    }

    struct Weighted(Grid<u32>);

    impl CostRule for Weighted {
        type State = Position;
        type Cost = u32;

        fn weighted_neighbors(&self, state: &Position) -> Vec<(Position, u32)> {
            self.0
                .orthogonal_neighbors(*state)
                .map(|(_, next)| (next, self.0[next]))
                .collect()
        }
    }

    #[test]
    fn uniform_grid_corner_to_corner_is_four_steps() {
        let grid = Grid::filled(3, 3, ());
        let rule = from_fn(|&position: &Position| {
            grid.orthogonal_neighbors(position)
                .map(|(_, next)| next)
                .collect()
        });

        let distances = breadth_first_distances(&rule, [Position::new(0, 0)], None);
        assert_eq!(distances.len(), 9);
        assert_eq!(distances[&Position::new(2, 2)], 4);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(2, 3)]
    #[case(5, 6)]
    #[case(20, 10)]
    fn budget_limits_expansion(#[case] budget: u32, #[case] expected_visited: usize) {
        let distances = breadth_first_distances(&line_rule(10), [0], Some(budget));
        assert_eq!(distances.len(), expected_visited);
        assert!(distances.values().all(|&distance| distance <= budget));
    }

    #[test]
    fn multiple_starts_take_nearest_distance() {
        let distances = breadth_first_distances(&line_rule(9), [0, 8], None);
        assert_eq!(distances[&4], 4);
        assert_eq!(distances[&6], 2);
        assert_eq!(distances[&1], 1);
    }

    #[test]
    fn reachable_states_includes_start() {
        let isolated = from_fn(|_: &u8| Vec::new());
        let reached = reachable_states(&isolated, [7]);
        assert_eq!(reached, HashSet::from([7]));
    }

    #[test]
    fn cheapest_cost_prefers_cheap_detour() -> Result<(), SearchError> {
        // the direct route across the middle row is expensive
        let grid = Grid::from_rows(vec![vec![1, 1, 1], vec![1, 9, 1], vec![1, 1, 1]])
            .expect("rows are equal width");
        let rule = Weighted(grid);

        let goal = Position::new(1, 2);
        let cost = cheapest_cost(&rule, [Position::new(1, 0)], |&state| state == goal)?;
        assert_eq!(cost, 4);
        Ok(())
    }

    #[test]
    fn cheapest_cost_of_start_goal_is_zero() -> Result<(), SearchError> {
        let rule = Weighted(Grid::filled(2, 2, 5));
        let cost = cheapest_cost(&rule, [Position::new(0, 0)], |_| true)?;
        assert_eq!(cost, 0);
        Ok(())
    }

    #[test]
    fn cheapest_cost_reports_unreachable_goal() {
        let rule = Weighted(Grid::filled(2, 2, 1));
        let result = cheapest_cost(&rule, [Position::new(0, 0)], |&state| {
            state == Position::new(5, 5)
        });
        assert_eq!(result, Err(SearchError::Unreachable { expanded: 4 }));
    }

    #[test]
    fn cheapest_cost_reports_overflow() {
        let rule = Weighted(Grid::filled(1, 3, u32::MAX));
        let result = cheapest_cost(&rule, [Position::new(0, 0)], |&state| {
            state == Position::new(0, 2)
        });
        assert_eq!(result, Err(SearchError::CostOverflow));
    }

    #[test]
    fn cheapest_cost_ignores_overflow_off_the_cheapest_path() -> Result<(), SearchError> {
        // stepping down from the second cell overflows before the goal is popped
        let grid = Grid::from_rows(vec![vec![1, 1, 1], vec![u32::MAX, u32::MAX, u32::MAX]])
            .expect("rows are equal width");
        let rule = Weighted(grid);

        let goal = Position::new(0, 2);
        let cost = cheapest_cost(&rule, [Position::new(0, 0)], |&state| state == goal)?;
        assert_eq!(cost, 2);
        Ok(())
    }
}
