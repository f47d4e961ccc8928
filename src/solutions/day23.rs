use std::collections::HashMap;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::rules::trails::TrailMap;
use grid_search::{NeighborRule, Position};
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 23: A Long Walk", parsed = Trails, part_one = Day23, part_two = Day23)]
impl super::Day<23> {}

#[derive(Error, Debug)]
enum HikeError {
    #[error("{0} junctions is more than the search can track")]
    TooManyJunctions(usize),

    #[error("no hike reaches the end")]
    NoHike,
}

/*
The map shows paths (`.`), forest (`#`) and steep slopes (`^`, `>`, `v` and `<`). The hike starts at
the single path tile in the top row and ends at the single path tile in the bottom row, and never
steps on the same tile twice. Find the longest hike.

Most path tiles are corridors with exactly one way on. Walking every corridor between junctions
turns the map into a small graph whose edges weigh the corridor lengths, and the longest hike is
found by trying every route through that graph.
*/

struct Trails(TrailMap);

impl ParseData for Trails {
    fn parse(input: &str) -> DynamicResult<Self> {
        Ok(Self(TrailMap::parse(input)?))
    }
}

/// Junctions with the corridors leaving each, as `(junction, length)` pairs.
struct JunctionGraph {
    edges: Vec<Vec<(usize, u32)>>,
    start: usize,
    end: usize,
}

impl JunctionGraph {
    fn build(map: &TrailMap, slippery: bool) -> Result<Self, HikeError> {
        let junctions = map.junctions();
        if junctions.len() > 64 {
            return Err(HikeError::TooManyJunctions(junctions.len()));
        }
        let index: HashMap<Position, usize> = junctions
            .iter()
            .enumerate()
            .map(|(index, &position)| (position, index))
            .collect();
        let rule = map.rule(slippery);

        let mut edges = vec![Vec::new(); junctions.len()];
        for (from, &junction) in junctions.iter().enumerate() {
            for first_step in rule.neighbors(&junction) {
                let (mut previous, mut current) = (junction, first_step);
                let mut length = 1;
                while !index.contains_key(&current) {
                    let Some(next) = rule
                        .neighbors(&current)
                        .into_iter()
                        .find(|&next| next != previous)
                    else {
                        break;
                    };
                    (previous, current) = (current, next);
                    length += 1;
                }
                if let Some(&to) = index.get(&current) {
                    edges[from].push((to, length));
                }
            }
        }
        debug!(junctions = junctions.len(), slippery, "junction graph built");

        Ok(Self {
            edges,
            start: index[&map.start()],
            end: index[&map.end()],
        })
    }

    /// The longest hike from `junction` to the end avoiding the junctions in `visited`, which
    /// must include `junction`.
    fn longest_from(&self, junction: usize, visited: u64) -> Option<u32> {
        if junction == self.end {
            return Some(0);
        }
        // the end's only corridor comes from here, so leaving any other way can never reach it
        if let Some(&(_, length)) = self.edges[junction].iter().find(|&&(to, _)| to == self.end) {
            return Some(length);
        }
        self.edges[junction]
            .iter()
            .filter(|&&(to, _)| visited & (1 << to) == 0)
            .filter_map(|&(to, length)| {
                Some(length + self.longest_from(to, visited | (1 << to))?)
            })
            .max()
    }

    fn longest_hike(&self) -> Result<u32, HikeError> {
        self.longest_from(self.start, 1 << self.start)
            .ok_or(HikeError::NoHike)
    }
}

/*
For part 1, slopes are icy: they can only be crossed downhill.
*/

struct Day23;

impl Solution<PartOne> for Day23 {
    type Input = Trails;
    type Output = u32;

    fn solve(input: &Trails) -> DynamicResult<u32> {
        Ok(JunctionGraph::build(&input.0, true)?.longest_hike()?)
    }
}

/*
For part 2, slopes are as easy to walk as any other path.
*/

impl Solution<PartTwo> for Day23 {
    type Input = Trails;
    type Output = u32;

    fn solve(input: &Trails) -> DynamicResult<u32> {
        Ok(JunctionGraph::build(&input.0, false)?.longest_hike()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Trails::parse(EXAMPLE_INPUT)?;
        let result = <Day23 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 94);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Trails::parse(EXAMPLE_INPUT)?;
        let result = <Day23 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 154);
        Ok(())
    }

    #[test]
    fn straight_corridor_is_one_edge() -> DynamicResult<()> {
        let parsed = Trails::parse("#.#\n#.#\n#.#\n#.#\n")?;
        let graph = JunctionGraph::build(&parsed.0, true)?;
        assert_eq!(graph.edges[graph.start], vec![(graph.end, 3)]);
        assert_eq!(graph.longest_hike()?, 3);
        Ok(())
    }

    #[test]
    fn uphill_slope_blocks_the_hike() -> DynamicResult<()> {
        let parsed = Trails::parse("#.#\n#^#\n#.#\n")?;
        assert!(<Day23 as Solution<PartOne>>::solve(&parsed).is_err());
        let result = <Day23 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }
}
