//! Crucible movement through city blocks, limited by how long it can move straight.

use crate::frontier::{SearchError, cheapest_cost};
use crate::grid::{Direction, Grid, GridError, Position};
use crate::rule::CostRule;

/// A crucible's place in the city, with how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crucible {
    pub position: Position,
    /// The direction of the last move, or `None` before the first move.
    pub heading: Option<Direction>,
    /// Consecutive moves made in `heading`.
    pub run: u8,
}

/// City blocks with the heat lost on entering each.
#[derive(Debug, Clone)]
pub struct HeatMap {
    grid: Grid<u8>,
}

impl HeatMap {
    /// # Errors
    ///
    /// A [`GridError`] for ragged rows or non-digit characters.
    pub fn parse(input: &str) -> Result<Self, GridError> {
        Grid::parse(input, |ch| {
            ch.to_digit(10).and_then(|digit| u8::try_from(digit).ok())
        })
        .map(|grid| Self { grid })
    }

    /// The least heat lost moving from the top-left block to the bottom-right block, where a crucible
    /// moves between `min_run` and `max_run` blocks straight before it may turn or stop.
    ///
    /// # Errors
    ///
    /// [`SearchError::Unreachable`] if the run limits leave no way to the bottom-right block.
    pub fn min_heat_loss(&self, min_run: u8, max_run: u8) -> Result<u32, SearchError> {
        let rule = RunLimits {
            grid: &self.grid,
            min_run,
            max_run,
        };
        let start = Crucible {
            position: Position::new(0, 0),
            heading: None,
            run: 0,
        };
        let end = Position::new(self.grid.height() - 1, self.grid.width() - 1);

        cheapest_cost(&rule, [start], |crucible| {
            crucible.position == end && crucible.run >= min_run
        })
    }
}

/// The [`CostRule`] for a crucible with bounded straight runs.
struct RunLimits<'a> {
    grid: &'a Grid<u8>,
    min_run: u8,
    max_run: u8,
}

impl CostRule for RunLimits<'_> {
    type State = Crucible;
    type Cost = u32;

    fn weighted_neighbors(&self, crucible: &Crucible) -> Vec<(Crucible, u32)> {
        let moves: Vec<(Direction, u8)> = match crucible.heading {
            None => Direction::ALL.into_iter().map(|heading| (heading, 1)).collect(),
            Some(heading) => {
                let mut moves = Vec::with_capacity(3);
                if crucible.run < self.max_run {
                    moves.push((heading, crucible.run + 1));
                }
                if crucible.run >= self.min_run {
                    moves.push((heading.turn_left(), 1));
                    moves.push((heading.turn_right(), 1));
                }
                moves
            }
        };

        moves
            .into_iter()
            .filter(|&(_, run)| run <= self.max_run)
            .filter_map(|(heading, run)| {
                let position = self.grid.step(crucible.position, heading)?;
                let next = Crucible {
                    position,
                    heading: Some(heading),
                    run,
                };
                Some((next, u32::from(self.grid[position])))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    #[test]
    fn example_with_short_runs() -> Result<(), Box<dyn std::error::Error>> {
        let map = HeatMap::parse(EXAMPLE)?;
        assert_eq!(map.min_heat_loss(0, 3)?, 102);
        Ok(())
    }

    #[test]
    fn example_with_long_runs() -> Result<(), Box<dyn std::error::Error>> {
        let map = HeatMap::parse(EXAMPLE)?;
        assert_eq!(map.min_heat_loss(4, 10)?, 94);
        Ok(())
    }

    #[test]
    fn minimum_run_applies_before_stopping() -> Result<(), Box<dyn std::error::Error>> {
        let map = HeatMap::parse(
            "111111111111
999999999991
999999999991
999999999991
999999999991
",
        )?;
        assert_eq!(map.min_heat_loss(4, 10)?, 71);
        Ok(())
    }

    #[test]
    fn cost_never_decreases_as_minimum_run_grows() -> Result<(), Box<dyn std::error::Error>> {
        let map = HeatMap::parse(EXAMPLE)?;
        let costs = (0..=4)
            .map(|min_run| map.min_heat_loss(min_run, 10))
            .collect::<Result<Vec<_>, _>>()?;
        assert!(
            costs.windows(2).all(|pair| pair[0] <= pair[1]),
            "costs {costs:?}"
        );
        Ok(())
    }

    #[test]
    fn no_moves_allowed_is_unreachable() -> Result<(), GridError> {
        let map = HeatMap::parse("12\n34\n")?;
        assert!(matches!(
            map.min_heat_loss(0, 0),
            Err(SearchError::Unreachable { .. })
        ));
        Ok(())
    }

    #[test]
    fn single_block_city_loses_no_heat() -> Result<(), Box<dyn std::error::Error>> {
        let map = HeatMap::parse("7\n")?;
        assert_eq!(map.min_heat_loss(0, 3)?, 0);
        Ok(())
    }
}
