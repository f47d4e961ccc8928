//! Open ground crossed one orthogonal step at a time, blocked by rocks.

use std::collections::HashMap;

use thiserror::Error;

use crate::frontier::breadth_first_distances;
use crate::grid::{Grid, GridError, Position};
use crate::rule::NeighborRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    Open,
    Rock,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GardenError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("no start plot found")]
    MissingStart,

    #[error("found a second start at {second} after the first at {first}")]
    MultipleStarts { first: Position, second: Position },

    #[error("start at {0} is not an open plot")]
    BlockedStart(Position),
}

/// A walled garden with a starting plot.
#[derive(Debug, Clone)]
pub struct Garden {
    grid: Grid<Plot>,
    start: Position,
}

impl Garden {
    /// A garden over an existing grid.
    ///
    /// # Errors
    ///
    /// [`GardenError::BlockedStart`] if the start is a rock or outside the grid.
    pub fn new(grid: Grid<Plot>, start: Position) -> Result<Self, GardenError> {
        if grid.get(start) == Some(&Plot::Open) {
            Ok(Self { grid, start })
        } else {
            Err(GardenError::BlockedStart(start))
        }
    }

    /// Parse a garden of `.` plots and `#` rocks, with a single `S` marking the open start plot.
    ///
    /// # Errors
    ///
    /// A [`GardenError`] for malformed grids or a missing or repeated start.
    pub fn parse(input: &str) -> Result<Self, GardenError> {
        let mut start = None;
        let mut second_start = None;

        let grid = Grid::from_rows(
            input
                .lines()
                .enumerate()
                .map(|(row, line)| {
                    line.chars()
                        .enumerate()
                        .map(|(col, ch)| match ch {
                            '.' => Ok(Plot::Open),
                            '#' => Ok(Plot::Rock),
                            'S' => {
                                let position = Position::new(row, col);
                                if start.is_none() {
                                    start = Some(position);
                                } else if second_start.is_none() {
                                    second_start = Some(position);
                                }
                                Ok(Plot::Open)
                            }
                            _ => Err(GridError::InvalidCell {
                                ch,
                                position: Position::new(row, col),
                            }),
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        let start = start.ok_or(GardenError::MissingStart)?;
        if let Some(second) = second_start {
            return Err(GardenError::MultipleStarts {
                first: start,
                second,
            });
        }
        Self::new(grid, start)
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Plot> {
        &self.grid
    }

    /// Shortest step counts from the start to every reachable plot, optionally stopping at
    /// `budget` steps.
    #[must_use]
    pub fn distances(&self, budget: Option<u32>) -> HashMap<Position, u32> {
        breadth_first_distances(self, [self.start], budget)
    }
}

impl NeighborRule for Garden {
    type State = Position;

    fn neighbors(&self, &position: &Position) -> Vec<Position> {
        self.grid
            .orthogonal_neighbors(position)
            .filter(|&(_, next)| self.grid[next] == Plot::Open)
            .map(|(_, next)| next)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_three_by_three_corner_to_corner() -> Result<(), GardenError> {
        let garden = Garden::new(Grid::filled(3, 3, Plot::Open), Position::new(0, 0))?;
        let distances = garden.distances(None);
        assert_eq!(distances.get(&Position::new(2, 2)), Some(&4));
        Ok(())
    }

    #[test]
    fn rocks_force_a_detour() -> Result<(), GardenError> {
        let garden = Garden::parse("S#.\n.#.\n...\n")?;
        let distances = garden.distances(None);
        assert_eq!(distances.get(&Position::new(0, 2)), Some(&6));
        assert!(!distances.contains_key(&Position::new(0, 1)));
        Ok(())
    }

    #[test]
    fn missing_start_fails() {
        assert_eq!(
            Garden::parse("..\n.#\n").err(),
            Some(GardenError::MissingStart)
        );
    }

    #[test]
    fn repeated_start_fails() {
        assert_eq!(
            Garden::parse("S.\n.S\n").err(),
            Some(GardenError::MultipleStarts {
                first: Position::new(0, 0),
                second: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn rock_start_is_rejected() {
        let grid = Grid::filled(2, 2, Plot::Rock);
        assert_eq!(
            Garden::new(grid, Position::new(0, 0)).err(),
            Some(GardenError::BlockedStart(Position::new(0, 0)))
        );
    }
}
