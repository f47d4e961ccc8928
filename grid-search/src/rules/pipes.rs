//! Pipe connectivity: each tile connects to at most two compass neighbors.

use std::collections::HashMap;

use thiserror::Error;

use crate::frontier::breadth_first_distances;
use crate::grid::{Direction, Grid, GridError, Position};
use crate::rule::NeighborRule;

/// A tile of a pipe maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipe {
    Ground,
    Start,
    NorthSouth,
    EastWest,
    NorthEast,
    NorthWest,
    SouthWest,
    SouthEast,
}

impl Pipe {
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Ground),
            'S' => Some(Self::Start),
            '|' => Some(Self::NorthSouth),
            '-' => Some(Self::EastWest),
            'L' => Some(Self::NorthEast),
            'J' => Some(Self::NorthWest),
            '7' => Some(Self::SouthWest),
            'F' => Some(Self::SouthEast),
            _ => None,
        }
    }

    /// The two directions a pipe opens towards. Ground and the unresolved start open nowhere.
    #[must_use]
    pub fn openings(self) -> &'static [Direction] {
        use Direction::{East, North, South, West};
        match self {
            Self::Ground | Self::Start => &[],
            Self::NorthSouth => &[North, South],
            Self::EastWest => &[East, West],
            Self::NorthEast => &[North, East],
            Self::NorthWest => &[North, West],
            Self::SouthWest => &[South, West],
            Self::SouthEast => &[South, East],
        }
    }

    #[must_use]
    pub fn opens_towards(self, direction: Direction) -> bool {
        self.openings().contains(&direction)
    }

    /// The pipe opening towards exactly the two given directions, in either order.
    fn joining(a: Direction, b: Direction) -> Option<Self> {
        [
            Self::NorthSouth,
            Self::EastWest,
            Self::NorthEast,
            Self::NorthWest,
            Self::SouthWest,
            Self::SouthEast,
        ]
        .into_iter()
        .find(|pipe| a != b && pipe.opens_towards(a) && pipe.opens_towards(b))
    }
}

/// A malformed pipe maze.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipeMazeError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("no start tile found")]
    MissingStart,

    #[error("found a second start at {second} after the first at {first}")]
    MultipleStarts { first: Position, second: Position },

    #[error("start at {start} should connect to exactly 2 neighbors, but connects to {count}")]
    AmbiguousStart { start: Position, count: usize },
}

/// A grid of pipes with the start tile resolved to the pipe it stands in for.
#[derive(Debug, Clone)]
pub struct PipeMaze {
    grid: Grid<Pipe>,
    start: Position,
    start_pipe: Pipe,
}

impl PipeMaze {
    /// Parse a maze and infer the start's pipe from which neighbors connect back to it.
    ///
    /// # Errors
    ///
    /// A [`PipeMazeError`] if the grid is malformed, the start is missing or duplicated, or the
    /// start does not connect to exactly two neighbors.
    pub fn parse(input: &str) -> Result<Self, PipeMazeError> {
        let grid = Grid::parse(input, Pipe::from_char)?;

        let starts: Vec<Position> = grid
            .iter()
            .filter(|&(_, &pipe)| pipe == Pipe::Start)
            .map(|(position, _)| position)
            .take(2)
            .collect();
        let start = *starts.first().ok_or(PipeMazeError::MissingStart)?;
        if let Some(&second) = starts.get(1) {
            return Err(PipeMazeError::MultipleStarts {
                first: start,
                second,
            });
        }

        let connected: Vec<_> = grid
            .orthogonal_neighbors(start)
            .filter(|&(direction, next)| grid[next].opens_towards(direction.opposite()))
            .map(|(direction, _)| direction)
            .collect();
        let start_pipe = match connected.as_slice() {
            &[a, b] => Pipe::joining(a, b),
            _ => None,
        }
        .ok_or(PipeMazeError::AmbiguousStart {
            start,
            count: connected.len(),
        })?;

        Ok(Self {
            grid,
            start,
            start_pipe,
        })
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Pipe> {
        &self.grid
    }

    /// The pipe at `position`, with the start replaced by the pipe it stands in for.
    #[must_use]
    pub fn pipe_at(&self, position: Position) -> Pipe {
        if position == self.start {
            self.start_pipe
        } else {
            self.grid[position]
        }
    }

    /// Steps from the start to every tile of the loop through it.
    #[must_use]
    pub fn loop_distances(&self) -> HashMap<Position, u32> {
        breadth_first_distances(self, [self.start], None)
    }
}

impl NeighborRule for PipeMaze {
    type State = Position;

    fn neighbors(&self, &position: &Position) -> Vec<Position> {
        self.pipe_at(position)
            .openings()
            .iter()
            .filter_map(|&direction| {
                let next = self.grid.step(position, direction)?;
                self.pipe_at(next)
                    .opens_towards(direction.opposite())
                    .then_some(next)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_LOOP: &str = ".....
.S-7.
.|.|.
.L-J.
.....
";

    #[test]
    fn start_pipe_is_inferred() -> Result<(), PipeMazeError> {
        let maze = PipeMaze::parse(SQUARE_LOOP)?;
        assert_eq!(maze.start(), Position::new(1, 1));
        assert_eq!(maze.pipe_at(maze.start()), Pipe::SouthEast);
        Ok(())
    }

    #[test]
    fn missing_start_fails() {
        let result = PipeMaze::parse(".F7\n.LJ\n");
        assert_eq!(result.err(), Some(PipeMazeError::MissingStart));
    }

    #[test]
    fn missing_start_fails_the_same_way_every_time() {
        for input in ["-", "|||\n|||\n", ".....\n.F-7.\n.L-J.\n"] {
            assert_eq!(
                PipeMaze::parse(input).err(),
                Some(PipeMazeError::MissingStart)
            );
        }
    }

    #[test]
    fn second_start_fails() {
        let result = PipeMaze::parse("S-S\n");
        assert_eq!(
            result.err(),
            Some(PipeMazeError::MultipleStarts {
                first: Position::new(0, 0),
                second: Position::new(0, 2)
            })
        );
    }

    #[test]
    fn extra_starts_report_the_first_two() {
        let result = PipeMaze::parse("S.S\n.S.\n");
        assert_eq!(
            result.err(),
            Some(PipeMazeError::MultipleStarts {
                first: Position::new(0, 0),
                second: Position::new(0, 2)
            })
        );
    }

    #[test]
    fn start_without_two_connections_fails() {
        let result = PipeMaze::parse("...\n.S-\n...\n");
        assert_eq!(
            result.err(),
            Some(PipeMazeError::AmbiguousStart {
                start: Position::new(1, 1),
                count: 1
            })
        );
    }

    #[test]
    fn simple_cycle_max_distance_is_half_its_length() -> Result<(), PipeMazeError> {
        let maze = PipeMaze::parse(SQUARE_LOOP)?;
        let distances = maze.loop_distances();

        let loop_length = distances.len();
        assert_eq!(loop_length, 8);
        let max = distances.values().copied().max();
        assert_eq!(max, u32::try_from(loop_length / 2).ok());
        Ok(())
    }

    #[test]
    fn every_loop_tile_has_unique_minimum_distance_from_each_side() -> Result<(), PipeMazeError> {
        let maze = PipeMaze::parse(
            "..F7.
.FJ|.
SJ.L7
|F--J
LJ...
",
        )?;
        let distances = maze.loop_distances();
        assert_eq!(distances.len(), 16);
        assert_eq!(distances.values().copied().max(), Some(8));
        // exactly one farthest tile on an even cycle, two tiles at every other distance
        for distance in 1..8 {
            let at_distance = distances.values().filter(|&&d| d == distance).count();
            assert_eq!(at_distance, 2, "distance {distance}");
        }
        assert_eq!(distances.values().filter(|&&d| d == 8).count(), 1);
        Ok(())
    }

    #[test]
    fn tiles_off_the_loop_are_not_visited() -> Result<(), PipeMazeError> {
        let maze = PipeMaze::parse(
            "-L|F7
7S-7|
L|7||
-L-J|
L|-JF
",
        )?;
        let distances = maze.loop_distances();
        assert_eq!(distances.len(), 8);
        assert!(!distances.contains_key(&Position::new(0, 0)));
        Ok(())
    }
}
