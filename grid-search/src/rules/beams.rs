//! Light beams travelling through a contraption of mirrors and splitters.

use std::collections::HashSet;

use crate::frontier::reachable_states;
use crate::grid::{Direction, Grid, GridError, Position};
use crate::rule::NeighborRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// `/`, with ends to the north-east and south-west.
    ForwardMirror,
    /// `\`, with ends to the north-west and south-east.
    BackwardMirror,
    /// `|`
    VerticalSplitter,
    /// `-`
    HorizontalSplitter,
}

impl Tile {
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '/' => Some(Self::ForwardMirror),
            '\\' => Some(Self::BackwardMirror),
            '|' => Some(Self::VerticalSplitter),
            '-' => Some(Self::HorizontalSplitter),
            _ => None,
        }
    }

    /// The headings a beam leaves this tile with after entering it with `heading`.
    #[must_use]
    pub fn redirect(self, heading: Direction) -> Redirect {
        use Direction::{East, North, South, West};
        match (self, heading) {
            (Self::Empty, _)
            | (Self::VerticalSplitter, North | South)
            | (Self::HorizontalSplitter, East | West) => Redirect::Pass(heading),

            (Self::VerticalSplitter, East | West) => Redirect::Split(North, South),
            (Self::HorizontalSplitter, North | South) => Redirect::Split(East, West),

            (Self::ForwardMirror, North) | (Self::BackwardMirror, South) => Redirect::Turn(East),
            (Self::ForwardMirror, South) | (Self::BackwardMirror, North) => Redirect::Turn(West),
            (Self::ForwardMirror, West) | (Self::BackwardMirror, East) => Redirect::Turn(South),
            (Self::ForwardMirror, East) | (Self::BackwardMirror, West) => Redirect::Turn(North),
        }
    }
}

/// How a tile changes the heading of a beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Pass(Direction),
    Turn(Direction),
    Split(Direction, Direction),
}

impl Redirect {
    fn headings(self) -> impl Iterator<Item = Direction> {
        let (first, second) = match self {
            Self::Pass(heading) | Self::Turn(heading) => (heading, None),
            Self::Split(one, two) => (one, Some(two)),
        };
        std::iter::once(first).chain(second)
    }
}

/// A beam occupying a tile while heading in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beam {
    pub position: Position,
    pub heading: Direction,
}

impl Beam {
    #[must_use]
    pub const fn new(position: Position, heading: Direction) -> Self {
        Self { position, heading }
    }
}

#[derive(Debug, Clone)]
pub struct Contraption {
    grid: Grid<Tile>,
}

impl Contraption {
    /// # Errors
    ///
    /// A [`GridError`] for ragged rows or unknown tiles.
    pub fn parse(input: &str) -> Result<Self, GridError> {
        Grid::parse(input, Tile::from_char).map(|grid| Self { grid })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Count the tiles at least one beam passes through, starting from `entry`.
    #[must_use]
    pub fn energized(&self, entry: Beam) -> usize {
        reachable_states(self, [entry])
            .into_iter()
            .map(|beam| beam.position)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every beam entering from an edge, heading away from that edge. Corners appear once per edge
    /// they touch.
    #[must_use]
    pub fn edge_entries(&self) -> Vec<Beam> {
        let last_row = self.grid.height() - 1;
        let last_col = self.grid.width() - 1;

        let columns = (0..=last_col).flat_map(|col| {
            [
                Beam::new(Position::new(0, col), Direction::South),
                Beam::new(Position::new(last_row, col), Direction::North),
            ]
        });
        let rows = (0..=last_row).flat_map(|row| {
            [
                Beam::new(Position::new(row, 0), Direction::East),
                Beam::new(Position::new(row, last_col), Direction::West),
            ]
        });
        columns.chain(rows).collect()
    }
}

impl NeighborRule for Contraption {
    type State = Beam;

    fn neighbors(&self, beam: &Beam) -> Vec<Beam> {
        self.grid[beam.position]
            .redirect(beam.heading)
            .headings()
            .filter_map(|heading| {
                let position = self.grid.step(beam.position, heading)?;
                Some(Beam { position, heading })
            })
            .collect()
    }
}
