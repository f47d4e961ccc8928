//! Hiking trails through a forest, where steep slopes can only be walked downhill.

use thiserror::Error;

use crate::grid::{Direction, Grid, GridError, Position};
use crate::rule::NeighborRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trail {
    Path,
    Forest,
    /// A steep slope, only left downhill in the given direction.
    Slope(Direction),
}

impl Trail {
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Path),
            '#' => Some(Self::Forest),
            '^' => Some(Self::Slope(Direction::North)),
            '>' => Some(Self::Slope(Direction::East)),
            'v' => Some(Self::Slope(Direction::South)),
            '<' => Some(Self::Slope(Direction::West)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_walkable(self) -> bool {
        self != Self::Forest
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrailMapError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("row {row} should have exactly one path cell, but has {count}")]
    Entrance { row: usize, count: usize },
}

/// A trail map entered through the single path in its top row and left through the single path in
/// its bottom row.
#[derive(Debug, Clone)]
pub struct TrailMap {
    grid: Grid<Trail>,
    start: Position,
    end: Position,
}

impl TrailMap {
    /// # Errors
    ///
    /// A [`TrailMapError`] for malformed grids, or if the top or bottom row does not have exactly
    /// one path cell.
    pub fn parse(input: &str) -> Result<Self, TrailMapError> {
        let grid = Grid::parse(input, Trail::from_char)?;
        let start = Self::entrance(&grid, 0)?;
        let end = Self::entrance(&grid, grid.height() - 1)?;
        Ok(Self { grid, start, end })
    }

    fn entrance(grid: &Grid<Trail>, row: usize) -> Result<Position, TrailMapError> {
        let paths: Vec<_> = (0..grid.width())
            .map(|col| Position::new(row, col))
            .filter(|&position| grid[position] == Trail::Path)
            .collect();
        match paths.as_slice() {
            &[position] => Ok(position),
            _ => Err(TrailMapError::Entrance {
                row,
                count: paths.len(),
            }),
        }
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Position {
        self.end
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<Trail> {
        &self.grid
    }

    /// The start, the end and every walkable cell where three or more trails meet, in row-major
    /// order.
    #[must_use]
    pub fn junctions(&self) -> Vec<Position> {
        self.grid
            .positions()
            .filter(|&position| {
                position == self.start
                    || position == self.end
                    || (self.grid[position].is_walkable()
                        && self
                            .grid
                            .orthogonal_neighbors(position)
                            .filter(|&(_, next)| self.grid[next].is_walkable())
                            .count()
                            >= 3)
            })
            .collect()
    }

    /// The rule for walking this map. With `slippery` set, slopes may only be entered and left
    /// downhill; otherwise they are plain paths.
    #[must_use]
    pub fn rule(&self, slippery: bool) -> TrailRule<'_> {
        TrailRule {
            map: self,
            slippery,
        }
    }
}

/// The [`NeighborRule`] for hiking on a [`TrailMap`].
#[derive(Debug, Clone, Copy)]
pub struct TrailRule<'a> {
    map: &'a TrailMap,
    slippery: bool,
}

impl TrailRule<'_> {
    fn may_move(&self, from: Position, direction: Direction, to: Position) -> bool {
        let grid = &self.map.grid;
        if !grid[to].is_walkable() {
            return false;
        }
        if !self.slippery {
            return true;
        }
        let leaves_downhill = match grid[from] {
            Trail::Slope(downhill) => downhill == direction,
            Trail::Path | Trail::Forest => true,
        };
        let enters_uphill = grid[to] == Trail::Slope(direction.opposite());
        leaves_downhill && !enters_uphill
    }
}

impl NeighborRule for TrailRule<'_> {
    type State = Position;

    fn neighbors(&self, &position: &Position) -> Vec<Position> {
        self.map
            .grid
            .orthogonal_neighbors(position)
            .filter(|&(direction, next)| self.may_move(position, direction, next))
            .map(|(_, next)| next)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::reachable_states;

    const FORK: &str = "#.###
#.>.#
#v#.#
#...#
###.#
";

    #[test]
    fn entrances_are_found_on_the_outer_rows() -> Result<(), TrailMapError> {
        let map = TrailMap::parse(FORK)?;
        assert_eq!(map.start(), Position::new(0, 1));
        assert_eq!(map.end(), Position::new(4, 3));
        Ok(())
    }

    #[test]
    fn blocked_top_row_is_rejected() {
        assert_eq!(
            TrailMap::parse("###\n#.#\n#.#\n").err(),
            Some(TrailMapError::Entrance { row: 0, count: 0 })
        );
    }

    #[test]
    fn slopes_are_one_way_when_slippery() -> Result<(), TrailMapError> {
        let map = TrailMap::parse(FORK)?;
        let past_slope = Position::new(1, 3);
        let slope = Position::new(1, 2);

        assert!(!map.rule(true).neighbors(&past_slope).contains(&slope));
        assert_eq!(map.rule(true).neighbors(&slope), vec![past_slope]);
        assert!(map.rule(false).neighbors(&past_slope).contains(&slope));
        Ok(())
    }

    #[test]
    fn forest_is_never_entered() -> Result<(), TrailMapError> {
        let map = TrailMap::parse(FORK)?;
        let reached = reachable_states(&map.rule(false), [map.start()]);
        assert!(reached.iter().all(|&position| map.grid()[position].is_walkable()));
        assert_eq!(reached.len(), 10);
        Ok(())
    }

    #[test]
    fn junctions_include_both_entrances_and_forks() -> Result<(), TrailMapError> {
        let map = TrailMap::parse(FORK)?;
        assert_eq!(
            map.junctions(),
            vec![
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(3, 3),
                Position::new(4, 3)
            ]
        );
        Ok(())
    }
}
