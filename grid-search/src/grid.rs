//! The coordinate space: a bounded 2D grid of typed cells.

use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

use nalgebra::{DMatrix, Scalar};
use thiserror::Error;

/// A cell coordinate in a [`Grid`].
///
/// Rows grow southward and columns grow eastward, with `(0, 0)` in the north-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one cell towards `direction`.
    ///
    /// Only the lower bound is checked here, returning `None` when a coordinate would go below
    /// zero. Use [`Grid::step`] to also respect the upper bounds of a grid.
    #[must_use]
    pub fn checked_step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self { row, ..self }),
            Direction::East => self.col.checked_add(1).map(|col| Self { col, ..self }),
            Direction::South => self.row.checked_add(1).map(|row| Self { row, ..self }),
            Direction::West => self.col.checked_sub(1).map(|col| Self { col, ..self }),
        }
    }

    /// The taxicab distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

/// A compass direction of travel on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// The direction after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// The direction after a quarter turn clockwise.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// An error building a [`Grid`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("expected every row to have width {expected}, but row {row} has width {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell character {ch:?} at {position}")]
    InvalidCell { ch: char, position: Position },
}

/// A rectangular grid of cells, backed by a [`DMatrix`].
///
/// Every row has the same width and every [`Position`] handed out by the grid is in bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Scalar> {
    cells: DMatrix<T>,
}

impl<T: Scalar> Grid<T> {
    /// Build a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// [`GridError::Empty`] if there are no cells, or [`GridError::RaggedRow`] if rows differ in
    /// width.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let height = rows.len();
        Ok(Self {
            cells: DMatrix::from_row_iterator(height, width, rows.into_iter().flatten()),
        })
    }

    /// Parse a character grid, one row per line, mapping each character to a cell.
    ///
    /// `cell` returns `None` for characters that are not valid cells.
    ///
    /// # Errors
    ///
    /// Any [`GridError`], with [`GridError::InvalidCell`] pointing at the first bad character.
    pub fn parse<F>(input: &str, mut cell: F) -> Result<Self, GridError>
    where
        F: FnMut(char) -> Option<T>,
    {
        let rows = input
            .trim_end_matches(['\n', '\r'])
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        cell(ch).ok_or(GridError::InvalidCell {
                            ch,
                            position: Position::new(row, col),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    /// A grid of `height` rows and `width` columns all holding `value`.
    #[must_use]
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            cells: DMatrix::from_element(height, width, value),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height() && position.col < self.width()
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        self.cells.get((position.row, position.col))
    }

    /// The position one step towards `direction`, if it stays inside the grid.
    #[must_use]
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .checked_step(direction)
            .filter(|&next| self.contains(next))
    }

    /// In-bounds orthogonal neighbors paired with the direction taken to reach them.
    pub fn orthogonal_neighbors(
        &self,
        position: Position,
    ) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.step(position, direction)?)))
    }

    /// In-bounds positions of the eight cells surrounding `position`, diagonals included.
    pub fn surrounding(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        let rows = position.row.saturating_sub(1)..=position.row.saturating_add(1);
        rows.flat_map(move |row| {
            let cols = position.col.saturating_sub(1)..=position.col.saturating_add(1);
            cols.map(move |col| Position::new(row, col))
        })
        .filter(move |&other| other != position && self.contains(other))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let width = self.width();
        (0..self.height()).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// All positions paired with their cells, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.positions().map(|position| (position, &self[position]))
    }

    /// The first position in row-major order whose cell matches `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<Position>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .find_map(|(position, cell)| predicate(cell).then_some(position))
    }

    /// Exchange the cells at two positions.
    ///
    /// # Panics
    ///
    /// If either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) {
        self.cells.swap((a.row, a.col), (b.row, b.col));
    }

    /// The grid flipped over its main diagonal, so rows become columns.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            cells: self.cells.transpose(),
        }
    }

    /// The underlying matrix, indexed by `(row, col)`.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<T> {
        &self.cells
    }
}

impl<T: Scalar> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cells[(position.row, position.col)]
    }
}

impl<T: Scalar> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self.cells[(position.row, position.col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_rows_in_order() -> Result<(), GridError> {
        let grid = Grid::parse("ab\ncd\nef\n", Some)?;
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid[Position::new(0, 1)], 'b');
        assert_eq!(grid[Position::new(2, 0)], 'e');
        Ok(())
    }

    #[test]
    fn parse_ignores_trailing_blank_lines() -> Result<(), GridError> {
        let grid = Grid::parse("ab\ncd\n\n\r\n", Some)?;
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[Position::new(1, 1)], 'd');
        Ok(())
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let result = Grid::parse("...\n..\n", Some);
        assert_eq!(
            result,
            Err(GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(Grid::parse("", Some), Err(GridError::Empty));
    }

    #[test]
    fn parse_reports_invalid_cell_position() {
        let result = Grid::parse("..\n.x\n", |ch| (ch == '.').then_some(()));
        assert_eq!(
            result,
            Err(GridError::InvalidCell {
                ch: 'x',
                position: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn step_never_leaves_the_grid() {
        let grid = Grid::filled(2, 3, 0u8);
        let corner = Position::new(0, 0);
        assert_eq!(grid.step(corner, Direction::North), None);
        assert_eq!(grid.step(corner, Direction::West), None);
        assert_eq!(
            grid.step(corner, Direction::East),
            Some(Position::new(0, 1))
        );

        let far_corner = Position::new(1, 2);
        assert_eq!(grid.step(far_corner, Direction::South), None);
        assert_eq!(grid.step(far_corner, Direction::East), None);
    }

    #[test]
    fn surrounding_excludes_self_and_out_of_bounds() {
        let grid = Grid::filled(3, 3, 0u8);
        assert_eq!(grid.surrounding(Position::new(1, 1)).count(), 8);
        assert_eq!(grid.surrounding(Position::new(0, 0)).count(), 3);
        assert_eq!(grid.surrounding(Position::new(2, 1)).count(), 5);
    }

    #[test]
    fn turning_twice_is_opposite() {
        for direction in Direction::ALL {
            assert_eq!(direction.turn_left().turn_left(), direction.opposite());
            assert_eq!(direction.turn_right().turn_left(), direction);
        }
    }
}
