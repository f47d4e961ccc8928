use aoc_framework::parsing::split_sections;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use grid_search::{Grid, GridError, Position};
use thiserror::Error;

#[solution_runner(name = "Day 13: Point of Incidence", parsed = Patterns, part_one = Day13, part_two = Day13)]
impl super::Day<13> {}

#[derive(Error, Debug)]
enum MirrorError {
    #[error("pattern {pattern} is invalid")]
    InvalidPattern {
        pattern: usize,
        #[source]
        source: GridError,
    },

    #[error("pattern {0} has no line of reflection")]
    NoReflection(usize),

    #[error("summary overflowed")]
    Overflow,
}

/*
The notes are patterns of ash (`.`) and rocks (`#`), separated by blank lines. Each pattern is
mirrored across a single horizontal or vertical line between two rows or columns. Rows or columns
mirrored past the edge of the pattern are not checked.
*/

struct Patterns(Vec<Grid<bool>>);

impl ParseData for Patterns {
    fn parse(input: &str) -> DynamicResult<Self> {
        let patterns = split_sections(input)
            .into_iter()
            .enumerate()
            .map(|(pattern, lines)| {
                let rows = lines
                    .iter()
                    .map(|line| line.chars().map(|ch| ch == '#').collect())
                    .collect();
                Grid::from_rows(rows).map_err(|source| MirrorError::InvalidPattern {
                    pattern: pattern + 1,
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self(patterns))
    }
}

fn row_differences(grid: &Grid<bool>, a: usize, b: usize) -> usize {
    (0..grid.width())
        .filter(|&col| grid[Position::new(a, col)] != grid[Position::new(b, col)])
        .count()
}

/// The number of rows above a horizontal mirror line where exactly `smudges` cells differ from
/// their reflection.
fn mirror_row(grid: &Grid<bool>, smudges: usize) -> Option<usize> {
    (1..grid.height()).find(|&split| {
        let above = (0..split).rev();
        let below = split..grid.height();
        above
            .zip(below)
            .map(|(a, b)| row_differences(grid, a, b))
            .sum::<usize>()
            == smudges
    })
}

/// Rows above a horizontal mirror times 100, or columns left of a vertical one.
fn summarize(patterns: &[Grid<bool>], smudges: usize) -> Result<usize, MirrorError> {
    let notes = patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            mirror_row(pattern, smudges)
                .map(|rows| rows.checked_mul(100).ok_or(MirrorError::Overflow))
                .or_else(|| mirror_row(&pattern.transposed(), smudges).map(Ok))
                .ok_or(MirrorError::NoReflection(index + 1))?
        })
        .collect::<Result<Vec<_>, _>>()?;
    notes.into_iter().checked_sum().ok_or(MirrorError::Overflow)
}

/*
For part 1, summarize the notes: add the columns left of each vertical line of reflection, plus 100
times the rows above each horizontal line.
*/

struct Day13;

impl Solution<PartOne> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Patterns) -> DynamicResult<usize> {
        Ok(summarize(&input.0, 0)?)
    }
}

/*
For part 2, every pattern has exactly one smudge: one cell that is of the wrong type. Fixing it
gives a different line of reflection, which is the one where exactly one cell disagrees.
*/

impl Solution<PartTwo> for Day13 {
    type Input = Patterns;
    type Output = usize;

    fn solve(input: &Patterns) -> DynamicResult<usize> {
        Ok(summarize(&input.0, 1)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..##.
#.#.##.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Patterns::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 405);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Patterns::parse(EXAMPLE_INPUT)?;
        let result = <Day13 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 400);
        Ok(())
    }

    #[test]
    fn pattern_without_reflection_is_an_error() -> DynamicResult<()> {
        let parsed = Patterns::parse("#..\n.#.\n")?;
        assert!(<Day13 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }
}
