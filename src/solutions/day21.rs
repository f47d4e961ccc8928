use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::rules::garden::Garden;
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 21: Step Counter", parsed = Map, part_one = Day21, part_two = Day21)]
impl super::Day<21> {}

#[derive(Error, Debug)]
enum StepCounterError {
    #[error("garden is {height}x{width}, but repeating it needs an odd-sized square")]
    NotOddSquare { height: usize, width: usize },

    #[error("start is not in the center of the garden")]
    OffCenter,

    #[error("{steps} steps do not end on the edge of a tile an even number of tiles out")]
    UnalignedSteps { steps: u64 },

    #[error("reachable plot count overflowed")]
    Overflow,
}

/*
The elf starts on the plot marked `S` and takes single steps north, south, east or west onto garden
plots (`.`), never onto rocks (`#`). A plot can be reached in exactly `n` steps if its shortest
distance is at most `n` and has the same parity as `n`, since the elf can step back and forth.
*/

struct Map(Garden);

impl ParseData for Map {
    fn parse(input: &str) -> DynamicResult<Self> {
        Ok(Self(Garden::parse(input)?))
    }
}

fn reachable_in(garden: &Garden, steps: u32) -> usize {
    garden
        .distances(Some(steps))
        .into_values()
        .filter(|distance| distance % 2 == steps % 2)
        .count()
}

/*
For part 1, count the plots reachable in exactly 64 steps.
*/

struct Day21;

impl Solution<PartOne> for Day21 {
    type Input = Map;
    type Output = usize;

    fn solve(input: &Map) -> DynamicResult<usize> {
        Ok(reachable_in(&input.0, 64))
    }
}

/*
For part 2, the garden repeats infinitely in every direction. Count the plots reachable in exactly
26 501 365 steps.

The real garden has clear lines through the start and around its edge, so reachable plots form a
diamond of whole tiles. Walking `half + n * size` steps reaches exactly `n` tiles out from the start
tile. Because the size is odd, neighboring tiles alternate between plots of the same parity as the
step count (matching) and the other parity. With `n` even, the diamond holds `(n + 1)^2` matching
tiles and `n^2` other ones. Along its edge, `n + 1` matching tiles lose their corner plots (those
farther than `half` from the tile center) and `n` other corners lie just outside the diamond but are
still reachable.
*/

const INFINITE_STEPS: u64 = 26_501_365;

/// Plots in a diamond `n` tiles out, from per-tile counts of plots of each parity and of corner
/// plots of each parity.
fn diamond_plots(
    n: u64,
    matching: u64,
    other: u64,
    matching_corners: u64,
    other_corners: u64,
) -> Option<u64> {
    let across = n.checked_add(1)?;
    across
        .checked_mul(across)?
        .checked_mul(matching)?
        .checked_add(n.checked_mul(n)?.checked_mul(other)?)?
        .checked_sub(across.checked_mul(matching_corners)?)?
        .checked_add(n.checked_mul(other_corners)?)
}

fn reachable_in_repeating(garden: &Garden, steps: u64) -> Result<u64, StepCounterError> {
    let grid = garden.grid();
    let size = grid.width();
    if grid.height() != size || size % 2 == 0 {
        return Err(StepCounterError::NotOddSquare {
            height: grid.height(),
            width: size,
        });
    }
    let half = size / 2;
    let start = garden.start();
    if (start.row, start.col) != (half, half) {
        return Err(StepCounterError::OffCenter);
    }
    let (half, size) = (half as u64, size as u64);
    let n = steps
        .checked_sub(half)
        .filter(|walked| walked % size == 0 && (walked / size) % 2 == 0)
        .map(|walked| walked / size)
        .ok_or(StepCounterError::UnalignedSteps { steps })?;

    let (mut matching, mut other, mut matching_corners, mut other_corners) = (0, 0, 0, 0);
    for distance in garden.distances(None).into_values() {
        let distance = u64::from(distance);
        let is_corner = distance > half;
        if distance % 2 == steps % 2 {
            matching += 1;
            matching_corners += u64::from(is_corner);
        } else {
            other += 1;
            other_corners += u64::from(is_corner);
        }
    }
    debug!(n, matching, other, matching_corners, other_corners, "tile counts");

    diamond_plots(n, matching, other, matching_corners, other_corners)
        .ok_or(StepCounterError::Overflow)
}

impl Solution<PartTwo> for Day21 {
    type Input = Map;
    type Output = u64;

    fn solve(input: &Map) -> DynamicResult<u64> {
        Ok(reachable_in_repeating(&input.0, INFINITE_STEPS)?)
    }
}

#[cfg(test)]
mod tests {
    use grid_search::rules::garden::Plot;
    use grid_search::{Grid, Position};

    use super::*;

    const EXAMPLE_INPUT: &str = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    #[test]
    fn counts_example_plots_in_six_steps() -> DynamicResult<()> {
        let parsed = Map::parse(EXAMPLE_INPUT)?;
        assert_eq!(reachable_in(&parsed.0, 6), 16);
        assert_eq!(reachable_in(&parsed.0, 1), 2);
        Ok(())
    }

    #[test]
    fn open_garden_repeats_as_a_diamond() -> DynamicResult<()> {
        let garden = Garden::new(Grid::filled(7, 7, Plot::Open), Position::new(3, 3))?;
        // every cell within 17 steps whose distance is odd: 4 * (1 + 3 + ... + 17)
        assert_eq!(reachable_in_repeating(&garden, 17)?, 324);
        Ok(())
    }

    #[test]
    fn diamond_count_reports_overflow() {
        assert_eq!(diamond_plots(2, 5, 4, 1, 1), Some(9 * 5 + 4 * 4 - 3 + 2));
        assert_eq!(diamond_plots(u64::MAX, 1, 0, 0, 0), None);
    }

    #[test]
    fn unsupported_shapes_are_rejected() -> DynamicResult<()> {
        let garden = Garden::new(Grid::filled(7, 7, Plot::Open), Position::new(3, 3))?;
        assert!(matches!(
            reachable_in_repeating(&garden, 10),
            Err(StepCounterError::UnalignedSteps { steps: 10 })
        ));
        assert!(reachable_in_repeating(&garden, 2).is_err());

        let off_center = Garden::new(Grid::filled(7, 7, Plot::Open), Position::new(0, 0))?;
        assert!(matches!(
            reachable_in_repeating(&off_center, 17),
            Err(StepCounterError::OffCenter)
        ));

        let wide = Garden::new(Grid::filled(7, 9, Plot::Open), Position::new(3, 4))?;
        assert!(matches!(
            reachable_in_repeating(&wide, 17),
            Err(StepCounterError::NotOddSquare { .. })
        ));
        Ok(())
    }
}
