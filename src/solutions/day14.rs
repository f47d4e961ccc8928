use std::collections::HashMap;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::{Direction, Grid, Position};
use tracing::debug;

#[solution_runner(name = "Day 14: Parabolic Reflector Dish", parsed = Platform, part_one = Day14, part_two = Day14)]
impl super::Day<14> {}

/*
The platform holds rounded rocks (`O`) that roll when it is tilted, cube-shaped rocks (`#`) that stay
put, and empty space (`.`). The load on the north support beams is the sum, over every rounded rock,
of the number of rows from the rock to the south edge, counting its own row.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rock {
    Round,
    Cube,
    Empty,
}

#[derive(Debug, Clone)]
struct Platform(Grid<Rock>);

impl ParseData for Platform {
    fn parse(input: &str) -> DynamicResult<Self> {
        let grid = Grid::parse(input, |ch| match ch {
            'O' => Some(Rock::Round),
            '#' => Some(Rock::Cube),
            '.' => Some(Rock::Empty),
            _ => None,
        })?;
        Ok(Self(grid))
    }
}

/// The lines rocks roll along when tilting towards `direction`, each starting at the edge the
/// rocks roll towards.
fn lanes(grid: &Grid<Rock>, direction: Direction) -> Vec<Vec<Position>> {
    let (height, width) = (grid.height(), grid.width());
    match direction {
        Direction::North => (0..width)
            .map(|col| (0..height).map(|row| Position::new(row, col)).collect())
            .collect(),
        Direction::South => (0..width)
            .map(|col| (0..height).rev().map(|row| Position::new(row, col)).collect())
            .collect(),
        Direction::West => (0..height)
            .map(|row| (0..width).map(|col| Position::new(row, col)).collect())
            .collect(),
        Direction::East => (0..height)
            .map(|row| (0..width).rev().map(|col| Position::new(row, col)).collect())
            .collect(),
    }
}

impl Platform {
    fn tilt(&mut self, lanes: &[Vec<Position>]) {
        for lane in lanes {
            let mut landing = 0;
            for (index, &position) in lane.iter().enumerate() {
                match self.0[position] {
                    Rock::Cube => landing = index + 1,
                    Rock::Round => {
                        self.0.swap(lane[landing], position);
                        landing += 1;
                    }
                    Rock::Empty => {}
                }
            }
        }
    }

    fn north_load(&self) -> usize {
        let height = self.0.height();
        self.0
            .iter()
            .filter(|&(_, &rock)| rock == Rock::Round)
            .map(|(position, _)| height - position.row)
            .sum()
    }

    fn round_rocks(&self) -> Vec<Position> {
        self.0
            .iter()
            .filter_map(|(position, &rock)| (rock == Rock::Round).then_some(position))
            .collect()
    }
}

/*
For part 1, tilt the platform north and find the load.
*/

struct Day14;

impl Solution<PartOne> for Day14 {
    type Input = Platform;
    type Output = usize;

    fn solve(input: &Platform) -> DynamicResult<usize> {
        let mut platform = input.clone();
        platform.tilt(&lanes(&platform.0, Direction::North));
        Ok(platform.north_load())
    }
}

/*
For part 2, a spin cycle tilts the platform north, west, south, then east. Find the load after a
billion spin cycles. The rock layout soon repeats, after which the cycles only need to be counted.
*/

const SPIN_CYCLES: usize = 1_000_000_000;

impl Solution<PartTwo> for Day14 {
    type Input = Platform;
    type Output = usize;

    fn solve(input: &Platform) -> DynamicResult<usize> {
        let mut platform = input.clone();
        let spin = [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ]
        .map(|direction| lanes(&platform.0, direction));

        let mut seen = HashMap::new();
        let mut cycle = 0;
        while cycle < SPIN_CYCLES {
            if let Some(first) = seen.insert(platform.round_rocks(), cycle) {
                let period = cycle - first;
                debug!(first, period, "rock layout repeats");
                let remaining = (SPIN_CYCLES - cycle) % period;
                for lanes in spin.iter().cycle().take(remaining * spin.len()) {
                    platform.tilt(lanes);
                }
                break;
            }
            for lanes in &spin {
                platform.tilt(lanes);
            }
            cycle += 1;
        }
        Ok(platform.north_load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 136);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Platform::parse(EXAMPLE_INPUT)?;
        let result = <Day14 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 64);
        Ok(())
    }

    #[test]
    fn rocks_stop_at_cubes() -> DynamicResult<()> {
        let mut platform = Platform::parse(".#.O\n")?;
        platform.tilt(&lanes(&platform.0, Direction::West));
        assert_eq!(platform.round_rocks(), vec![Position::new(0, 2)]);
        platform.tilt(&lanes(&platform.0, Direction::East));
        assert_eq!(platform.round_rocks(), vec![Position::new(0, 3)]);
        Ok(())
    }
}
