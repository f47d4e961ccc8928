use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::{Grid, Position};

#[solution_runner(name = "Day 11: Cosmic Expansion", parsed = Image, part_one = Day11, part_two = Day11)]
impl super::Day<11> {}

/*
The image shows galaxies (`#`) in empty space (`.`). Every row and every column without a galaxy is
actually wider than it looks, and the answer is the sum of the shortest distances between every pair
of galaxies once the universe has expanded.
*/

struct Image {
    grid: Grid<bool>,
}

impl ParseData for Image {
    fn parse(input: &str) -> DynamicResult<Self> {
        let grid = Grid::parse(input, |ch| match ch {
            '#' => Some(true),
            '.' => Some(false),
            _ => None,
        })?;
        Ok(Self { grid })
    }
}

/// Sum of pairwise distances along one axis, after each empty line of that axis grows to
/// `factor` lines.
fn axis_distance_sum(coordinates: Vec<usize>, len: usize, factor: u64) -> u64 {
    let mut occupied = vec![false; len];
    for &coordinate in &coordinates {
        occupied[coordinate] = true;
    }
    let mut expanded = Vec::with_capacity(len);
    let mut offset = 0;
    for is_occupied in occupied {
        expanded.push(offset);
        offset += if is_occupied { 1 } else { factor };
    }

    let mut positions: Vec<u64> = coordinates.into_iter().map(|c| expanded[c]).collect();
    positions.sort_unstable();
    // each position is the far end of a pair with every position before it
    let mut total = 0;
    let mut prefix = 0;
    for (before, position) in (0..).zip(positions) {
        total += before * position - prefix;
        prefix += position;
    }
    total
}

impl Image {
    fn galaxies(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid
            .iter()
            .filter_map(|(position, &galaxy)| galaxy.then_some(position))
    }

    fn distance_sum(&self, factor: u64) -> u64 {
        let (rows, cols) = self
            .galaxies()
            .map(|position| (position.row, position.col))
            .unzip();
        axis_distance_sum(rows, self.grid.height(), factor)
            + axis_distance_sum(cols, self.grid.width(), factor)
    }
}

/*
For part 1, each empty row or column is twice as wide.
*/

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Image) -> DynamicResult<u64> {
        Ok(input.distance_sum(2))
    }
}

/*
For part 2, each empty row or column is a million times as wide.
*/

impl Solution<PartTwo> for Day11 {
    type Input = Image;
    type Output = u64;

    fn solve(input: &Image) -> DynamicResult<u64> {
        Ok(input.distance_sum(1_000_000))
    }
}
