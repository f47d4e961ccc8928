use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::rules::crucible::HeatMap;

#[solution_runner(name = "Day 17: Clumsy Crucible", parsed = City, part_one = Day17, part_two = Day17)]
impl super::Day<17> {}

/*
Each city block is a digit: the heat lost when a crucible enters it. Crucibles go from the top-left
block to the bottom-right block, moving between blocks orthogonally. They never reverse, and the
number of blocks they may move in a straight line is limited.
*/

struct City(HeatMap);

impl ParseData for City {
    fn parse(input: &str) -> DynamicResult<Self> {
        Ok(Self(HeatMap::parse(input)?))
    }
}

/*
For part 1, a crucible moves at most three blocks in a straight line. Find the least heat it can lose.
*/

struct Day17;

impl Solution<PartOne> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &City) -> DynamicResult<u32> {
        Ok(input.0.min_heat_loss(0, 3)?)
    }
}

/*
For part 2, an ultra crucible must move at least four blocks straight before turning or stopping at
the end, and at most ten.
*/

impl Solution<PartTwo> for Day17 {
    type Input = City;
    type Output = u32;

    fn solve(input: &City) -> DynamicResult<u32> {
        Ok(input.0.min_heat_loss(4, 10)?)
    }
}
