use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use nalgebra::Point3;
use thiserror::Error;

#[solution_runner(name = "Day 22: Sand Slabs", parsed = Stack, part_one = Day22, part_two = Day22)]
impl super::Day<22> {}

#[derive(Error, Debug)]
enum ParseBrickError {
    #[error("expected \"x,y,z~x,y,z\"")]
    Format,

    #[error("brick reaches into the ground at z = 0")]
    BelowGround,
}

/*
Each line is a brick of sand given by the coordinates of its two end cubes. The ground is at z = 0,
so the lowest possible cube is at z = 1. Bricks fall straight down until they rest on the ground or
on another brick, and do not rotate.
*/

#[derive(Debug, Clone, Copy)]
struct Brick {
    low: Point3<u32>,
    high: Point3<u32>,
}

impl Brick {
    fn footprint(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Self { low, high } = *self;
        (low.x..=high.x).flat_map(move |x| (low.y..=high.y).map(move |y| (x, y)))
    }
}

fn parse_corner(text: &str) -> DynamicResult<Point3<u32>> {
    let coordinates: Vec<u32> = text
        .split(',')
        .map(parse_with_context)
        .collect::<Result<_, _>>()?;
    let [x, y, z]: [u32; 3] = coordinates
        .try_into()
        .map_err(|_| ParseBrickError::Format)?;
    Ok(Point3::new(x, y, z))
}

fn parse_brick(line: &str) -> DynamicResult<Brick> {
    let (one, two) = line.split_once('~').ok_or(ParseBrickError::Format)?;
    let (one, two) = (parse_corner(one.trim())?, parse_corner(two.trim())?);
    let (low, high) = (one.inf(&two), one.sup(&two));
    if low.z == 0 {
        return Err(ParseBrickError::BelowGround.into());
    }
    Ok(Brick { low, high })
}

/// The bricks once they have all settled, as the bricks each one rests on.
#[derive(Debug)]
struct Stack {
    /// For each brick, in settling order, the indices of the bricks directly below it.
    supporters: Vec<Vec<usize>>,
}

impl ParseData for Stack {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut bricks: Vec<Brick> = parse_input_lines(input, |_, line| parse_brick(line))
            .collect::<Result<_, _>>()?;
        bricks.sort_by_key(|brick| brick.low.z);
        Ok(Self::settle(&bricks))
    }
}

impl Stack {
    /// Drop the bricks, which must be sorted by their lowest z.
    fn settle(bricks: &[Brick]) -> Self {
        // top z and owning brick of the highest cube in each column
        let mut heights: HashMap<(u32, u32), (u32, usize)> = HashMap::new();
        let mut supporters = Vec::with_capacity(bricks.len());

        for (index, brick) in bricks.iter().enumerate() {
            let below: Vec<(u32, usize)> = brick
                .footprint()
                .filter_map(|column| heights.get(&column).copied())
                .collect();
            let rest = below.iter().map(|&(top, _)| top).max().unwrap_or(0);
            let mut resting_on: Vec<usize> = below
                .iter()
                .filter(|&&(top, _)| top == rest)
                .map(|&(_, other)| other)
                .collect();
            resting_on.sort_unstable();
            resting_on.dedup();
            supporters.push(resting_on);

            let top = rest + 1 + (brick.high - brick.low).z;
            for column in brick.footprint() {
                heights.insert(column, (top, index));
            }
        }
        Self { supporters }
    }

    /// How many other bricks fall when `removed` is disintegrated.
    ///
    /// Bricks are in settling order, so everything a brick rests on comes before it.
    fn chain_reaction(&self, removed: usize) -> usize {
        let mut falling = vec![false; self.supporters.len()];
        falling[removed] = true;
        let mut count = 0;
        for (index, supporters) in self.supporters.iter().enumerate().skip(removed + 1) {
            if !supporters.is_empty() && supporters.iter().all(|&other| falling[other]) {
                falling[index] = true;
                count += 1;
            }
        }
        count
    }
}

/*
For part 1, count the bricks that can be disintegrated without any other brick falling: the ones
that are not the only support of any brick.
*/

struct Day22;

impl Solution<PartOne> for Day22 {
    type Input = Stack;
    type Output = usize;

    fn solve(input: &Stack) -> DynamicResult<usize> {
        let mut essential = vec![false; input.supporters.len()];
        for supporters in &input.supporters {
            if let [only] = supporters[..] {
                essential[only] = true;
            }
        }
        Ok(essential.into_iter().filter(|&essential| !essential).count())
    }
}

/*
For part 2, sum, over every brick, the number of other bricks that would fall if it alone were
disintegrated.
*/

impl Solution<PartTwo> for Day22 {
    type Input = Stack;
    type Output = usize;

    fn solve(input: &Stack) -> DynamicResult<usize> {
        let sum = (0..input.supporters.len())
            .map(|brick| input.chain_reaction(brick))
            .checked_sum()
            .ok_or("sum of falling bricks overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Stack::parse(EXAMPLE_INPUT)?;
        let result = <Day22 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 5);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Stack::parse(EXAMPLE_INPUT)?;
        let result = <Day22 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 7);
        Ok(())
    }

    #[test]
    fn bricks_fall_onto_each_other() -> DynamicResult<()> {
        let parsed = Stack::parse("0,0,5~0,0,6\n0,0,2~2,0,2\n")?;
        assert_eq!(parsed.supporters, vec![Vec::<usize>::new(), vec![0]]);
        Ok(())
    }

    #[test]
    fn corners_are_ordered_per_axis() -> DynamicResult<()> {
        let brick = parse_brick("2,2,5~0,2,3")?;
        assert_eq!(brick.low, Point3::new(0, 2, 3));
        assert_eq!(brick.high, Point3::new(2, 2, 5));
        assert_eq!(brick.footprint().count(), 3);
        Ok(())
    }

    #[test]
    fn bricks_cannot_start_underground() {
        assert!(Stack::parse("0,0,0~0,0,1\n").is_err());
    }
}
