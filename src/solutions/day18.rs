use std::sync::LazyLock;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::Direction;
use nalgebra::{Point2, Vector2};
use regex::Regex;
use thiserror::Error;

#[solution_runner(name = "Day 18: Lavaduct Lagoon", parsed = DigPlan, part_one = Day18, part_two = Day18)]
impl super::Day<18> {}

#[derive(Error, Debug)]
enum DigPlanError {
    #[error("expected \"<direction> <distance> (#<color>)\"")]
    Format,

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),
}

/*
The dig plan is a list of trench segments. The digger starts in a one cubic meter hole, then for each
step digs `distance` meters towards a direction. The trench ends where it began, and the lagoon is the
trench plus everything it encloses.
*/

#[derive(Debug, Clone, Copy)]
struct Segment {
    direction: Direction,
    distance: i64,
}

#[derive(Debug)]
struct Instruction {
    written: Segment,
    /// The segment hidden in the hexadecimal color code.
    encoded: Segment,
}

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([UDLR]) (\d+) \(#([0-9a-f]{5})([0-9a-f])\)$")
        .expect("instruction pattern should be valid")
});

fn parse_instruction(line: &str) -> DynamicResult<Instruction> {
    let captures = INSTRUCTION
        .captures(line.trim())
        .ok_or(DigPlanError::Format)?;
    let (_, [direction, distance, hex_distance, hex_direction]) = captures.extract();

    let written = Segment {
        direction: match direction {
            "U" => Direction::North,
            "D" => Direction::South,
            "L" => Direction::West,
            "R" => Direction::East,
            other => return Err(DigPlanError::UnknownDirection(other.to_owned()).into()),
        },
        distance: parse_with_context(distance)?,
    };
    let encoded = Segment {
        direction: match hex_direction {
            "0" => Direction::East,
            "1" => Direction::South,
            "2" => Direction::West,
            "3" => Direction::North,
            other => return Err(DigPlanError::UnknownDirection(other.to_owned()).into()),
        },
        distance: i64::from_str_radix(hex_distance, 16)?,
    };
    Ok(Instruction { written, encoded })
}

struct DigPlan(Vec<Instruction>);

impl ParseData for DigPlan {
    fn parse(input: &str) -> DynamicResult<Self> {
        let instructions = parse_input_lines(input, |_, line| parse_instruction(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(instructions))
    }
}

/// One meter towards `direction`, with x growing to the east and y growing to the south.
fn unit_step(direction: Direction) -> Vector2<i64> {
    match direction {
        Direction::North => Vector2::new(0, -1),
        Direction::South => Vector2::new(0, 1),
        Direction::West => Vector2::new(-1, 0),
        Direction::East => Vector2::new(1, 0),
    }
}

/// The cubic meters of a lagoon dug along the closed trench `segments`.
///
/// The shoelace formula gives the area of the polygon through the centers of the trench cubes. By
/// Pick's theorem that area is `interior + boundary / 2 - 1`, and the lagoon holds
/// `interior + boundary` cubes.
fn lagoon_volume<I>(segments: I) -> DynamicResult<i64>
where
    I: IntoIterator<Item = Segment>,
{
    let mut corner: Point2<i64> = Point2::origin();
    let mut twice_area = 0i64;
    let mut boundary = 0i64;
    for Segment {
        direction,
        distance,
    } in segments
    {
        let next = corner + unit_step(direction) * distance;
        twice_area = twice_area
            .checked_add(corner.x * next.y - next.x * corner.y)
            .ok_or("lagoon area overflowed")?;
        boundary = boundary
            .checked_add(distance)
            .ok_or("trench length overflowed")?;
        corner = next;
    }
    if corner != Point2::origin() {
        return Err("trench does not return to its start".into());
    }
    Ok(twice_area.abs() / 2 + boundary / 2 + 1)
}

/*
For part 1, follow the written directions and distances. How many cubic meters can the lagoon hold?
*/

struct Day18;

impl Solution<PartOne> for Day18 {
    type Input = DigPlan;
    type Output = i64;

    fn solve(input: &DigPlan) -> DynamicResult<i64> {
        lagoon_volume(input.0.iter().map(|instruction| instruction.written))
    }
}

/*
For part 2, the colors are the real instructions: the first five hexadecimal digits are the distance
and the last digit is the direction, with 0 to 3 meaning right, down, left and up.
*/

impl Solution<PartTwo> for Day18 {
    type Input = DigPlan;
    type Output = i64;

    fn solve(input: &DigPlan) -> DynamicResult<i64> {
        lagoon_volume(input.0.iter().map(|instruction| instruction.encoded))
    }
}
