use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::{Point3, Vector3};
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 24: Never Tell Me The Odds", parsed = Hailstorm, part_one = Day24, part_two = Day24)]
impl super::Day<24> {}

#[derive(Error, Debug)]
enum HailError {
    #[error("expected \"px, py, pz @ vx, vy, vz\"")]
    Format,

    #[error("no rock velocity up to {0} per axis hits every hailstone")]
    NoThrow(i128),
}

/*
Each line is a hailstone's position and velocity per nanosecond. All arithmetic is done on exact
integers, with 128 bits leaving room for products of positions and velocities.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hailstone {
    position: Point3<i128>,
    velocity: Vector3<i128>,
}

fn parse_triple(text: &str) -> DynamicResult<[i128; 3]> {
    let values: Vec<i128> = text
        .split(',')
        .map(|value| parse_with_context(value.trim()))
        .collect::<Result<_, _>>()?;
    Ok(values.try_into().map_err(|_| HailError::Format)?)
}

fn parse_hailstone(line: &str) -> DynamicResult<Hailstone> {
    let (position, velocity) = line.split_once('@').ok_or(HailError::Format)?;
    Ok(Hailstone {
        position: Point3::from(parse_triple(position)?),
        velocity: Vector3::from(parse_triple(velocity)?),
    })
}

struct Hailstorm(Vec<Hailstone>);

impl ParseData for Hailstorm {
    fn parse(input: &str) -> DynamicResult<Self> {
        let hailstones = parse_input_lines(input, |_, line| parse_hailstone(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(hailstones))
    }
}

/// Where two paths cross in the x-y plane, as times along each path over a shared denominator.
#[derive(Debug, PartialEq, Eq)]
struct Crossing {
    first_time: i128,
    second_time: i128,
    /// Always positive.
    denominator: i128,
}

/// Solve `a.position + t * a_velocity = b.position + s * b_velocity` in x and y, or `None` for
/// parallel paths.
fn crossing_xy(
    a: &Hailstone,
    a_velocity: Vector3<i128>,
    b: &Hailstone,
    b_velocity: Vector3<i128>,
) -> Option<Crossing> {
    let det = b_velocity.x * a_velocity.y - a_velocity.x * b_velocity.y;
    if det == 0 {
        return None;
    }
    let gap = b.position - a.position;
    let first_time = b_velocity.x * gap.y - b_velocity.y * gap.x;
    let second_time = a_velocity.x * gap.y - a_velocity.y * gap.x;
    let sign = det.signum();
    Some(Crossing {
        first_time: first_time * sign,
        second_time: second_time * sign,
        denominator: det.abs(),
    })
}

/*
For part 1, ignore the z axis. Count the pairs of hailstones whose future paths cross inside the test
area, where x and y are both between 200 000 000 000 000 and 400 000 000 000 000.
*/

fn crossings_inside(hailstones: &[Hailstone], low: i128, high: i128) -> usize {
    let mut count = 0;
    for (index, a) in hailstones.iter().enumerate() {
        for b in &hailstones[index + 1..] {
            let Some(crossing) = crossing_xy(a, a.velocity, b, b.velocity) else {
                continue;
            };
            if crossing.first_time < 0 || crossing.second_time < 0 {
                continue;
            }
            let scaled =
                a.position * crossing.denominator + a.velocity * crossing.first_time;
            let area = low * crossing.denominator..=high * crossing.denominator;
            let inside = area.contains(&scaled.x) && area.contains(&scaled.y);
            count += usize::from(inside);
        }
    }
    count
}

struct Day24;

impl Solution<PartOne> for Day24 {
    type Input = Hailstorm;
    type Output = usize;

    fn solve(input: &Hailstorm) -> DynamicResult<usize> {
        Ok(crossings_inside(
            &input.0,
            200_000_000_000_000,
            400_000_000_000_000,
        ))
    }
}

/*
For part 2, find the integer position and velocity to throw a rock from so that it hits every
hailstone, and add up the coordinates of that position.

Seen from the rock, each hailstone moves with its velocity minus the rock's, and every hailstone
passes through the rock's starting point. For each candidate x-y velocity, two hailstones' adjusted
paths fix that point in x and y and the times they are hit, which in turn fix the z velocity and
position. The candidate is kept if every hailstone is hit at a non-negative integer time.
*/

const MAX_ROCK_SPEED: i128 = 500;

/// The time `rock` hits `hailstone`, if they meet at a non-negative integer time.
fn hit_time(rock: &Hailstone, hailstone: &Hailstone) -> Option<i128> {
    let closing = hailstone.velocity - rock.velocity;
    let gap = rock.position - hailstone.position;
    let mut time = None;
    for (&speed, &distance) in closing.iter().zip(gap.iter()) {
        if speed == 0 {
            if distance != 0 {
                return None;
            }
            continue;
        }
        if distance % speed != 0 {
            return None;
        }
        let axis_time = distance / speed;
        if axis_time < 0 || time.is_some_and(|time| time != axis_time) {
            return None;
        }
        time = Some(axis_time);
    }
    // on the same line the whole time, so they meet at once
    Some(time.unwrap_or(0))
}

/// The rock with x-y velocity `(vx, vy)` that hits every hailstone, if there is one.
fn throw_with(hailstones: &[Hailstone], vx: i128, vy: i128) -> Option<Hailstone> {
    let (first, rest) = hailstones.split_first()?;
    let rock_velocity = Vector3::new(vx, vy, 0);
    let first_velocity = first.velocity - rock_velocity;

    let (second, crossing) = rest.iter().find_map(|second| {
        let second_velocity = second.velocity - rock_velocity;
        let crossing = crossing_xy(first, first_velocity, second, second_velocity)?;
        Some((second, crossing))
    })?;
    let Crossing {
        first_time,
        second_time,
        denominator,
    } = crossing;
    if first_time % denominator != 0 || second_time % denominator != 0 {
        return None;
    }
    let (t0, t1) = (first_time / denominator, second_time / denominator);
    if t0 == t1 {
        return None;
    }

    let z0 = first.position.z + first.velocity.z * t0;
    let z1 = second.position.z + second.velocity.z * t1;
    if (z0 - z1) % (t0 - t1) != 0 {
        return None;
    }
    let vz = (z0 - z1) / (t0 - t1);
    // seen from the rock, the first hailstone is hit where the rock starts
    let start = first.position + first_velocity * t0;
    let rock = Hailstone {
        position: Point3::new(start.x, start.y, z0 - vz * t0),
        velocity: Vector3::new(vx, vy, vz),
    };
    hailstones
        .iter()
        .all(|hailstone| hit_time(&rock, hailstone).is_some())
        .then_some(rock)
}

impl Solution<PartTwo> for Day24 {
    type Input = Hailstorm;
    type Output = i128;

    fn solve(input: &Hailstorm) -> DynamicResult<i128> {
        let speeds = -MAX_ROCK_SPEED..=MAX_ROCK_SPEED;
        let rock = speeds
            .clone()
            .flat_map(|vx| speeds.clone().map(move |vy| (vx, vy)))
            .find_map(|(vx, vy)| throw_with(&input.0, vx, vy))
            .ok_or(HailError::NoThrow(MAX_ROCK_SPEED))?;
        debug!(?rock, "rock throw found");
        Ok(rock.position.coords.sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

    #[test]
    fn counts_example_crossings() -> DynamicResult<()> {
        let parsed = Hailstorm::parse(EXAMPLE_INPUT)?;
        assert_eq!(crossings_inside(&parsed.0, 7, 27), 2);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Hailstorm::parse(EXAMPLE_INPUT)?;
        let result = <Day24 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 47);
        Ok(())
    }

    #[test]
    fn parallel_paths_never_cross() -> DynamicResult<()> {
        let a = parse_hailstone("18, 19, 22 @ -1, -1, -2")?;
        let b = parse_hailstone("20, 25, 34 @ -2, -2, -4")?;
        assert_eq!(crossing_xy(&a, a.velocity, &b, b.velocity), None);
        Ok(())
    }

    #[test]
    fn rock_hits_example_hailstones_in_order() -> DynamicResult<()> {
        let parsed = Hailstorm::parse(EXAMPLE_INPUT)?;
        let rock = parse_hailstone("24, 13, 10 @ -3, 1, 2")?;
        let times: Vec<_> = parsed
            .0
            .iter()
            .map(|hailstone| hit_time(&rock, hailstone))
            .collect();
        assert_eq!(times, [Some(5), Some(3), Some(4), Some(6), Some(1)]);
        Ok(())
    }
}
