//! One module per puzzle day, and [`run_day`] to run any of them by number.
//!
//! A day module makes itself runnable by implementing [`SolutionRunner`] for [`Day`] at its
//! number, usually with the attribute from the framework:
//!
//! ```ignore
//! #[solution_runner(name = "Day 1: Trebuchet?!", parsed = Document, part_one = Day01, part_two = Day01)]
//! impl super::Day<1> {}
//! ```

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day17;
mod day18;
mod day19;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

/// The puzzle of day `N`.
struct Day<const N: u8>;

#[derive(Error, Debug)]
#[error("no solution for day {0}")]
pub struct DayNotAvailable(u8);

/// Run the puzzle of `day` on `input`.
///
/// # Errors
///
/// [`DayNotAvailable`] for days outside 1 to 25, otherwise any error of the puzzle.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    let run = match day {
        1 => Day::<1>::run,
        2 => Day::<2>::run,
        3 => Day::<3>::run,
        4 => Day::<4>::run,
        5 => Day::<5>::run,
        6 => Day::<6>::run,
        7 => Day::<7>::run,
        8 => Day::<8>::run,
        9 => Day::<9>::run,
        10 => Day::<10>::run,
        11 => Day::<11>::run,
        12 => Day::<12>::run,
        13 => Day::<13>::run,
        14 => Day::<14>::run,
        15 => Day::<15>::run,
        16 => Day::<16>::run,
        17 => Day::<17>::run,
        18 => Day::<18>::run,
        19 => Day::<19>::run,
        20 => Day::<20>::run,
        21 => Day::<21>::run,
        22 => Day::<22>::run,
        23 => Day::<23>::run,
        24 => Day::<24>::run,
        25 => Day::<25>::run,
        _ => return Err(DayNotAvailable(day).into()),
    };
    run(input, handler, timed)
}
