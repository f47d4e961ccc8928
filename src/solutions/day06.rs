use aoc_framework::parsing::{parse_whitespace_separated, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use thiserror::Error;

use crate::checked_product::CheckedProduct;

#[solution_runner(name = "Day 6: Wait For It", parsed = RaceSheet, part_one = Day06, part_two = Day06)]
impl super::Day<6> {}

#[derive(Error, Debug)]
enum ParseRaceSheetError {
    #[error("expected a line starting with {0:?}")]
    MissingLine(&'static str),

    #[error("found {times} times but {distances} distances")]
    UnevenColumns { times: usize, distances: usize },
}

/*
Toy boats race for a fixed time. Holding the button for `h` milliseconds at the start makes the boat
move `h` millimeters per millisecond for the rest of the race. A hold wins if the boat goes further
than the record distance.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn beats_record(self, hold: u64) -> bool {
        hold.checked_mul(self.time - hold)
            .is_none_or(|distance| distance > self.record)
    }

    /// Count the winning hold times.
    ///
    /// Distance rises up to half the race time, then falls symmetrically, so the winning holds are
    /// one interval centered on `time / 2`. Its first hold is found by binary search.
    fn winning_holds(self) -> u64 {
        let middle = self.time / 2;
        if !self.beats_record(middle) {
            return 0;
        }
        // invariant: `low` loses, `high` wins
        let (mut low, mut high) = (0, middle);
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            if self.beats_record(mid) {
                high = mid;
            } else {
                low = mid;
            }
        }
        let first = high;
        let last = self.time - first;
        last - first + 1
    }
}

/// The raw `Time:` and `Distance:` lines.
struct RaceSheet {
    times: String,
    distances: String,
}

impl ParseData for RaceSheet {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut lines = input.lines();
        let mut field = |prefix: &'static str| {
            lines
                .next()
                .and_then(|line| line.strip_prefix(prefix))
                .map(str::to_owned)
                .ok_or(ParseRaceSheetError::MissingLine(prefix))
        };
        Ok(Self {
            times: field("Time:")?,
            distances: field("Distance:")?,
        })
    }
}

/*
For part 1, the sheet has one race per column. Multiply the numbers of winning holds of each race.
*/

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &RaceSheet) -> DynamicResult<u64> {
        let times: Vec<u64> = parse_whitespace_separated(&input.times)?;
        let records: Vec<u64> = parse_whitespace_separated(&input.distances)?;
        if times.len() != records.len() {
            return Err(ParseRaceSheetError::UnevenColumns {
                times: times.len(),
                distances: records.len(),
            }
            .into());
        }

        let product = times
            .into_iter()
            .zip(records)
            .map(|(time, record)| Race { time, record }.winning_holds())
            .checked_product()
            .ok_or("product of winning holds overflowed")?;
        Ok(product)
    }
}

/*
For part 2, the spaces were a kerning mistake: each line is one number.
*/

fn join_digits(line: &str) -> DynamicResult<u64> {
    let digits: String = line.split_whitespace().collect();
    Ok(parse_with_context(&digits)?)
}

impl Solution<PartTwo> for Day06 {
    type Input = RaceSheet;
    type Output = u64;

    fn solve(input: &RaceSheet) -> DynamicResult<u64> {
        let race = Race {
            time: join_digits(&input.times)?,
            record: join_digits(&input.distances)?,
        };
        Ok(race.winning_holds())
    }
}
