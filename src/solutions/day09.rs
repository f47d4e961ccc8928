use aoc_framework::parsing::{parse_input_lines, parse_whitespace_separated};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(name = "Day 9: Mirage Maintenance", parsed = Report, part_one = Day09, part_two = Day09)]
impl super::Day<9> {}

/*
Each line is the history of a sensor value. Taking differences between neighboring values again and
again eventually gives a row of zeros, and working back up from that row extends the history.
*/

struct Report(Vec<Vec<i64>>);

impl ParseData for Report {
    fn parse(input: &str) -> DynamicResult<Self> {
        let histories = parse_input_lines(input, |_, line| {
            Ok(parse_whitespace_separated::<i64>(line)?)
        })
        .collect::<Result<_, _>>()?;
        Ok(Self(histories))
    }
}

/// The value following `history`.
///
/// Extending each difference row by its last value and summing up the rows is the same as summing
/// the last value of every row.
fn extrapolate(history: &[i64]) -> i64 {
    let mut row = history.to_vec();
    let mut next = 0;
    while row.iter().any(|&value| value != 0) {
        next += row.last().copied().unwrap_or_default();
        row = row.windows(2).map(|pair| pair[1] - pair[0]).collect();
    }
    next
}

/*
For part 1, sum the next value of every history.
*/

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = Report;
    type Output = i64;

    fn solve(input: &Report) -> DynamicResult<i64> {
        let sum = input
            .0
            .iter()
            .map(|history| extrapolate(history))
            .checked_sum()
            .ok_or("sum of next values overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, sum the values that would come before each history. That is the next value of the
history read backwards.
*/

impl Solution<PartTwo> for Day09 {
    type Input = Report;
    type Output = i64;

    fn solve(input: &Report) -> DynamicResult<i64> {
        let sum = input
            .0
            .iter()
            .map(|history| {
                let reversed: Vec<_> = history.iter().rev().copied().collect();
                extrapolate(&reversed)
            })
            .checked_sum()
            .ok_or("sum of previous values overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Report::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 114);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Report::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn constant_history_repeats() {
        assert_eq!(extrapolate(&[7, 7, 7]), 7);
        assert_eq!(extrapolate(&[]), 0);
    }
}
