use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 1: Trebuchet?!", part_one = Day01, part_two = Day01)]
impl super::Day<1> {}

#[derive(Error, Debug)]
#[error("no digit or spelled digit in line")]
struct NoDigitInLine;

/*
Each line of the calibration document hides a two-digit value: its first digit followed by its last
digit. A line with one digit uses it twice. The answer is the sum of the values.

For part 1, only the characters '0' to '9' are digits, and a line without any adds nothing.
*/

type Calibration = u32;

/// The value of the first and last digit produced by `digit_at` scanning a line from each end.
///
/// `digit_at` looks at the line from a byte offset on and reports a digit starting there.
fn calibration<F>(line: &str, digit_at: F) -> Option<Calibration>
where
    F: Fn(&str) -> Option<u8>,
{
    let starts = || line.char_indices().map(|(index, _)| &line[index..]);
    let first = starts().find_map(&digit_at)?;
    let last = starts().rev().find_map(&digit_at)?;
    Some(Calibration::from(first * 10 + last))
}

fn leading_numeral(text: &str) -> Option<u8> {
    text.chars()
        .next()?
        .to_digit(10)
        .and_then(|digit| u8::try_from(digit).ok())
}

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = str;
    type Output = Calibration;

    fn solve(input: &str) -> DynamicResult<Calibration> {
        let sum = input
            .lines()
            .filter_map(|line| calibration(line, leading_numeral))
            .checked_sum()
            .ok_or("calibration sum overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, digits may also be spelled out from "one" to "nine". Spellings may overlap, so
"twone" starts with a 2 and ends with a 1. Every line must now contain a digit.
*/

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

fn leading_digit(text: &str) -> Option<u8> {
    leading_numeral(text).or_else(|| {
        (1..)
            .zip(SPELLED_DIGITS)
            .find_map(|(value, word)| text.starts_with(word).then_some(value))
    })
}

impl Solution<PartTwo> for Day01 {
    type Input = str;
    type Output = Calibration;

    fn solve(input: &str) -> DynamicResult<Calibration> {
        let values = parse_input_lines(input, |_, line| {
            Ok(calibration(line, leading_digit).ok_or(NoDigitInLine)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
        let sum = values
            .into_iter()
            .checked_sum()
            .ok_or("calibration sum overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let input = "1abc2
pqr3stu8vwx
a1b2c3d4e5f
treb7uchet
";
        let result = <Day01 as Solution<PartOne>>::solve(input)?;
        assert_eq!(result, 142);
        Ok(())
    }

    #[test]
    fn part_one_skips_lines_without_digits() -> DynamicResult<()> {
        let result = <Day01 as Solution<PartOne>>::solve("abc\n4x\n")?;
        assert_eq!(result, 44);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let input = "two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen
";
        let result = <Day01 as Solution<PartTwo>>::solve(input)?;
        assert_eq!(result, 281);
        Ok(())
    }

    #[test]
    fn overlapping_spellings_count_at_both_ends() {
        assert_eq!(calibration("twone", leading_digit), Some(21));
        assert_eq!(calibration("eighthree", leading_digit), Some(83));
    }

    #[test]
    fn part_two_rejects_lines_without_digits() {
        assert!(<Day01 as Solution<PartTwo>>::solve("one\nzero\n").is_err());
    }
}
