use std::collections::HashSet;

use aoc_framework::parsing::{parse_input_lines, parse_whitespace_separated};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 4: Scratchcards", parsed = Cards, part_one = Day04, part_two = Day04)]
impl super::Day<4> {}

#[derive(Error, Debug)]
#[error("expected \"Card <id>: <winning numbers> | <numbers you have>\"")]
struct MalformedCard;

/*
Each scratchcard lists winning numbers, then a bar, then the numbers you have. Only how many of your
numbers are winning numbers matters.
*/

/// The number of matches on each card, in card order.
struct Cards(Vec<usize>);

fn count_matches(line: &str) -> DynamicResult<usize> {
    let (_, numbers) = line.split_once(':').ok_or(MalformedCard)?;
    let (winning, have) = numbers.split_once('|').ok_or(MalformedCard)?;

    let winning: HashSet<u32> = parse_whitespace_separated::<u32>(winning)?.into_iter().collect();
    let have: Vec<u32> = parse_whitespace_separated(have)?;
    Ok(have.iter().filter(|number| winning.contains(number)).count())
}

impl ParseData for Cards {
    fn parse(input: &str) -> DynamicResult<Self> {
        let matches = parse_input_lines(input, |_, line| count_matches(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(matches))
    }
}

/*
For part 1, a card with matches is worth one point for the first match, doubling for every match
after it. Sum the points.
*/

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = Cards;
    type Output = u64;

    fn solve(input: &Cards) -> DynamicResult<u64> {
        let points = input
            .0
            .iter()
            .filter(|&&matches| matches > 0)
            .map(|&matches| {
                u32::try_from(matches - 1)
                    .ok()
                    .and_then(|exponent| 2u64.checked_pow(exponent))
            })
            .collect::<Option<Vec<_>>>()
            .and_then(|points| points.into_iter().checked_sum())
            .ok_or("card points overflowed")?;
        Ok(points)
    }
}

/*
For part 2, a card with `n` matches wins one copy of each of the next `n` cards, and copies win
too. No card wins copies past the end of the table. Count all cards, originals and copies.
*/

impl Solution<PartTwo> for Day04 {
    type Input = Cards;
    type Output = u64;

    fn solve(input: &Cards) -> DynamicResult<u64> {
        let mut copies = vec![1u64; input.0.len()];
        for (index, &matches) in input.0.iter().enumerate() {
            let won = copies[index];
            let end = (index + 1 + matches).min(copies.len());
            for later in &mut copies[index + 1..end] {
                *later += won;
            }
        }
        let total = copies
            .into_iter()
            .checked_sum()
            .ok_or("card count overflowed")?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Cards::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 13);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Cards::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 30);
        Ok(())
    }

    #[test]
    fn matches_are_counted_per_card() -> DynamicResult<()> {
        let parsed = Cards::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.0, [4, 2, 2, 1, 0, 0]);
        Ok(())
    }
}
