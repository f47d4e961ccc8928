use std::str::FromStr;
use std::sync::LazyLock;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicError, DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use regex::Regex;
use thiserror::Error;

#[solution_runner(name = "Day 2: Cube Conundrum", parsed = Games, part_one = Day02, part_two = Day02)]
impl super::Day<2> {}

#[derive(Error, Debug)]
enum ParseGameError {
    #[error("expected \"Game <id>: <reveals>\", found {0:?}")]
    Header(String),

    #[error("expected \"<count> <color>\", found {0:?}")]
    CubeCount(String),

    #[error("{0} is counted twice in {1:?}")]
    RepeatedColor(String, String),
}

/*
An elf plays several games with a bag of red, green and blue cubes. In each game it reveals a few
handfuls from the bag, separated by semicolons, putting the cubes back each time.
*/

/// Cube counts by color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    /// The smallest set of cubes containing both `self` and `other`.
    fn union(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_within(self, bag: Self) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(self) -> u32 {
        self.red * self.green * self.blue
    }
}

static CUBE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+) (red|green|blue)\s*$").expect("cube count pattern should be valid")
});

impl FromStr for Cubes {
    type Err = DynamicError;

    fn from_str(reveal: &str) -> Result<Self, Self::Err> {
        let mut cubes = Self::default();
        let mut seen = Vec::with_capacity(3);

        for part in reveal.split(',') {
            let captures = CUBE_COUNT
                .captures(part)
                .ok_or_else(|| ParseGameError::CubeCount(part.to_owned()))?;
            let (_, [count, color]) = captures.extract();
            if seen.contains(&color) {
                let repeated = ParseGameError::RepeatedColor(color.to_owned(), reveal.to_owned());
                return Err(repeated.into());
            }
            seen.push(color);

            let count = parse_with_context(count)?;
            match color {
                "red" => cubes.red = count,
                "green" => cubes.green = count,
                _ => cubes.blue = count,
            }
        }
        Ok(cubes)
    }
}

#[derive(Debug)]
struct Game {
    id: u32,
    reveals: Vec<Cubes>,
}

impl Game {
    /// The fewest cubes the bag could have held for every reveal to be possible.
    fn minimum_bag(&self) -> Cubes {
        self.reveals
            .iter()
            .fold(Cubes::default(), |bag, &reveal| bag.union(reveal))
    }
}

impl FromStr for Game {
    type Err = DynamicError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let header_error = || ParseGameError::Header(line.to_owned());
        let (header, reveals) = line.split_once(':').ok_or_else(header_error)?;
        let id = header.strip_prefix("Game ").ok_or_else(header_error)?;

        Ok(Self {
            id: parse_with_context(id)?,
            reveals: reveals
                .split(';')
                .map(str::parse)
                .collect::<Result<_, _>>()?,
        })
    }
}

struct Games(Vec<Game>);

impl ParseData for Games {
    fn parse(input: &str) -> DynamicResult<Self> {
        let games = parse_input_lines(input, |_, line| line.parse())
            .collect::<Result<_, _>>()?;
        Ok(Self(games))
    }
}

/*
For part 1, sum the IDs of games that were possible with only 12 red, 13 green and 14 blue cubes.
*/

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Games;
    type Output = u32;

    fn solve(input: &Games) -> DynamicResult<u32> {
        let sum = input
            .0
            .iter()
            .filter(|game| game.minimum_bag().fits_within(BAG))
            .map(|game| game.id)
            .checked_sum()
            .ok_or("sum of game IDs overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, find the fewest cubes of each color that make a game possible. Its power is the product
of the three counts. Sum the powers of all games.
*/

impl Solution<PartTwo> for Day02 {
    type Input = Games;
    type Output = u32;

    fn solve(input: &Games) -> DynamicResult<u32> {
        let sum = input
            .0
            .iter()
            .map(|game| game.minimum_bag().power())
            .checked_sum()
            .ok_or("sum of powers overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Games::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2286);
        Ok(())
    }

    #[test]
    fn minimum_bag_of_first_game() -> DynamicResult<()> {
        let game: Game = "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green".parse()?;
        let expected = Cubes {
            red: 4,
            green: 2,
            blue: 6,
        };
        assert_eq!(game.minimum_bag(), expected);
        Ok(())
    }

    #[test]
    fn repeated_color_is_rejected() {
        assert!("Game 9: 1 red, 2 red".parse::<Game>().is_err());
        assert!("Game 9: 1 purple".parse::<Game>().is_err());
    }
}
