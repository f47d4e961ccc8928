use std::collections::{HashMap, HashSet};

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use grid_search::{Grid, Position};

#[solution_runner(name = "Day 3: Gear Ratios", parsed = Schematic, part_one = Day03, part_two = Day03)]
impl super::Day<3> {}

/*
The engine schematic is a grid of digits, symbols and `.` for empty space. A run of digits along a
row is a number. Any character other than a digit or `.` is a symbol.
*/

/// A number in the schematic, with the symbols touching any of its digits, diagonals included.
#[derive(Debug)]
struct SchematicNumber {
    value: u32,
    adjacent_symbols: HashSet<Position>,
}

struct Schematic {
    grid: Grid<char>,
    numbers: Vec<SchematicNumber>,
}

fn is_symbol(ch: char) -> bool {
    ch != '.' && !ch.is_ascii_digit()
}

impl ParseData for Schematic {
    fn parse(input: &str) -> DynamicResult<Self> {
        let grid = Grid::parse(input, Some)?;
        let mut numbers = Vec::new();

        for row in 0..grid.height() {
            let mut current: Option<SchematicNumber> = None;
            for col in 0..grid.width() {
                let position = Position::new(row, col);
                match grid[position].to_digit(10) {
                    Some(digit) => {
                        let number = current.get_or_insert_with(|| SchematicNumber {
                            value: 0,
                            adjacent_symbols: HashSet::new(),
                        });
                        number.value = number.value * 10 + digit;
                        number.adjacent_symbols.extend(
                            grid.surrounding(position)
                                .filter(|&next| is_symbol(grid[next])),
                        );
                    }
                    None => numbers.extend(current.take()),
                }
            }
            numbers.extend(current);
        }

        Ok(Self { grid, numbers })
    }
}

/*
For part 1, a part number is a number adjacent to at least one symbol. Sum the part numbers.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = Schematic;
    type Output = u32;

    fn solve(input: &Schematic) -> DynamicResult<u32> {
        let sum = input
            .numbers
            .iter()
            .filter(|number| !number.adjacent_symbols.is_empty())
            .map(|number| number.value)
            .checked_sum()
            .ok_or("part number sum overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, a gear is a `*` adjacent to exactly two numbers. Its ratio is the product of the two.
Sum all gear ratios.
*/

impl Solution<PartTwo> for Day03 {
    type Input = Schematic;
    type Output = u64;

    fn solve(input: &Schematic) -> DynamicResult<u64> {
        let mut stars: HashMap<Position, Vec<u64>> = HashMap::new();
        for number in &input.numbers {
            for &symbol in &number.adjacent_symbols {
                if input.grid[symbol] == '*' {
                    stars.entry(symbol).or_default().push(u64::from(number.value));
                }
            }
        }

        let sum = stars
            .values()
            .filter_map(|numbers| match numbers.as_slice() {
                &[a, b] => Some(a * b),
                _ => None,
            })
            .checked_sum()
            .ok_or("gear ratio sum overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4361);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Schematic::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 467_835);
        Ok(())
    }

    #[test]
    fn numbers_end_at_the_row_edge() -> DynamicResult<()> {
        let parsed = Schematic::parse("..12\n34#.\n")?;
        let values: Vec<_> = parsed.numbers.iter().map(|number| number.value).collect();
        assert_eq!(values, [12, 34]);
        assert!(parsed.numbers.iter().all(|number| number.adjacent_symbols.len() == 1));
        Ok(())
    }
}
