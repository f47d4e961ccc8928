use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 12: Hot Springs", parsed = ConditionRecords, part_one = Day12, part_two = Day12)]
impl super::Day<12> {}

#[derive(Error, Debug)]
enum ParseRecordError {
    #[error("expected \"<springs> <group sizes>\"")]
    Format,

    #[error("unknown spring condition {0:?}")]
    UnknownCondition(char),
}

/*
Each record lists springs as operational (`.`), damaged (`#`) or unknown (`?`), followed by the sizes
of each contiguous group of damaged springs in order. Count the ways to fill in the unknown springs
that agree with the group sizes.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spring {
    Operational,
    Damaged,
    Unknown,
}

#[derive(Debug, Clone)]
struct Record {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

fn parse_record(line: &str) -> DynamicResult<Record> {
    let (springs, groups) = line.split_once(' ').ok_or(ParseRecordError::Format)?;
    let springs = springs
        .chars()
        .map(|ch| match ch {
            '.' => Ok(Spring::Operational),
            '#' => Ok(Spring::Damaged),
            '?' => Ok(Spring::Unknown),
            other => Err(ParseRecordError::UnknownCondition(other)),
        })
        .collect::<Result<_, _>>()?;
    let groups = groups
        .trim()
        .split(',')
        .map(parse_with_context)
        .collect::<Result<_, _>>()?;
    Ok(Record { springs, groups })
}

struct ConditionRecords(Vec<Record>);

impl ParseData for ConditionRecords {
    fn parse(input: &str) -> DynamicResult<Self> {
        let records = parse_input_lines(input, |_, line| parse_record(line))
            .collect::<Result<_, _>>()?;
        Ok(Self(records))
    }
}

/// Counts arrangements of one record, remembering the count for each (spring, group) offset pair.
struct Arrangements<'a> {
    record: &'a Record,
    memo: HashMap<(usize, usize), u64>,
}

impl<'a> Arrangements<'a> {
    fn count(record: &'a Record) -> u64 {
        let mut arrangements = Self {
            record,
            memo: HashMap::new(),
        };
        arrangements.count_from(0, 0)
    }

    /// Arrangements of the springs from `spring` on that match the groups from `group` on.
    fn count_from(&mut self, spring: usize, group: usize) -> u64 {
        if let Some(&known) = self.memo.get(&(spring, group)) {
            return known;
        }
        let springs = &self.record.springs[spring.min(self.record.springs.len())..];
        let count = match (springs.first(), self.record.groups.get(group)) {
            (None, None) => 1,
            (None, Some(_)) => 0,
            (Some(_), None) => u64::from(!springs.contains(&Spring::Damaged)),
            (Some(&first), Some(&size)) => {
                let mut count = 0;
                if first != Spring::Damaged {
                    count += self.count_from(spring + 1, group);
                }
                if first != Spring::Operational && fits_group(springs, size) {
                    // the group plus the operational spring that must end it
                    count += self.count_from(spring + size + 1, group + 1);
                }
                count
            }
        };
        self.memo.insert((spring, group), count);
        count
    }
}

/// Whether a damaged group of `size` can start at the front of `springs`.
fn fits_group(springs: &[Spring], size: usize) -> bool {
    springs.len() >= size
        && !springs[..size].contains(&Spring::Operational)
        && springs.get(size) != Some(&Spring::Damaged)
}

/*
For part 1, sum the arrangement counts of every record.
*/

struct Day12;

impl Solution<PartOne> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &ConditionRecords) -> DynamicResult<u64> {
        let sum = input
            .0
            .iter()
            .map(Arrangements::count)
            .checked_sum()
            .ok_or("sum of arrangements overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, the records were folded. Unfold each one by repeating its springs five times, joined by
unknown springs, and its group sizes five times.
*/

fn unfold(record: &Record) -> Record {
    let mut springs = record.springs.clone();
    for _ in 1..5 {
        springs.push(Spring::Unknown);
        springs.extend_from_slice(&record.springs);
    }
    Record {
        springs,
        groups: record.groups.repeat(5),
    }
}

impl Solution<PartTwo> for Day12 {
    type Input = ConditionRecords;
    type Output = u64;

    fn solve(input: &ConditionRecords) -> DynamicResult<u64> {
        let sum = input
            .0
            .iter()
            .map(|record| Arrangements::count(&unfold(record)))
            .checked_sum()
            .ok_or("sum of unfolded arrangements overflowed")?;
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = ConditionRecords::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 21);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = ConditionRecords::parse(EXAMPLE_INPUT)?;
        let result = <Day12 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 525_152);
        Ok(())
    }

    #[test]
    fn counts_single_records() -> DynamicResult<()> {
        assert_eq!(Arrangements::count(&parse_record("?###???????? 3,2,1")?), 10);
        assert_eq!(Arrangements::count(&parse_record("#.# 1,1")?), 1);
        assert_eq!(Arrangements::count(&parse_record("### 1,1")?), 0);
        Ok(())
    }

    #[test]
    fn unfolded_record_repeats_groups() -> DynamicResult<()> {
        let unfolded = unfold(&parse_record(".# 1")?);
        assert_eq!(unfolded.springs.len(), 14);
        assert_eq!(unfolded.groups, vec![1; 5]);
        Ok(())
    }
}
