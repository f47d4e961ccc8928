use std::ops::Range;

use aoc_framework::parsing::{InputScanner, InvalidLine, parse_whitespace_separated};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 5: If You Give A Seed A Fertilizer", parsed = Almanac, part_one = Day05, part_two = Day05)]
impl super::Day<5> {}

#[derive(Error, Debug)]
enum ParseAlmanacError {
    #[error("expected the first line to start with \"seeds:\"")]
    MissingSeeds,

    #[error("expected a \"<from>-to-<to> map:\" header")]
    MissingMapHeader,

    #[error("expected \"<destination start> <source start> <length>\"")]
    MalformedRange,
}

/*
The almanac lists seeds, then a chain of maps from one category to the next: seed to soil, soil to
fertilizer, and so on up to location. Each map line shifts a range of source values to a range of
destination values. Values outside every range keep their number.
*/

/// Shifts values in `source` so that `source.start` lands on `destination`.
#[derive(Debug, Clone)]
struct Shift {
    source: Range<u64>,
    destination: u64,
}

impl Shift {
    fn apply(&self, value: u64) -> u64 {
        self.destination + (value - self.source.start)
    }
}

/// One category-to-category map, with shifts sorted by source start.
#[derive(Debug)]
struct CategoryMap {
    shifts: Vec<Shift>,
}

impl CategoryMap {
    fn map(&self, value: u64) -> u64 {
        self.shifts
            .iter()
            .find(|shift| shift.source.contains(&value))
            .map_or(value, |shift| shift.apply(value))
    }

    /// Map a whole range, splitting it where it crosses the edge of a shift.
    fn map_range(&self, range: Range<u64>) -> Vec<Range<u64>> {
        let mut mapped = Vec::new();
        let mut next = range.start;

        for shift in &self.shifts {
            if next >= range.end {
                break;
            }
            if shift.source.end <= next {
                continue;
            }
            if next < shift.source.start {
                let gap_end = shift.source.start.min(range.end);
                mapped.push(next..gap_end);
                next = gap_end;
            }
            let overlap_end = shift.source.end.min(range.end);
            if next < overlap_end {
                mapped.push(shift.apply(next)..shift.apply(overlap_end - 1) + 1);
                next = overlap_end;
            }
        }
        if next < range.end {
            mapped.push(next..range.end);
        }
        mapped
    }
}

struct Almanac {
    seeds: Vec<u64>,
    maps: Vec<CategoryMap>,
}

fn parse_shift(line: &str) -> DynamicResult<Shift> {
    match parse_whitespace_separated::<u64>(line)?.as_slice() {
        &[destination, start, length] => Ok(Shift {
            source: start..start + length,
            destination,
        }),
        _ => Err(ParseAlmanacError::MalformedRange.into()),
    }
}

impl ParseData for Almanac {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut scanner = InputScanner::new(input);
        let (index, first) = scanner.next_line("the seeds")?;
        let seeds = first
            .strip_prefix("seeds:")
            .ok_or(ParseAlmanacError::MissingSeeds)
            .map_err(|error| InvalidLine::new(index, error.into()))?;
        let seeds = parse_whitespace_separated(seeds)?;

        let mut maps = Vec::new();
        scanner.skip_blank_lines();
        while !scanner.is_finished() {
            let mut section = scanner.take_section();
            let (index, header) = section
                .next()
                .ok_or(ParseAlmanacError::MissingMapHeader)?;
            if !header.ends_with("map:") {
                let error = InvalidLine::new(index, ParseAlmanacError::MissingMapHeader.into());
                return Err(error.into());
            }

            let mut shifts = section
                .map(|(index, line)| {
                    parse_shift(line).map_err(|error| InvalidLine::new(index, error))
                })
                .collect::<Result<Vec<_>, _>>()?;
            shifts.sort_by_key(|shift| shift.source.start);
            maps.push(CategoryMap { shifts });
            scanner.skip_blank_lines();
        }
        debug!(seeds = seeds.len(), maps = maps.len(), "parsed almanac");

        Ok(Self { seeds, maps })
    }
}

impl Almanac {
    fn location(&self, seed: u64) -> u64 {
        self.maps.iter().fold(seed, |value, map| map.map(value))
    }
}

/*
For part 1, map every seed to its location and find the lowest location.
*/

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = Almanac;
    type Output = u64;

    fn solve(input: &Almanac) -> DynamicResult<u64> {
        let lowest = input
            .seeds
            .iter()
            .map(|&seed| input.location(seed))
            .min()
            .ok_or("almanac lists no seeds")?;
        Ok(lowest)
    }
}

/*
For part 2, the seeds line is really pairs of range start and range length. There are far too many
seeds to map one at a time, so whole ranges are mapped, splitting at shift edges.
*/

impl Solution<PartTwo> for Day05 {
    type Input = Almanac;
    type Output = u64;

    fn solve(input: &Almanac) -> DynamicResult<u64> {
        if input.seeds.len() % 2 != 0 {
            return Err("seed ranges should come in start and length pairs".into());
        }
        let seed_ranges: Vec<_> = input
            .seeds
            .chunks_exact(2)
            .map(|pair| pair[0]..pair[0] + pair[1])
            .collect();

        let locations = input.maps.iter().fold(seed_ranges, |ranges, map| {
            ranges
                .into_iter()
                .flat_map(|range| map.map_range(range))
                .collect()
        });

        let lowest = locations
            .iter()
            .filter(|range| !range.is_empty())
            .map(|range| range.start)
            .min()
            .ok_or("no seed ranges to map")?;
        Ok(lowest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 35);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Almanac::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn range_is_split_at_shift_edges() {
        let map = CategoryMap {
            shifts: vec![Shift {
                source: 10..20,
                destination: 100,
            }],
        };
        assert_eq!(map.map_range(5..25), vec![5..10, 100..110, 20..25]);
        assert_eq!(map.map_range(12..15), vec![102..105]);
        assert_eq!(map.map_range(30..40), vec![30..40]);
    }
}
