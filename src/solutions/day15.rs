use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use thiserror::Error;

#[solution_runner(name = "Day 15: Lens Library", parsed = InitSequence, part_one = Day15, part_two = Day15)]
impl super::Day<15> {}

#[derive(Error, Debug)]
enum StepError {
    #[error("step {0:?} is neither \"<label>=<focal length>\" nor \"<label>-\"")]
    Malformed(String),
}

/*
The initialization sequence is a comma-separated list of steps on one line, with newlines ignored.
*/

struct InitSequence(Vec<String>);

impl ParseData for InitSequence {
    fn parse(input: &str) -> DynamicResult<Self> {
        let joined: String = input.lines().collect();
        let steps = joined
            .split(',')
            .filter(|step| !step.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(Self(steps))
    }
}

/// The Holiday ASCII String Helper algorithm: for each character, add its code, multiply by 17 and
/// keep the remainder modulo 256.
fn hash(text: &str) -> u8 {
    text.bytes()
        .fold(0, |value, byte| value.wrapping_add(byte).wrapping_mul(17))
}

/*
For part 1, sum the hash of every step.
*/

struct Day15;

impl Solution<PartOne> for Day15 {
    type Input = InitSequence;
    type Output = u32;

    fn solve(input: &InitSequence) -> DynamicResult<u32> {
        let sum = input
            .0
            .iter()
            .map(|step| u32::from(hash(step)))
            .checked_sum()
            .ok_or("sum of hashes overflowed")?;
        Ok(sum)
    }
}

/*
For part 2, 256 boxes hold lenses. Each step names a lens label, whose hash is the box it goes in.
`label-` removes the lens with that label from its box, if present. `label=N` replaces the lens with
that label by one of focal length `N`, keeping its slot, or else adds the lens to the back of the box.

The focusing power of a lens is its box number plus one, times its slot number counting from one,
times its focal length.
*/

#[derive(Debug)]
enum Operation<'a> {
    Remove(&'a str),
    Insert(&'a str, u8),
}

fn parse_step(step: &str) -> DynamicResult<Operation<'_>> {
    if let Some(label) = step.strip_suffix('-') {
        return Ok(Operation::Remove(label));
    }
    let (label, focal_length) = step
        .split_once('=')
        .ok_or_else(|| StepError::Malformed(step.to_owned()))?;
    Ok(Operation::Insert(label, parse_with_context(focal_length)?))
}

struct LensBoxes<'a> {
    boxes: Vec<Vec<(&'a str, u8)>>,
}

impl<'a> LensBoxes<'a> {
    fn new() -> Self {
        Self {
            boxes: vec![Vec::new(); 256],
        }
    }

    fn apply(&mut self, operation: Operation<'a>) {
        match operation {
            Operation::Remove(label) => {
                self.boxes[usize::from(hash(label))].retain(|&(other, _)| other != label);
            }
            Operation::Insert(label, focal_length) => {
                let lenses = &mut self.boxes[usize::from(hash(label))];
                match lenses.iter_mut().find(|(other, _)| *other == label) {
                    Some(lens) => lens.1 = focal_length,
                    None => lenses.push((label, focal_length)),
                }
            }
        }
    }

    fn focusing_power(&self) -> Option<usize> {
        (1..)
            .zip(&self.boxes)
            .flat_map(|(box_number, lenses)| {
                (1..).zip(lenses).map(move |(slot, &(_, focal_length))| {
                    box_number * slot * usize::from(focal_length)
                })
            })
            .checked_sum()
    }
}

impl Solution<PartTwo> for Day15 {
    type Input = InitSequence;
    type Output = usize;

    fn solve(input: &InitSequence) -> DynamicResult<usize> {
        let mut boxes = LensBoxes::new();
        for step in &input.0 {
            boxes.apply(parse_step(step)?);
        }
        Ok(boxes.focusing_power().ok_or("focusing power overflowed")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = InitSequence::parse(EXAMPLE_INPUT)?;
        let result = <Day15 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 1320);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = InitSequence::parse(EXAMPLE_INPUT)?;
        let result = <Day15 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 145);
        Ok(())
    }

    #[test]
    fn hashes_words() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn"), 0);
        assert_eq!(hash("qp"), 1);
    }

    #[test]
    fn steps_are_parsed() -> DynamicResult<()> {
        assert!(matches!(parse_step("cm-")?, Operation::Remove("cm")));
        assert!(matches!(parse_step("ot=7")?, Operation::Insert("ot", 7)));
        assert!(parse_step("ot").is_err());
        Ok(())
    }
}
