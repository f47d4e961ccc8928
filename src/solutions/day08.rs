use std::collections::HashMap;
use std::sync::LazyLock;

use aoc_framework::parsing::{InputScanner, InvalidLine};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 8: Haunted Wasteland", parsed = Network, part_one = Day08, part_two = Day08)]
impl super::Day<8> {}

#[derive(Error, Debug)]
enum NetworkError {
    #[error("instruction {0:?} is neither L nor R")]
    UnknownInstruction(char),

    #[error("expected \"<node> = (<left>, <right>)\"")]
    MalformedNode,

    #[error("node {0} is not in the network")]
    UnknownNode(String),

    #[error("no node ending in Z is reached from {0}")]
    NoExit(String),
}

/*
The input is a list of left/right instructions, then a network of nodes each leading to a left and
a right node. Instructions are followed in order and repeat once exhausted.
*/

#[derive(Debug, Clone, Copy)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
struct Network {
    instructions: Vec<Turn>,
    nodes: HashMap<String, (String, String)>,
}

static NODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+) = \((\w+), (\w+)\)$").expect("node pattern should be valid")
});

impl ParseData for Network {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut scanner = InputScanner::new(input);
        let (_, line) = scanner.next_line("the instructions")?;
        let instructions = line
            .trim()
            .chars()
            .map(|ch| match ch {
                'L' => Ok(Turn::Left),
                'R' => Ok(Turn::Right),
                other => Err(NetworkError::UnknownInstruction(other)),
            })
            .collect::<Result<_, _>>()?;

        scanner.skip_blank_lines();
        let nodes = scanner
            .take_section()
            .map(|(index, line)| {
                let captures = NODE
                    .captures(line.trim())
                    .ok_or_else(|| InvalidLine::new(index, NetworkError::MalformedNode.into()))?;
                let (_, [node, left, right]) = captures.extract();
                Ok((node.to_owned(), (left.to_owned(), right.to_owned())))
            })
            .collect::<Result<_, InvalidLine>>()?;

        Ok(Self {
            instructions,
            nodes,
        })
    }
}

impl Network {
    /// Follow the instructions from `start` until `is_end` holds, counting the steps.
    ///
    /// Gives up after visiting more (node, instruction) pairs than exist, since the walk has then
    /// entered a loop without an end.
    fn steps_until<F>(&self, start: &str, is_end: F) -> DynamicResult<u64>
    where
        F: Fn(&str) -> bool,
    {
        let limit = self.nodes.len() * self.instructions.len();
        let mut node = start;
        for (steps, turn) in self.instructions.iter().cycle().take(limit + 1).enumerate() {
            if is_end(node) {
                return Ok(u64::try_from(steps)?);
            }
            let (left, right) = self
                .nodes
                .get(node)
                .ok_or_else(|| NetworkError::UnknownNode(node.to_owned()))?;
            node = match turn {
                Turn::Left => left.as_str(),
                Turn::Right => right.as_str(),
            };
        }
        Err(NetworkError::NoExit(start.to_owned()).into())
    }
}

/*
For part 1, count the steps from AAA to ZZZ.
*/

struct Day08;

impl Solution<PartOne> for Day08 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Network) -> DynamicResult<u64> {
        input.steps_until("AAA", |node| node == "ZZZ")
    }
}

/*
For part 2, walk from every node ending in A at once, until all of them stand on nodes ending in Z.
Each walk reaches its first Z node after a fixed number of steps and then cycles with that period,
so the walks all line up at the least common multiple of those step counts.
*/

impl Solution<PartTwo> for Day08 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Network) -> DynamicResult<u64> {
        let mut starts: Vec<_> = input
            .nodes
            .keys()
            .filter(|node| node.ends_with('A'))
            .collect();
        starts.sort();

        let mut steps = 1;
        for start in starts {
            let period = input.steps_until(start, |node| node.ends_with('Z'))?;
            debug!(%start, period, "ghost walk period");
            steps = num_integer::lcm(steps, period);
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_first_example() -> DynamicResult<()> {
        let parsed = Network::parse(
            "RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)
",
        )?;
        let result = <Day08 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn part_one_solves_repeating_example() -> DynamicResult<()> {
        let parsed = Network::parse(
            "LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
",
        )?;
        let result = <Day08 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(
            "LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
",
        )?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn endless_walk_is_an_error() -> DynamicResult<()> {
        let parsed = Network::parse("L\n\nAAA = (BBB, BBB)\nBBB = (AAA, AAA)\n")?;
        assert!(<Day08 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }
}
