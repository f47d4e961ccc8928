use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use aoc_framework::parsing::{InputScanner, InvalidLine, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use regex::Regex;
use thiserror::Error;

use crate::checked_product::CheckedProduct;

#[solution_runner(name = "Day 19: Aplenty", parsed = System, part_one = Day19, part_two = Day19)]
impl super::Day<19> {}

#[derive(Error, Debug)]
enum SortingError {
    #[error("expected \"<name>{{<rules>}}\"")]
    MalformedWorkflow,

    #[error("expected \"<category><op><value>:<target>\" but found {0:?}")]
    MalformedRule(String),

    #[error("expected \"{{x=<n>,m=<n>,a=<n>,s=<n>}}\"")]
    MalformedPart,

    #[error("workflow {0} does not exist")]
    UnknownWorkflow(String),

    #[error("no rule of workflow {0} applies")]
    NoMatchingRule(String),

    #[error("workflows loop back through {0}")]
    Cycle(String),

    #[error("count of accepted combinations overflowed")]
    Overflow,
}

/*
The system has workflows, a blank line, then parts. A part has four ratings, one per category
(`x`, `m`, `a` and `s`). Every part starts at the workflow `in`. A workflow's rules are tried in order
and the first one whose condition holds sends the part on, either to another workflow or to `A`
(accepted) or `R` (rejected). The last rule has no condition.
*/

#[derive(Debug, Clone, Copy)]
enum Category {
    X,
    M,
    A,
    S,
}

impl Category {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::M => 1,
            Self::A => 2,
            Self::S => 3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Less,
    Greater,
}

#[derive(Debug)]
struct Condition {
    category: Category,
    comparison: Comparison,
    value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Accept,
    Reject,
    Workflow(String),
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        match name {
            "A" => Self::Accept,
            "R" => Self::Reject,
            _ => Self::Workflow(name.to_owned()),
        }
    }
}

#[derive(Debug)]
struct Rule {
    condition: Option<Condition>,
    target: Target,
}

type Part = [u32; 4];

#[derive(Debug)]
struct System {
    workflows: HashMap<String, Vec<Rule>>,
    parts: Vec<Part>,
}

static WORKFLOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\{(.*)\}$").expect("workflow pattern should be valid")
});

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([xmas])([<>])(\d+):(\w+)$").expect("condition pattern should be valid")
});

static PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$").expect("part pattern should be valid")
});

fn parse_rule(text: &str) -> DynamicResult<Rule> {
    let Some(captures) = CONDITION.captures(text) else {
        if text.contains([':', '<', '>']) {
            return Err(SortingError::MalformedRule(text.to_owned()).into());
        }
        return Ok(Rule {
            condition: None,
            target: Target::from(text),
        });
    };
    let (_, [category, comparison, value, target]) = captures.extract();
    let category = match category {
        "x" => Category::X,
        "m" => Category::M,
        "a" => Category::A,
        _ => Category::S,
    };
    let comparison = if comparison == "<" {
        Comparison::Less
    } else {
        Comparison::Greater
    };
    Ok(Rule {
        condition: Some(Condition {
            category,
            comparison,
            value: parse_with_context(value)?,
        }),
        target: Target::from(target),
    })
}

fn parse_workflow(line: &str) -> DynamicResult<(String, Vec<Rule>)> {
    let captures = WORKFLOW
        .captures(line.trim())
        .ok_or(SortingError::MalformedWorkflow)?;
    let (_, [name, rules]) = captures.extract();
    let rules = rules.split(',').map(parse_rule).collect::<Result<_, _>>()?;
    Ok((name.to_owned(), rules))
}

fn parse_part(line: &str) -> DynamicResult<Part> {
    let captures = PART
        .captures(line.trim())
        .ok_or(SortingError::MalformedPart)?;
    let (_, ratings) = captures.extract::<4>();
    let mut part = [0; 4];
    for (rating, text) in part.iter_mut().zip(ratings) {
        *rating = parse_with_context(text)?;
    }
    Ok(part)
}

impl ParseData for System {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut scanner = InputScanner::new(input);
        let workflows = scanner
            .take_section()
            .map(|(index, line)| parse_workflow(line).map_err(|e| InvalidLine::new(index, e)))
            .collect::<Result<_, _>>()?;
        scanner.skip_blank_lines();
        let parts = scanner
            .take_section()
            .map(|(index, line)| parse_part(line).map_err(|e| InvalidLine::new(index, e)))
            .collect::<Result<_, _>>()?;
        Ok(Self { workflows, parts })
    }
}

impl System {
    fn rules(&self, name: &str) -> Result<&[Rule], SortingError> {
        self.workflows
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SortingError::UnknownWorkflow(name.to_owned()))
    }

    fn accepts(&self, part: &Part) -> Result<bool, SortingError> {
        let mut name = "in";
        // a workflow seen twice would send the part around forever
        for _ in 0..=self.workflows.len() {
            let rule = self
                .rules(name)?
                .iter()
                .find(|rule| {
                    rule.condition.as_ref().is_none_or(|condition| {
                        let rating = part[condition.category.index()];
                        match condition.comparison {
                            Comparison::Less => rating < condition.value,
                            Comparison::Greater => rating > condition.value,
                        }
                    })
                })
                .ok_or_else(|| SortingError::NoMatchingRule(name.to_owned()))?;
            match &rule.target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => name = next.as_str(),
            }
        }
        Err(SortingError::Cycle(name.to_owned()))
    }
}

/*
For part 1, add up the ratings of every accepted part.
*/

struct Day19;

impl Solution<PartOne> for Day19 {
    type Input = System;
    type Output = u64;

    fn solve(input: &System) -> DynamicResult<u64> {
        let mut total = 0;
        for part in &input.parts {
            if input.accepts(part)? {
                total += part.iter().copied().map(u64::from).sum::<u64>();
            }
        }
        Ok(total)
    }
}

/*
For part 2, every rating can be anything from 1 to 4000. Count the distinct combinations of ratings
the workflows accept. Each rule splits a box of rating ranges into the part that matches its
condition and the part left for the following rules.
*/

type RatingBox = [RangeInclusive<u32>; 4];

fn combinations(ratings: &RatingBox) -> Result<u64, SortingError> {
    ratings
        .iter()
        .map(|range| u64::from(range.end() + 1 - range.start()))
        .checked_product()
        .ok_or(SortingError::Overflow)
}

/// Split `range` into the ratings meeting `comparison` against `value` and the ratings that do not.
/// Either side may be empty.
fn split_range(
    range: &RangeInclusive<u32>,
    comparison: Comparison,
    value: u32,
) -> (RangeInclusive<u32>, RangeInclusive<u32>) {
    let (start, end) = (*range.start(), *range.end());
    match comparison {
        Comparison::Less => (start..=end.min(value.saturating_sub(1)), start.max(value)..=end),
        Comparison::Greater => (start.max(value.saturating_add(1))..=end, start..=end.min(value)),
    }
}

impl System {
    fn route(
        &self,
        target: &Target,
        ratings: RatingBox,
        depth: usize,
    ) -> Result<u64, SortingError> {
        match target {
            Target::Accept => combinations(&ratings),
            Target::Reject => Ok(0),
            Target::Workflow(next) => self.accepted_combinations(next, ratings, depth + 1),
        }
    }

    fn accepted_combinations(
        &self,
        name: &str,
        mut ratings: RatingBox,
        depth: usize,
    ) -> Result<u64, SortingError> {
        if depth > self.workflows.len() {
            return Err(SortingError::Cycle(name.to_owned()));
        }
        let mut total: u64 = 0;
        for rule in self.rules(name)? {
            let Some(condition) = &rule.condition else {
                let rest = self.route(&rule.target, ratings, depth)?;
                return total.checked_add(rest).ok_or(SortingError::Overflow);
            };
            let index = condition.category.index();
            let (pass, fail) = split_range(&ratings[index], condition.comparison, condition.value);
            if !pass.is_empty() {
                let mut matched = ratings.clone();
                matched[index] = pass;
                let accepted = self.route(&rule.target, matched, depth)?;
                total = total.checked_add(accepted).ok_or(SortingError::Overflow)?;
            }
            if fail.is_empty() {
                return Ok(total);
            }
            ratings[index] = fail;
        }
        Err(SortingError::NoMatchingRule(name.to_owned()))
    }
}

impl Solution<PartTwo> for Day19 {
    type Input = System;
    type Output = u64;

    fn solve(input: &System) -> DynamicResult<u64> {
        let all = [1..=4000, 1..=4000, 1..=4000, 1..=4000];
        Ok(input.accepted_combinations("in", all, 0)?)
    }
}
