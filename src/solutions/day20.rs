use std::collections::{HashMap, VecDeque};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 20: Pulse Propagation", parsed = Network, part_one = Day20, part_two = Day20)]
impl super::Day<20> {}

#[derive(Error, Debug)]
enum NetworkError {
    #[error("expected \"<module> -> <destinations>\"")]
    Format,

    #[error("module {0} is declared twice")]
    Duplicate(String),

    #[error("there is no broadcaster module")]
    MissingBroadcaster,

    #[error("module {0} is not fed by exactly one conjunction")]
    UnsupportedFeed(String),

    #[error("{0} never received every high pulse it waits for")]
    NoPeriod(String),
}

/*
Modules pass pulses, each high or low, to their destination modules. Pressing the button sends a low
pulse to the broadcaster, and pulses are handled in the order they were sent.
- The broadcaster repeats every pulse to all its destinations.
- A flip-flop (`%`) ignores high pulses. A low pulse toggles it, and it sends high if it turned on
  or low if it turned off.
- A conjunction (`&`) remembers the last pulse from each of its inputs, all low at first. After
  updating that memory it sends low if every input last sent high, and high otherwise.
Destinations that are never declared only receive pulses.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pulse {
    Low,
    High,
}

#[derive(Debug, Clone)]
enum Module {
    Broadcaster,
    FlipFlop { on: bool },
    Conjunction { memory: HashMap<usize, Pulse> },
    Output,
}

impl Module {
    /// Handle a pulse from module `from`, returning the pulse to send on, if any.
    fn receive(&mut self, from: usize, pulse: Pulse) -> Option<Pulse> {
        match self {
            Self::Broadcaster => Some(pulse),
            Self::FlipFlop { on } => (pulse == Pulse::Low).then(|| {
                *on = !*on;
                if *on { Pulse::High } else { Pulse::Low }
            }),
            Self::Conjunction { memory } => {
                memory.insert(from, pulse);
                let all_high = memory.values().all(|&last| last == Pulse::High);
                Some(if all_high { Pulse::Low } else { Pulse::High })
            }
            Self::Output => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Network {
    names: Vec<String>,
    modules: Vec<Module>,
    destinations: Vec<Vec<usize>>,
    broadcaster: usize,
}

/// Assigns each module name an index in order of first mention.
#[derive(Default)]
struct Names {
    indices: HashMap<String, usize>,
    names: Vec<String>,
}

impl Names {
    fn index(&mut self, name: &str) -> usize {
        if let Some(&index) = self.indices.get(name) {
            return index;
        }
        let index = self.names.len();
        self.indices.insert(name.to_owned(), index);
        self.names.push(name.to_owned());
        index
    }
}

impl ParseData for Network {
    fn parse(input: &str) -> DynamicResult<Self> {
        let declarations: Vec<(&str, Vec<&str>)> = parse_input_lines(input, |_, line| {
            let (module, destinations) = line.split_once(" -> ").ok_or(NetworkError::Format)?;
            Ok((module.trim(), destinations.split(',').map(str::trim).collect()))
        })
        .collect::<Result<_, _>>()?;

        let mut names = Names::default();
        let mut kinds = HashMap::new();
        let mut edges = Vec::new();
        for (module, destinations) in declarations {
            let (kind, name) = match module.split_at_checked(1) {
                Some(("%", name)) => (Module::FlipFlop { on: false }, name),
                Some(("&", name)) => (
                    Module::Conjunction {
                        memory: HashMap::new(),
                    },
                    name,
                ),
                _ => (Module::Broadcaster, module),
            };
            if name != "broadcaster" && matches!(kind, Module::Broadcaster) {
                return Err(NetworkError::Format.into());
            }
            let index = names.index(name);
            if kinds.insert(index, kind).is_some() {
                return Err(NetworkError::Duplicate(name.to_owned()).into());
            }
            for destination in destinations {
                edges.push((index, names.index(destination)));
            }
        }

        let mut modules: Vec<_> = (0..names.names.len())
            .map(|index| kinds.remove(&index).unwrap_or(Module::Output))
            .collect();
        let mut destinations = vec![Vec::new(); modules.len()];
        for (from, to) in edges {
            destinations[from].push(to);
            if let Module::Conjunction { memory } = &mut modules[to] {
                memory.insert(from, Pulse::Low);
            }
        }
        let broadcaster = names
            .indices
            .get("broadcaster")
            .copied()
            .ok_or(NetworkError::MissingBroadcaster)?;

        Ok(Self {
            names: names.names,
            modules,
            destinations,
            broadcaster,
        })
    }
}

impl Network {
    fn find(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|other| other == name)
    }

    /// Press the button once, calling `sent` for every pulse as `(from, to, pulse)`. The button
    /// itself has no index, so its pulse is reported as coming from the broadcaster.
    fn press<F>(&mut self, mut sent: F)
    where
        F: FnMut(usize, usize, Pulse),
    {
        let mut queue = VecDeque::from([(self.broadcaster, self.broadcaster, Pulse::Low)]);
        while let Some((from, to, pulse)) = queue.pop_front() {
            sent(from, to, pulse);
            if let Some(next) = self.modules[to].receive(from, pulse) {
                for &destination in &self.destinations[to] {
                    queue.push_back((to, destination, next));
                }
            }
        }
    }
}

/*
For part 1, press the button 1000 times. Multiply the number of low pulses sent by the number of high
pulses sent.
*/

struct Day20;

impl Solution<PartOne> for Day20 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Network) -> DynamicResult<u64> {
        let mut network = input.clone();
        let (mut low, mut high) = (0, 0);
        for _ in 0..1000 {
            network.press(|_, _, pulse| match pulse {
                Pulse::Low => low += 1,
                Pulse::High => high += 1,
            });
        }
        Ok(u64::checked_mul(low, high).ok_or("pulse count product overflowed")?)
    }
}

/*
For part 2, find the fewest presses that deliver a low pulse to `rx`. It is fed by one conjunction,
which sends low only when all its inputs last sent high. Each of those inputs sends high on a fixed
cycle of presses, so they first agree at the least common multiple of their cycles.
*/

const MAX_PRESSES: u64 = 1 << 20;

impl Solution<PartTwo> for Day20 {
    type Input = Network;
    type Output = u64;

    fn solve(input: &Network) -> DynamicResult<u64> {
        let rx = input
            .find("rx")
            .ok_or_else(|| NetworkError::UnsupportedFeed("rx".to_owned()))?;
        let feeders: Vec<_> = (0..input.modules.len())
            .filter(|&index| input.destinations[index].contains(&rx))
            .collect();
        let [hub] = feeders[..] else {
            return Err(NetworkError::UnsupportedFeed("rx".to_owned()).into());
        };
        let Module::Conjunction { memory } = &input.modules[hub] else {
            return Err(NetworkError::UnsupportedFeed("rx".to_owned()).into());
        };

        let mut periods: HashMap<usize, Option<u64>> =
            memory.keys().map(|&sender| (sender, None)).collect();
        let mut network = input.clone();
        for presses in 1..=MAX_PRESSES {
            network.press(|from, to, pulse| {
                if to == hub && pulse == Pulse::High {
                    periods.entry(from).and_modify(|period| {
                        period.get_or_insert(presses);
                    });
                }
            });
            if periods.values().all(Option::is_some) {
                break;
            }
        }

        let mut presses = 1;
        for (&sender, period) in &periods {
            let period = period.ok_or_else(|| NetworkError::NoPeriod(input.names[hub].clone()))?;
            debug!(sender = %input.names[sender], period, "high pulse period");
            presses = num_integer::lcm(presses, period);
        }
        Ok(presses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_first_example() -> DynamicResult<()> {
        let parsed = Network::parse(
            "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
",
        )?;
        let result = <Day20 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 32_000_000);
        Ok(())
    }

    #[test]
    fn part_one_solves_second_example() -> DynamicResult<()> {
        let parsed = Network::parse(
            "broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
",
        )?;
        let result = <Day20 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 11_687_500);
        Ok(())
    }

    #[test]
    fn part_two_combines_counter_periods() -> DynamicResult<()> {
        let parsed = Network::parse(
            "broadcaster -> a, x
%a -> b
%b -> cb
&cb -> ib
&ib -> hub
%x -> y
%y -> z
%z -> cz
&cz -> iz
&iz -> hub
&hub -> rx
",
        )?;
        let result = <Day20 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn flip_flop_ignores_high_pulses() {
        let mut flip_flop = Module::FlipFlop { on: false };
        assert_eq!(flip_flop.receive(0, Pulse::High), None);
        assert_eq!(flip_flop.receive(0, Pulse::Low), Some(Pulse::High));
        assert_eq!(flip_flop.receive(0, Pulse::Low), Some(Pulse::Low));
    }

    #[test]
    fn network_without_rx_has_no_answer() -> DynamicResult<()> {
        let parsed = Network::parse("broadcaster -> a\n%a -> out\n")?;
        assert!(<Day20 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }
}
