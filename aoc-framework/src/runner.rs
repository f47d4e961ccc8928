//! Running a puzzle: parse once, solve each part, report every step to an [`OutputHandler`].
//!
//! Puzzles are usually made runnable with the [`solution_runner`] attribute:
//!
//! ```
//! use aoc_framework::runner::{OutputHandler, SolutionRunner, solution_runner};
//! use aoc_framework::{DynamicResult, PartKind, PartOne, Solution};
//! # use std::fmt::Display;
//! # use std::time::Duration;
//!
//! struct LineCount;
//!
//! impl Solution<PartOne> for LineCount {
//!     type Input = str;
//!     type Output = usize;
//!
//!     fn solve(input: &str) -> DynamicResult<usize> {
//!         Ok(input.lines().count())
//!     }
//! }
//!
//! #[solution_runner(name = "Line Count", part_one = LineCount)]
//! struct LineCountPuzzle;
//!
//! #[derive(Default)]
//! struct Collect(Vec<String>);
//!
//! impl OutputHandler for Collect {
//!     fn solution_name(&mut self, name: &str) {
//!         self.0.push(name.to_owned());
//!     }
//!     fn parse_end(&mut self, _: Option<Duration>) {}
//!     fn part_output(&mut self, part: PartKind, output: &dyn Display, _: Option<Duration>) {
//!         self.0.push(format!("{part}: {output}"));
//!     }
//! }
//!
//! let mut collect = Collect::default();
//! LineCountPuzzle::run("a\nb\n", &mut collect, false)?;
//! assert_eq!(collect.0, ["Line Count", "Part 1: 2"]);
//! # Ok::<(), aoc_framework::DynamicError>(())
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

pub use aoc_framework_macros::solution_runner;

/// Receives the results of a run as they happen.
pub trait OutputHandler {
    /// The puzzle's name, reported before anything else.
    fn solution_name(&mut self, name: &str);

    /// Parsing finished, taking `duration` when the run is timed.
    fn parse_end(&mut self, duration: Option<Duration>);

    /// A part produced its answer, taking `duration` when the run is timed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Option<Duration>);
}

/// Call `f`, also measuring how long it took when `timed` is set.
fn measure<T>(timed: bool, f: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let value = f();
        (value, Some(start.elapsed()))
    } else {
        (f(), None)
    }
}

fn run_part<P, S>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    debug!(part = %P::KIND, "solving");
    let (answer, duration) = measure(timed, || S::solve(input));
    let answer = answer?;
    handler.part_output(P::KIND, &answer, duration);
    Ok(())
}

/// The parts of a puzzle, all solving the same input type `I`.
///
/// Implemented for `(S1,)` when only part one exists and `(S1, S2)` when both do.
pub trait Parts<I: ?Sized> {
    /// Solve every part in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error returned by a part.
    fn solve_all(input: &I, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

impl<I, S1> Parts<I> for (S1,)
where
    I: ?Sized,
    S1: Solution<PartOne, Input = I>,
{
    fn solve_all(input: &I, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()> {
        run_part::<PartOne, S1>(input, handler, timed)
    }
}

impl<I, S1, S2> Parts<I> for (S1, S2)
where
    I: ?Sized,
    S1: Solution<PartOne, Input = I>,
    S2: Solution<PartTwo, Input = I>,
{
    fn solve_all(input: &I, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()> {
        run_part::<PartOne, S1>(input, handler, timed)?;
        run_part::<PartTwo, S2>(input, handler, timed)
    }
}

/// Run parts that solve the raw input text.
///
/// # Errors
///
/// The first error returned by a part.
pub fn run_raw<P>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Parts<str>,
{
    handler.solution_name(name);
    P::solve_all(input, handler, timed)
}

/// Parse the input into `D` once, then run parts that solve it.
///
/// # Errors
///
/// The parse error, or the first error returned by a part.
pub fn run_parsed<D, P>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    P: Parts<D>,
{
    handler.solution_name(name);
    debug!(bytes = input.len(), "parsing");
    let (parsed, duration) = measure(timed, || D::parse(input));
    let parsed = parsed?;
    handler.parse_end(duration);
    P::solve_all(&parsed, handler, timed)
}

/// A puzzle that can be run from its input text. Usually implemented through [`solution_runner`].
pub trait SolutionRunner {
    /// # Errors
    ///
    /// Any parse or solve error of the puzzle.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        timed_events: usize,
    }

    impl OutputHandler for Recorder {
        fn solution_name(&mut self, name: &str) {
            self.events.push(format!("= {name} ="));
        }

        fn parse_end(&mut self, duration: Option<Duration>) {
            self.timed_events += usize::from(duration.is_some());
            self.events.push("parsed".to_owned());
        }

        fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Option<Duration>) {
            self.timed_events += usize::from(duration.is_some());
            self.events.push(format!("{part}: {output}"));
        }
    }

    struct Numbers(Vec<i32>);

    impl ParseData for Numbers {
        fn parse(input: &str) -> DynamicResult<Self> {
            let numbers = input
                .lines()
                .map(str::parse)
                .collect::<Result<_, ParseIntError>>()?;
            Ok(Self(numbers))
        }
    }

    struct Sum;

    impl Solution<PartOne> for Sum {
        type Input = Numbers;
        type Output = i32;

        fn solve(input: &Numbers) -> DynamicResult<i32> {
            Ok(input.0.iter().sum())
        }
    }

    impl Solution<PartTwo> for Sum {
        type Input = Numbers;
        type Output = i32;

        fn solve(input: &Numbers) -> DynamicResult<i32> {
            input
                .0
                .iter()
                .copied()
                .max()
                .ok_or_else(|| "no numbers".into())
        }
    }

    #[test]
    fn parsed_run_reports_in_order() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        run_parsed::<Numbers, (Sum, Sum)>("Sum", "3\n-1\n5\n", &mut recorder, false)?;
        assert_eq!(
            recorder.events,
            ["= Sum =", "parsed", "Part 1: 7", "Part 2: 5"]
        );
        assert_eq!(recorder.timed_events, 0);
        Ok(())
    }

    #[test]
    fn timed_run_measures_every_step() -> DynamicResult<()> {
        let mut recorder = Recorder::default();
        run_parsed::<Numbers, (Sum, Sum)>("Sum", "1\n", &mut recorder, true)?;
        assert_eq!(recorder.timed_events, 3);
        Ok(())
    }

    #[test]
    fn failing_part_stops_the_run() {
        let mut recorder = Recorder::default();
        let result = run_parsed::<Numbers, (Sum, Sum)>("Sum", "", &mut recorder, false);
        assert!(result.is_err());
        assert_eq!(recorder.events, ["= Sum =", "parsed", "Part 1: 0"]);
    }

    #[test]
    fn parse_error_skips_the_parts() {
        let mut recorder = Recorder::default();
        let result = run_parsed::<Numbers, (Sum,)>("Sum", "x\n", &mut recorder, false);
        assert!(result.is_err());
        assert_eq!(recorder.events, ["= Sum ="]);
    }
}
