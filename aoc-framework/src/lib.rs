//! Traits and helpers shared by every puzzle solution.
//!
//! A puzzle's input is turned into a typed value once through [`ParseData`], then each part is a
//! [`Solution`] over that value. The [`runner`] module drives both steps and reports results to an
//! [`OutputHandler`][runner::OutputHandler].
//!
//! ```
//! use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//!
//! struct Depths(Vec<u32>);
//!
//! impl ParseData for Depths {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let depths = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(depths))
//!     }
//! }
//!
//! struct Sonar;
//!
//! impl Solution<PartOne> for Sonar {
//!     type Input = Depths;
//!     type Output = usize;
//!
//!     fn solve(input: &Depths) -> DynamicResult<usize> {
//!         Ok(input.0.windows(2).filter(|pair| pair[1] > pair[0]).count())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Sonar {
//!     type Input = Depths;
//!     type Output = u32;
//!
//!     fn solve(input: &Depths) -> DynamicResult<u32> {
//!         Ok(input.0.iter().copied().max().unwrap_or_default())
//!     }
//! }
//!
//! let depths = Depths::parse("199\n200\n208\n210\n200\n")?;
//! assert_eq!(<Sonar as Solution<PartOne>>::solve(&depths)?, 3);
//! assert_eq!(<Sonar as Solution<PartTwo>>::solve(&depths)?, 210);
//! # Ok::<(), aoc_framework::DynamicError>(())
//! ```

#![deny(clippy::expect_used, clippy::print_stderr, clippy::print_stdout)]

use std::error::Error;
use std::fmt::{self, Display};

pub mod input;
pub mod parsing;
pub mod runner;

mod sealed {
    /// Restricts [`Part`][super::Part] to the two marker types of this crate.
    pub trait Sealed {}
}

/// Any error, boxed so that every solution can share one result type.
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// The result of parsing or solving.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Which half of a puzzle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = match self {
            Self::One => 1,
            Self::Two => 2,
        };
        write!(f, "Part {number}")
    }
}

/// A type-level puzzle half, used as the parameter of [`Solution`].
pub trait Part: sealed::Sealed {
    const KIND: PartKind;
}

/// Marks a [`Solution`] for the first half of a puzzle.
pub struct PartOne;
impl sealed::Sealed for PartOne {}
impl Part for PartOne {
    const KIND: PartKind = PartKind::One;
}

/// Marks a [`Solution`] for the second half of a puzzle.
pub struct PartTwo;
impl sealed::Sealed for PartTwo {}
impl Part for PartTwo {
    const KIND: PartKind = PartKind::Two;
}

/// Solves one [`Part`] of a puzzle.
///
/// The same type usually implements both `Solution<PartOne>` and `Solution<PartTwo>` over a shared
/// [`Solution::Input`].
pub trait Solution<P: Part> {
    /// What the solver reads. Use `str` to take the raw input, or a [`ParseData`] type.
    type Input: ?Sized;

    /// The answer, printed through its [`Display`] implementation.
    type Output: Display;

    /// Compute the answer.
    ///
    /// # Errors
    ///
    /// Input that cannot be solved, such as an unreachable goal or a value out of range.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A puzzle input built from the raw input text.
pub trait ParseData: Sized {
    /// # Errors
    ///
    /// Malformed input, usually wrapped in [`InvalidLine`][parsing::InvalidLine] to point at the
    /// offending line.
    fn parse(input: &str) -> DynamicResult<Self>;
}
