//! Parsing helpers that keep track of where in the input a failure happened.

use std::error::Error;
use std::str::FromStr;

use thiserror::Error;

use crate::{DynamicError, DynamicResult};

/// A value could not be parsed from a string.
#[derive(Error, Debug)]
#[error("could not parse {text:?}")]
pub struct ParseContextError<E: Error> {
    text: String,
    source: E,
}

/// [`str::parse`], keeping the text that failed in the error.
///
/// ```
/// use aoc_framework::parsing::parse_with_context;
///
/// assert_eq!(parse_with_context::<u8>("42").ok(), Some(42));
///
/// let error = parse_with_context::<u8>("4x").err().map(|error| error.to_string());
/// assert_eq!(error.as_deref(), Some("could not parse \"4x\""));
/// ```
///
/// # Errors
///
/// A [`ParseContextError`] sourcing [`FromStr::Err`].
pub fn parse_with_context<F>(text: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: Error,
{
    text.parse().map_err(|source| ParseContextError {
        text: text.to_owned(),
        source,
    })
}

/// Parse whitespace-separated values, such as `"79 14 55 13"`.
///
/// # Errors
///
/// The [`ParseContextError`] of the first value that fails to parse.
pub fn parse_whitespace_separated<F>(text: &str) -> Result<Vec<F>, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: Error,
{
    text.split_whitespace().map(parse_with_context).collect()
}

/// A line of input failed to parse.
#[derive(Error, Debug)]
#[error("line {number} is invalid")]
pub struct InvalidLine {
    /// One-based line number.
    number: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// Wrap the error from the line at zero-based `index`.
    #[must_use]
    pub fn new(index: usize, source: DynamicError) -> Self {
        Self {
            number: index.saturating_add(1),
            source,
        }
    }

    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }
}

/// Parse each line with `parser`, which receives the zero-based line index and the line.
/// Empty lines at the end of the input are skipped.
///
/// The iterator yields one result per line, so collecting into `Result<Vec<_>, _>` stops at the
/// first bad line.
///
/// ```
/// use aoc_framework::parsing::{parse_input_lines, parse_with_context};
///
/// let lines: Result<Vec<u32>, _> =
///     parse_input_lines("1\n2\nthree\n", |_, line| Ok(parse_with_context(line)?)).collect();
/// assert_eq!(lines.err().map(|error| error.number()), Some(3));
/// ```
pub fn parse_input_lines<'a, T, F>(
    input: &'a str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>> + use<'a, T, F>
where
    F: FnMut(usize, &'a str) -> DynamicResult<T>,
{
    input
        .trim_end_matches(is_line_break)
        .lines()
        .enumerate()
        .map(move |(index, line)| {
            parser(index, line).map_err(|source| InvalidLine::new(index, source))
        })
}

/// Line breaks, which [`parse_input_lines`] strips from the end of its input so trailing empty
/// lines are not parsed.
#[must_use]
pub const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

/// Input ended while more was expected.
#[derive(Error, Debug)]
#[error("input ended before {expected}")]
pub struct UnexpectedEnd {
    expected: &'static str,
}

/// Reads input made of sections, one line at a time, remembering the line number for errors.
///
/// ```
/// use aoc_framework::parsing::InputScanner;
///
/// let mut scanner = InputScanner::new("seeds: 1 2\n\nmap:\n3 4\n");
/// assert_eq!(scanner.next_line("seeds")?.1, "seeds: 1 2");
/// scanner.skip_blank_lines();
/// let section: Vec<_> = scanner.take_section().map(|(_, line)| line).collect();
/// assert_eq!(section, ["map:", "3 4"]);
/// assert!(scanner.is_finished());
/// # Ok::<(), aoc_framework::parsing::UnexpectedEnd>(())
/// ```
#[derive(Debug, Clone)]
pub struct InputScanner<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// The next line with its zero-based index.
    ///
    /// # Errors
    ///
    /// [`UnexpectedEnd`] naming what was `expected`, if no lines remain.
    pub fn next_line(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, &'a str), UnexpectedEnd> {
        self.lines.next().ok_or(UnexpectedEnd { expected })
    }

    /// Drop any blank lines at the front.
    pub fn skip_blank_lines(&mut self) {
        while self
            .lines
            .next_if(|(_, line)| line.trim().is_empty())
            .is_some()
        {}
    }

    /// Take lines up to the next blank line or the end of input. The blank line is consumed.
    pub fn take_section(&mut self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        std::iter::from_fn(|| {
            let (index, line) = self.lines.next()?;
            (!line.trim().is_empty()).then_some((index, line))
        })
    }

    #[must_use]
    pub fn is_finished(&mut self) -> bool {
        self.lines.peek().is_none()
    }
}

/// Split input into the groups of lines separated by blank lines, dropping empty groups.
#[must_use]
pub fn split_sections(input: &str) -> Vec<Vec<&str>> {
    let mut scanner = InputScanner::new(input);
    let mut sections = Vec::new();
    loop {
        scanner.skip_blank_lines();
        if scanner.is_finished() {
            return sections;
        }
        sections.push(scanner.take_section().map(|(_, line)| line).collect());
    }
}
