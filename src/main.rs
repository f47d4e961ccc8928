use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Error, Result};
use aoc_framework::PartKind;
use aoc_framework::input::{InputFile, InputKind, read_input};
use aoc_framework::runner::OutputHandler;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod checked_product;
mod solutions;

/// Solve an Advent of Code 2023 puzzle.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// The day to solve, 1 to 25.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Read this file instead of the day's input in the inputs directory.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory holding the `dayNN.txt` input files.
    #[arg(long, value_name = "DIR", default_value = "inputs")]
    inputs_dir: PathBuf,

    /// Use the day's example input, or its K-th example when a number is given.
    #[arg(short, long, value_name = "K", num_args = 0..=1)]
    example: Option<Option<u8>>,

    /// Trim trailing whitespace from every input line.
    #[arg(long, action = ArgAction::SetTrue)]
    trim: bool,

    /// Print how long parsing and each part took.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Only print durations of at least this many milliseconds.
    #[arg(long, value_name = "MS", default_value_t)]
    min_timing_ms: u64,

    /// Log more: `-v` for debug events, `-vv` for trace events. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn input_path(&self) -> PathBuf {
        if let Some(path) = &self.input {
            return path.clone();
        }
        let kind = self.example.map_or(InputKind::Puzzle, InputKind::Example);
        InputFile::new(self.day, kind).path_in(&self.inputs_dir)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints results to standard output.
struct Terminal {
    /// Durations shorter than this are not printed.
    min_duration: Duration,
}

impl Terminal {
    fn format_duration(duration: Duration) -> String {
        if duration >= Duration::from_secs(1) {
            format!("{:.3} s", duration.as_secs_f64())
        } else if duration >= Duration::from_millis(1) {
            format!("{:.3} ms", duration.as_secs_f64() * 1e3)
        } else if duration >= Duration::from_micros(1) {
            format!("{:.3} µs", duration.as_secs_f64() * 1e6)
        } else {
            format!("{} ns", duration.subsec_nanos())
        }
    }

    fn shown(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|&duration| duration >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for Terminal {
    fn solution_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_end(&mut self, duration: Option<Duration>) {
        if let Some(duration) = self.shown(duration) {
            println!("Parsed in {duration}");
        }
    }

    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration: Option<Duration>) {
        match self.shown(duration) {
            Some(duration) => println!("{part}: {output} ({duration})"),
            None => println!("{part}: {output}"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.input_path();
    debug!(day = cli.day, path = %path.display(), "selected input");
    let input = read_input(&path, cli.trim).with_context(|| {
        format!(
            "no input for day {}; create {} or pass --input",
            cli.day,
            path.display()
        )
    })?;

    let mut terminal = Terminal {
        min_duration: Duration::from_millis(cli.min_timing_ms),
    };
    solutions::run_day(cli.day, &input, &mut terminal, cli.timed)
        .map_err(|error| Error::from_boxed(error).context("failed to run solution"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_flag_selects_numbered_file() {
        let cli = Cli::parse_from(["advent-2023", "8", "--example", "2"]);
        assert_eq!(cli.input_path(), PathBuf::from("inputs/day08_example_2.txt"));

        let cli = Cli::parse_from(["advent-2023", "8", "--example"]);
        assert_eq!(cli.input_path(), PathBuf::from("inputs/day08_example.txt"));
    }

    #[test]
    fn input_flag_overrides_directory() {
        let cli = Cli::parse_from(["advent-2023", "3", "--inputs-dir", "x", "-i", "mine.txt"]);
        assert_eq!(cli.input_path(), PathBuf::from("mine.txt"));
    }

    #[test]
    fn day_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["advent-2023", "26"]).is_err());
    }

    #[test]
    fn durations_use_readable_units() {
        assert_eq!(
            Terminal::format_duration(Duration::from_millis(1500)),
            "1.500 s"
        );
        assert_eq!(Terminal::format_duration(Duration::from_nanos(12)), "12 ns");
    }
}
