//! Locating and reading puzzle input files.
//!
//! Inputs live in one directory, named by day: `day07.txt` for the puzzle input, `day07_example.txt`
//! for the example from the puzzle text and `day07_example_2.txt` when a day has several examples.

use std::io;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

use thiserror::Error;
use tracing::debug;

/// Which input of a day to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Puzzle,
    /// An example, optionally numbered when a day has more than one.
    Example(Option<u8>),
}

/// The input file of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub day: u8,
    pub kind: InputKind,
}

impl InputFile {
    #[must_use]
    pub const fn new(day: u8, kind: InputKind) -> Self {
        Self { day, kind }
    }

    /// The path of this input inside `dir`.
    ///
    /// ```
    /// use std::path::Path;
    /// use aoc_framework::input::{InputFile, InputKind};
    ///
    /// let file = InputFile::new(3, InputKind::Example(Some(2)));
    /// assert_eq!(file.path_in("inputs"), Path::new("inputs/day03_example_2.txt"));
    /// ```
    #[must_use]
    pub fn path_in(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.to_string())
    }
}

impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day{:02}", self.day)?;
        match self.kind {
            InputKind::Puzzle => {}
            InputKind::Example(None) => write!(f, "_example")?,
            InputKind::Example(Some(number)) => write!(f, "_example_{number}")?,
        }
        write!(f, ".txt")
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file not found: {}", path.display())]
    Missing { path: PathBuf, source: io::Error },

    #[error("could not read input file: {}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
}

/// Read an input file, optionally trimming trailing whitespace from every line.
///
/// # Errors
///
/// [`InputError::Missing`] if the file does not exist, otherwise [`InputError::Unreadable`].
pub fn read_input(path: &Path, trim: bool) -> Result<String, InputError> {
    let text = fs::read_to_string(path).map_err(|source| {
        let path = path.to_owned();
        if source.kind() == io::ErrorKind::NotFound {
            InputError::Missing { path, source }
        } else {
            InputError::Unreadable { path, source }
        }
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read input");

    Ok(if trim { trim_line_ends(&text) } else { text })
}

/// Remove trailing whitespace from each line and drop the empty lines left at the end, keeping one
/// newline after every remaining line.
#[must_use]
pub fn trim_line_ends(text: &str) -> String {
    text.trim_end().lines().fold(String::with_capacity(text.len()), |mut trimmed, line| {
        trimmed.push_str(line.trim_end());
        trimmed.push('\n');
        trimmed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puzzle_input_name_is_zero_padded() {
        assert_eq!(
            InputFile::new(7, InputKind::Puzzle).to_string(),
            "day07.txt"
        );
        assert_eq!(
            InputFile::new(21, InputKind::Example(None)).to_string(),
            "day21_example.txt"
        );
    }

    #[test]
    fn trimming_keeps_line_structure() {
        assert_eq!(trim_line_ends("a  \n\t\nb\r\n c "), "a\n\nb\n c\n");
    }

    #[test]
    fn trimming_drops_trailing_blank_lines() {
        assert_eq!(trim_line_ends("a\nb \n\n  \n\r\n"), "a\nb\n");
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let path = Path::new("this/input/does/not/exist.txt");
        let error = read_input(path, false).err();
        assert!(matches!(error, Some(InputError::Missing { .. })));
        assert_eq!(
            error.map(|error| error.to_string()).as_deref(),
            Some("input file not found: this/input/does/not/exist.txt")
        );
    }
}
