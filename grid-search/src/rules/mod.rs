//! Concrete neighbor rules for the puzzles searched on a grid.

pub mod beams;
pub mod crucible;
pub mod garden;
pub mod pipes;
pub mod trails;
