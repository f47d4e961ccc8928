use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::rules::beams::{Beam, Contraption};
use grid_search::{Direction, Position};
use tracing::debug;

#[solution_runner(name = "Day 16: The Floor Will Be Lava", parsed = Layout, part_one = Day16, part_two = Day16)]
impl super::Day<16> {}

/*
The contraption is a grid of empty space (`.`), mirrors (`/` and `\`) and splitters (`|` and `-`).
A beam passes through empty space and the pointy end of a splitter, turns at mirrors, and splits in
two when it hits the flat side of a splitter. A tile is energized if any beam passes through it.
*/

struct Layout(Contraption);

impl ParseData for Layout {
    fn parse(input: &str) -> DynamicResult<Self> {
        Ok(Self(Contraption::parse(input)?))
    }
}

/*
For part 1, the beam enters the top-left tile heading east. Count the energized tiles.
*/

struct Day16;

impl Solution<PartOne> for Day16 {
    type Input = Layout;
    type Output = usize;

    fn solve(input: &Layout) -> DynamicResult<usize> {
        Ok(input
            .0
            .energized(Beam::new(Position::new(0, 0), Direction::East)))
    }
}

/*
For part 2, the beam may enter from any edge tile, heading away from that edge. Find the most tiles
any entry energizes.
*/

impl Solution<PartTwo> for Day16 {
    type Input = Layout;
    type Output = usize;

    fn solve(input: &Layout) -> DynamicResult<usize> {
        let (entry, energized) = input
            .0
            .edge_entries()
            .into_iter()
            .map(|entry| (entry, input.0.energized(entry)))
            .max_by_key(|&(_, energized)| energized)
            .ok_or("contraption has no edge")?;
        debug!(position = %entry.position, heading = ?entry.heading, energized, "best entry");
        Ok(energized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Layout::parse(EXAMPLE_INPUT)?;
        let result = <Day16 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 46);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Layout::parse(EXAMPLE_INPUT)?;
        let result = <Day16 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 51);
        Ok(())
    }

    #[test]
    fn beam_caught_in_a_loop_terminates() -> DynamicResult<()> {
        let parsed = Layout::parse("/.\\\n...\n\\./\n")?;
        let energized = parsed
            .0
            .energized(Beam::new(Position::new(0, 1), Direction::East));
        assert_eq!(energized, 8);
        Ok(())
    }
}
