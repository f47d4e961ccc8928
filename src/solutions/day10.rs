use std::collections::HashMap;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use grid_search::Position;
use grid_search::rules::pipes::{Pipe, PipeMaze};

#[solution_runner(name = "Day 10: Pipe Maze", parsed = Field, part_one = Day10, part_two = Day10)]
impl super::Day<10> {}

/*
The field is a grid of pipes. The animal's start tile `S` sits on one big loop of connected pipes,
and its own pipe shape is whatever connects it to its two neighbors on the loop.
*/

struct Field {
    maze: PipeMaze,
    /// Steps along the loop from the start to each loop tile.
    loop_distances: HashMap<Position, u32>,
}

impl ParseData for Field {
    fn parse(input: &str) -> DynamicResult<Self> {
        let maze = PipeMaze::parse(input)?;
        let loop_distances = maze.loop_distances();
        Ok(Self {
            maze,
            loop_distances,
        })
    }
}

/*
For part 1, find how many steps along the loop it takes to reach the tile farthest from the start.
*/

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = Field;
    type Output = u32;

    fn solve(input: &Field) -> DynamicResult<u32> {
        let farthest = input
            .loop_distances
            .values()
            .copied()
            .max()
            .ok_or("loop is empty")?;
        Ok(farthest)
    }
}

/*
For part 2, count the tiles enclosed by the loop. Scanning a row from the left, a tile is inside when
the scan has crossed the loop an odd number of times. A `|` is one crossing. A horizontal run such as
`L--7` or `F--J` leaves on the other side of the loop and is also one crossing, while `L--J` or
`F--7` turns back and is none. Tiles not on the loop count, even if they hold pipes.
*/

fn enclosed_in_row(field: &Field, row: usize) -> usize {
    let mut inside = false;
    let mut run_start = None;
    let mut enclosed = 0;

    for col in 0..field.maze.grid().width() {
        let position = Position::new(row, col);
        if !field.loop_distances.contains_key(&position) {
            enclosed += usize::from(inside);
            continue;
        }
        match field.maze.pipe_at(position) {
            Pipe::NorthSouth => inside = !inside,
            elbow @ (Pipe::NorthEast | Pipe::SouthEast) => run_start = Some(elbow),
            Pipe::SouthWest => {
                inside ^= run_start.take() == Some(Pipe::NorthEast);
            }
            Pipe::NorthWest => {
                inside ^= run_start.take() == Some(Pipe::SouthEast);
            }
            Pipe::EastWest | Pipe::Ground | Pipe::Start => {}
        }
    }
    enclosed
}

impl Solution<PartTwo> for Day10 {
    type Input = Field;
    type Output = usize;

    fn solve(input: &Field) -> DynamicResult<usize> {
        let height = input.maze.grid().height();
        Ok((0..height).map(|row| enclosed_in_row(input, row)).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_square_loop() -> DynamicResult<()> {
        let parsed = Field::parse(
            ".....
.S-7.
.|.|.
.L-J.
.....
",
        )?;
        let result = <Day10 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn part_one_solves_complex_loop() -> DynamicResult<()> {
        let parsed = Field::parse(
            "..F7.
.FJ|.
SJ.L7
|F--J
LJ...
",
        )?;
        let result = <Day10 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn part_two_solves_example_with_gap() -> DynamicResult<()> {
        let parsed = Field::parse(
            "...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
",
        )?;
        let result = <Day10 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn part_two_solves_larger_example() -> DynamicResult<()> {
        let parsed = Field::parse(
            ".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...
",
        )?;
        let result = <Day10 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 8);
        Ok(())
    }

    #[test]
    fn missing_start_fails_to_parse() {
        assert!(Field::parse("F7\nLJ\n").is_err());
    }
}
