use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

/// A roll is accessible when fewer than this many neighbours are rolls.
const CROWDED: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// `true` where a paper roll sits.
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |b| match b {
            b'@' => Ok(true),
            b'.' => Ok(false),
            other => bail!("unexpected cell {:?}", other as char),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible_rolls(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Work on a copy so part 1 still sees the original floor.
        let mut floor = shared.clone();
        let mut removed = 0usize;
        loop {
            let accessible = accessible_rolls(&floor);
            if accessible.is_empty() {
                break;
            }
            removed += accessible.len();
            for (row, col) in accessible {
                if let Some(cell) = floor.get_mut(row, col) {
                    *cell = false;
                }
            }
        }
        Ok(removed.to_string())
    }
}

fn accessible_rolls(floor: &Grid<bool>) -> Vec<(usize, usize)> {
    floor
        .positions()
        .filter(|&(row, col)| floor.get(row, col) == Some(&true))
        .filter(|&(row, col)| {
            floor
                .neighbours8(row, col)
                .filter(|&(r, c)| floor.get(r, c) == Some(&true))
                .count()
                < CROWDED
        })
        .collect()
}
