use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Splitter,
    Start,
}

#[derive(Debug)]
pub struct SharedData {
    manifold: Grid<Cell>,
    start: (usize, usize),
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    splits: u64,
    /// `None` when the count does not fit in a `u128`.
    timelines: Option<u128>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let manifold = Grid::parse(input, |b| match b {
            b'.' => Ok(Cell::Empty),
            b'^' => Ok(Cell::Splitter),
            b'S' => Ok(Cell::Start),
            other => bail!("unexpected cell {:?}", other as char),
        })?;

        let start = manifold
            .find(&Cell::Start)
            .ok_or_else(|| ParseError::MissingData("manifold has no 'S'".into()))?;
        if let Some((r, c)) = manifold
            .positions()
            .skip_while(|&pos| pos != start)
            .skip(1)
            .find(|&(r, c)| manifold.get(r, c) == Some(&Cell::Start))
        {
            return Err(ParseError::InvalidFormat(format!(
                "(line {}) second 'S' at column {}",
                r + 1,
                c + 1
            )));
        }

        Ok(SharedData {
            manifold,
            start,
            common_result: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_once_for_both(shared)
            .timelines
            .map(|timelines| timelines.to_string())
            .ok_or_else(|| SolveError::failed("timeline count does not fit in 128 bits"))
    }
}

/// Drop the beam row by row, tracking how many timelines occupy each column.
///
/// A splitter reached by any number of timelines counts as one split; every
/// timeline reaching it continues on both sides. Beams leaving the sides of
/// the manifold are lost. Column counts saturate so the splits stay exact
/// even when the timeline total overflows.
fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let manifold = &shared.manifold;
        let (start_row, start_col) = shared.start;
        let width = manifold.width();

        let mut beams = vec![0u128; width];
        beams[start_col] = 1;
        let mut splits = 0u64;
        let mut overflowed = false;
        let mut add = |slot: &mut u128, count: u128| {
            *slot = slot.checked_add(count).unwrap_or_else(|| {
                overflowed = true;
                u128::MAX
            });
        };

        for row in start_row + 1..manifold.height() {
            let mut next = vec![0u128; width];
            for (col, &count) in beams.iter().enumerate().filter(|(_, count)| **count > 0) {
                if manifold.get(row, col) == Some(&Cell::Splitter) {
                    splits += 1;
                    if let Some(left) = col.checked_sub(1) {
                        add(&mut next[left], count);
                    }
                    if col + 1 < width {
                        add(&mut next[col + 1], count);
                    }
                } else {
                    add(&mut next[col], count);
                }
            }
            beams = next;
        }

        tracing::trace!(splits, overflowed, "beam left the manifold");
        let timelines = if overflowed {
            None
        } else {
            beams.iter().try_fold(0u128, |total, &count| total.checked_add(count))
        };
        CommonResult { splits, timelines }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const EXAMPLE: &str = include_str!("../../../../inputs/2025/day07_example.txt");

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part_checked_range(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1), "21");
        assert_eq!(solve(EXAMPLE, 2), "40");
    }

    #[test]
    fn test_merged_beams_split_once() {
        let input = "..S..\n..^..\n.^.^.\n..^..\n.....\n";
        // The two beams meeting at the bottom splitter split it once.
        assert_eq!(solve(input, 1), "4");
        assert_eq!(solve(input, 2), "6");
    }

    #[test]
    fn test_beam_without_splitters() {
        assert_eq!(solve(".S.\n...\n...\n", 1), "0");
        assert_eq!(solve(".S.\n...\n...\n", 2), "1");
    }

    #[test]
    fn test_timeline_overflow_fails_part2_only() {
        // 140 full splitter rows double the timelines every row.
        let width = 283;
        let mut input = format!("{}S{}\n", ".".repeat(width / 2), ".".repeat(width / 2));
        for _ in 0..140 {
            input.push_str(&"^".repeat(width));
            input.push('\n');
        }
        let mut shared = Solver::parse(&input).unwrap();
        let splits = Solver::solve_part_checked_range(&mut shared, 1).unwrap();
        // Row k (1-based) has k lit splitters.
        assert_eq!(splits, (140 * 141 / 2).to_string());
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_rejects_missing_or_duplicate_start() {
        assert!(matches!(Solver::parse("...\n.^.\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("S..\n..S\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("S..\n.x.\n"), Err(ParseError::InvalidFormat(_))));
    }
}
