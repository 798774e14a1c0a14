use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["dial", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i32>,
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    zero_counts: u64,
    pass_zero_counts: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = parse_lines(input, |line| {
            let negative = match line.as_bytes().first() {
                Some(b'L') => true,
                Some(b'R') => false,
                _ => bail!("first character need to be 'L' or 'R'"),
            };
            let amount: i32 = line[1..]
                .parse::<i32>()
                .map_err(|e| anyhow!("invalid rotation {:?}: {}", &line[1..], e))?;
            if amount < 0 {
                bail!("rotate value must be non negative");
            }
            Ok(if negative { -amount } else { amount })
        })?;

        Ok(SharedData {
            rotations,
            common_result: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).zero_counts.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).pass_zero_counts.to_string())
    }
}

fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let (_, zero_counts, pass_zero_counts) = shared.rotations.iter().fold(
            (DIAL_START, 0u64, 0u64),
            |(dial_value, mut zero_counts, mut pass_zero_counts), rotate_val| {
                // Rotations are `i32`, so the sum cannot leave `i64`.
                let moved = dial_value + i64::from(*rotate_val);
                // Moving left onto or past zero from a non-zero position clicks zero once
                // before the full turns are counted.
                if moved <= 0 && dial_value != 0 {
                    pass_zero_counts += 1;
                }
                pass_zero_counts += (moved / DIAL_SIZE).unsigned_abs();
                let dial_value = moved.rem_euclid(DIAL_SIZE);
                if dial_value == 0 {
                    zero_counts += 1;
                }
                (dial_value, zero_counts, pass_zero_counts)
            },
        );

        CommonResult {
            zero_counts,
            pass_zero_counts,
        }
    })
}
