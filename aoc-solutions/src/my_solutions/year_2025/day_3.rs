use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["greedy", "digits"])]
pub struct Solver;

impl AocParser for Solver {
    /// One battery bank per line, as digit values.
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            if line.is_empty() {
                bail!("battery bank is empty");
            }
            line.bytes()
                .map(|b| match b {
                    b'0'..=b'9' => Ok(b - b'0'),
                    other => bail!("unexpected joltage {:?}", other as char),
                })
                .collect::<anyhow::Result<Vec<u8>>>()
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12)
    }
}

fn total_joltage(banks: &[Vec<u8>], batteries: usize) -> Result<String, SolveError> {
    banks
        .iter()
        .enumerate()
        .map(|(idx, bank)| {
            max_joltage(bank, batteries).ok_or_else(|| {
                SolveError::failed(format!(
                    "bank {} has {} batteries, need {}",
                    idx + 1,
                    bank.len(),
                    batteries
                ))
            })
        })
        .sum::<Result<u64, _>>()
        .map(|total| total.to_string())
}

/// Largest number formed by picking `count` digits of `bank` in order.
///
/// Each pick takes the leftmost maximum among the digits that still leave
/// enough room for the remaining picks.
pub fn max_joltage(bank: &[u8], count: usize) -> Option<u64> {
    if count == 0 || bank.len() < count {
        return None;
    }

    let mut value = 0u64;
    let mut start = 0;
    for remaining in (0..count).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, digit)| digit)?;
        value = value * 10 + u64::from(*digit);
        start += offset + 1;
    }
    Some(value)
}
