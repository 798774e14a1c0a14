use std::collections::BTreeSet;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::content_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["ranges", "digits"])]
pub struct Solver;

/// Inclusive id range.
pub type IdRange = (u64, u64);

impl AocParser for Solver {
    type SharedData<'a> = Vec<IdRange>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let joined = content_lines(input).concat();
        if joined.trim().is_empty() {
            return Err(ParseError::MissingData("no id ranges".into()));
        }

        joined
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(idx, token)| parse_range(token).map_err(|e| anyhow!("(range {}) {}", idx + 1, e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

fn parse_range(token: &str) -> anyhow::Result<IdRange> {
    let (start, end) = token
        .split_once('-')
        .with_context(|| format!("expected 'a-b', found {token:?}"))?;
    let start: u64 = start.parse().with_context(|| format!("invalid range start {start:?}"))?;
    let end: u64 = end.parse().with_context(|| format!("invalid range end {end:?}"))?;
    if start > end {
        bail!("range start {start} is greater than end {end}");
    }
    Ok((start, end))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid_ids(shared, |repeats| repeats == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid_ids(shared, |repeats| repeats >= 2).to_string())
    }
}

/// Sum every distinct id inside `ranges` whose digits are one block repeated
/// a number of times accepted by `allow_repeats`.
///
/// Candidates are generated directly: an id of `len` digits made of `repeats`
/// copies of a `len / repeats` digit block equals `block * multiplier`, where
/// `multiplier` is `1` followed by `repeats - 1` groups of `0…01`.
fn sum_invalid_ids(ranges: &[IdRange], allow_repeats: impl Fn(u32) -> bool) -> u128 {
    let mut invalid = BTreeSet::new();

    for &(start, end) in ranges {
        for len in digit_count(start)..=digit_count(end) {
            for repeats in (2..=len).filter(|r| len % r == 0 && allow_repeats(*r)) {
                let block_len = len / repeats;
                let Some(multiplier) = repeat_multiplier(block_len, repeats) else {
                    continue;
                };
                let block_min = 10u64.pow(block_len - 1);
                let block_max = 10u64.pow(block_len) - 1;
                let lo = start.div_ceil(multiplier).max(block_min);
                let hi = (end / multiplier).min(block_max);
                invalid.extend((lo..=hi).map(|block| block * multiplier));
            }
        }
    }

    invalid.into_iter().map(u128::from).sum()
}

fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

fn repeat_multiplier(block_len: u32, repeats: u32) -> Option<u64> {
    let shift = 10u64.checked_pow(block_len)?;
    (1..repeats).try_fold(1u64, |acc, _| acc.checked_mul(shift)?.checked_add(1))
}
