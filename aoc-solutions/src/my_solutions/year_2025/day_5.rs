use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::content_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["ranges"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Sorted, non-overlapping, non-adjacent inclusive ranges.
    fresh: Vec<(u64, u64)>,
    ingredients: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines = content_lines(input);
        if lines.is_empty() {
            return Err(ParseError::MissingData("input is empty".into()));
        }

        let mut ranges = Vec::new();
        let mut ingredients = Vec::new();
        let mut in_ranges = true;
        for (idx, line) in lines.iter().enumerate() {
            let parsed = if line.trim().is_empty() {
                if !in_ranges {
                    Err(anyhow!("unexpected second blank line"))
                } else {
                    in_ranges = false;
                    Ok(())
                }
            } else if in_ranges {
                parse_range(line).map(|range| ranges.push(range))
            } else {
                line.trim()
                    .parse::<u64>()
                    .map(|id| ingredients.push(id))
                    .with_context(|| format!("invalid ingredient id {line:?}"))
            };
            parsed.map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))?;
        }

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no fresh id ranges".into()));
        }

        Ok(Inventory {
            fresh: merge_ranges(ranges),
            ingredients,
        })
    }
}

fn parse_range(line: &str) -> anyhow::Result<(u64, u64)> {
    let (start, end) = line
        .trim()
        .split_once('-')
        .with_context(|| format!("expected 'a-b', found {line:?}"))?;
    let start: u64 = start.parse().with_context(|| format!("invalid range start {start:?}"))?;
    let end: u64 = end.parse().with_context(|| format!("invalid range end {end:?}"))?;
    if start > end {
        bail!("range start {start} is greater than end {end}");
    }
    Ok((start, end))
}

/// Sort and merge overlapping or touching ranges.
fn merge_ranges(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some((_, last_end)) if start <= last_end.saturating_add(1) => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

impl Inventory {
    fn is_fresh(&self, id: u64) -> bool {
        // Index of the first range starting after `id`.
        let idx = self.fresh.partition_point(|&(start, _)| start <= id);
        idx > 0 && id <= self.fresh[idx - 1].1
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared.ingredients.iter().filter(|&&id| shared.is_fresh(id)).count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let covered: u128 = shared
            .fresh
            .iter()
            .map(|&(start, end)| u128::from(end - start) + 1)
            .sum();
        Ok(covered.to_string())
    }
}
