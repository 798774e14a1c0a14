use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::parse::parse_lines;

const OUT: &str = "out";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

/// Device graph with names borrowed from the input.
#[derive(Debug, Default)]
pub struct Devices<'a> {
    ids: HashMap<&'a str, usize>,
    outputs: Vec<Vec<usize>>,
}

impl<'a> Devices<'a> {
    fn intern(&mut self, name: &'a str) -> usize {
        let next = self.outputs.len();
        match self.ids.entry(name) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                entry.insert(next);
                self.outputs.push(Vec::new());
                next
            }
        }
    }

    fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Devices<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines = parse_lines(input, |line| {
            let (name, outputs) = line
                .split_once(':')
                .with_context(|| format!("expected 'name: outputs...', found {line:?}"))?;
            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                bail!("invalid device name {name:?}");
            }
            Ok((name, outputs.split_whitespace().collect::<Vec<_>>()))
        })?;

        let mut devices = Devices::default();
        let mut listed = HashSet::new();
        for (idx, (name, outputs)) in lines.into_iter().enumerate() {
            let id = devices.intern(name);
            if !listed.insert(id) {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) device {name:?} is listed twice",
                    idx + 1
                )));
            }
            let targets: Vec<usize> = outputs.into_iter().map(|out| devices.intern(out)).collect();
            devices.outputs[id] = targets;
        }
        Ok(devices)
    }
}

/// Paths from a device to `out`, tracking which required devices were seen.
///
/// A state pairs a device with `seen` flags: bit `i` is set once
/// `required[i]` has been visited, including the current device.
struct PathCount<'d> {
    outputs: &'d [Vec<usize>],
    required: Vec<usize>,
    target: usize,
}

impl PathCount<'_> {
    fn seen_after(&self, device: usize, seen: u8) -> u8 {
        self.required
            .iter()
            .enumerate()
            .filter(|&(_, &r)| r == device)
            .fold(seen, |seen, (bit, _)| seen | (1 << bit))
    }

    fn all_seen(&self) -> u8 {
        ((1u16 << self.required.len()) - 1) as u8
    }

    /// Dense state id: the device in the high bits, the `seen` flags below.
    fn state(&self, device: usize, seen: u8) -> usize {
        (device << self.required.len()) | usize::from(seen)
    }

    fn split(&self, state: usize) -> (usize, u8) {
        let bits = self.required.len();
        (state >> bits, (state & ((1 << bits) - 1)) as u8)
    }
}

impl DpProblem for PathCount<'_> {
    type Index = usize;
    /// `None` once the count no longer fits in a `u64`.
    type Value = Option<u64>;

    fn deps(&self, &state: &usize) -> Vec<usize> {
        let (device, seen) = self.split(state);
        if device == self.target {
            return vec![];
        }
        self.outputs[device]
            .iter()
            .map(|&next| self.state(next, self.seen_after(next, seen)))
            .collect()
    }

    fn compute(&self, &state: &usize, deps: Vec<Option<u64>>) -> Option<u64> {
        let (device, seen) = self.split(state);
        if device == self.target {
            Some(u64::from(seen == self.all_seen()))
        } else {
            deps.into_iter().try_fold(0u64, |total, paths| total.checked_add(paths?))
        }
    }
}

/// Number of distinct paths from `start` to `out` passing through every
/// device in `via`. Unknown `via` devices make the count zero.
pub fn count_paths(devices: &Devices, start: &str, via: &[&str]) -> Result<u64, SolveError> {
    let start = devices
        .id(start)
        .ok_or_else(|| SolveError::failed(format!("no device named {start:?}")))?;
    let Some(target) = devices.id(OUT) else {
        return Ok(0);
    };
    if via.len() > u8::BITS as usize {
        return Err(SolveError::failed("at most 8 waypoints are supported"));
    }
    let mut required = Vec::with_capacity(via.len());
    for name in via {
        match devices.id(name) {
            Some(id) => required.push(id),
            None => return Ok(0),
        }
    }

    let problem = PathCount {
        outputs: &devices.outputs,
        required,
        target,
    };
    let initial = problem.state(start, problem.seen_after(start, 0));
    let cache = DpCache::new(VecBackend::new(), problem);
    let paths = cache
        .get(&initial)
        .map_err(|cycle| SolveError::failed(format!("device graph is not acyclic: {cycle}")))?
        .ok_or_else(|| SolveError::failed("path count does not fit in 64 bits"))?;
    tracing::debug!(states = cache.cached_len(), paths, "counted device paths");
    Ok(paths)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_paths(shared, "you", &[]).map(|paths| paths.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_paths(shared, "svr", &["dac", "fft"]).map(|paths| paths.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const EXAMPLE: &str = include_str!("../../../../inputs/2025/day11_example.txt");
    const EXAMPLE_PART2: &str = include_str!("../../../../inputs/2025/day11_example_part2.txt");

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part_checked_range(&mut shared, part)
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1).unwrap(), "5");
        assert_eq!(solve(EXAMPLE_PART2, 2).unwrap(), "2");
    }

    #[test]
    fn test_part2_example_without_waypoints() {
        let devices = Solver::parse(EXAMPLE_PART2).unwrap();
        assert_eq!(count_paths(&devices, "svr", &[]).unwrap(), 8);
        assert_eq!(count_paths(&devices, "svr", &["fft"]).unwrap(), 4);
    }

    #[test]
    fn test_missing_start_fails() {
        assert!(matches!(solve(EXAMPLE, 2), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_unknown_waypoint_or_exit_counts_zero() {
        let devices = Solver::parse("you: a\na: b\n").unwrap();
        assert_eq!(count_paths(&devices, "you", &[]).unwrap(), 0);
        let devices = Solver::parse("you: out\n").unwrap();
        assert_eq!(count_paths(&devices, "you", &["dac"]).unwrap(), 0);
    }

    #[test]
    fn test_path_count_overflow_fails() {
        // 65 diamonds in a row give 2^65 paths.
        let mut input = String::new();
        let mut from = "you".to_string();
        for i in 0..65 {
            let join = format!("j{i}");
            input.push_str(&format!("{from}: a{i} b{i}\na{i}: {join}\nb{i}: {join}\n"));
            from = join;
        }
        input.push_str(&format!("{from}: out\n"));
        assert!(matches!(solve(&input, 1), Err(SolveError::SolveFailed(_))));

        let devices = Solver::parse("you: a b\na: out\nb: out\n").unwrap();
        assert_eq!(count_paths(&devices, "you", &[]).unwrap(), 2);
    }

    #[test]
    fn test_cycle_is_reported() {
        assert!(matches!(solve("you: a\na: you out\n", 1), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(matches!(Solver::parse("you out"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("you: a\nyou: b"), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
    }
}
