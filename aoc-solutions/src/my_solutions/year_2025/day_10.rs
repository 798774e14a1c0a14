use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::parse_lines;

/// Upper bound on buttons per machine; every subset of them is enumerated.
const MAX_BUTTONS: usize = 20;
const MAX_LIGHTS: usize = 32;

const MACHINE_PATTERN: &str = r"^\[([.#]+)\]((?:\s*\([0-9,\s]*\))*)\s*\{([0-9,\s]+)\}$";
const BUTTON_PATTERN: &str = r"\(([0-9,\s]*)\)";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["bitmask", "dp"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on.
    lights: u32,
    /// Indices of the lights (and counters) each button toggles.
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u16>,
}

impl Machine {
    fn button_masks(&self) -> Vec<u32> {
        self.buttons
            .iter()
            .map(|wires| wires.iter().fold(0u32, |mask, &i| mask | (1 << i)))
            .collect()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let machine_re = Regex::new(MACHINE_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;
        let button_re = Regex::new(BUTTON_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;

        parse_lines(input, |line| parse_machine(line.trim(), &machine_re, &button_re))
    }
}

fn parse_machine(line: &str, machine_re: &Regex, button_re: &Regex) -> anyhow::Result<Machine> {
    let caps = machine_re
        .captures(line)
        .with_context(|| format!("expected '[lights] (buttons)... {{joltage}}', found {line:?}"))?;

    let diagram = &caps[1];
    if diagram.len() > MAX_LIGHTS {
        bail!("{} lights exceed the supported {}", diagram.len(), MAX_LIGHTS);
    }
    let lights = diagram
        .bytes()
        .enumerate()
        .filter(|&(_, b)| b == b'#')
        .fold(0u32, |mask, (i, _)| mask | (1 << i));

    let buttons = button_re
        .captures_iter(&caps[2])
        .map(|button| {
            let wires = parse_list::<usize>(&button[1])?;
            if let Some(&wire) = wires.iter().find(|&&w| w >= diagram.len()) {
                bail!("button wires light {wire} but there are only {}", diagram.len());
            }
            Ok(wires)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if buttons.len() > MAX_BUTTONS {
        bail!("{} buttons exceed the supported {}", buttons.len(), MAX_BUTTONS);
    }

    let joltage = parse_list::<u16>(&caps[3])?;
    if joltage.len() != diagram.len() {
        bail!("{} joltage targets for {} lights", joltage.len(), diagram.len());
    }

    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

fn parse_list<T: std::str::FromStr>(text: &str) -> anyhow::Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<T>().map_err(|e| anyhow!("invalid number {item:?}: {e}")))
        .collect()
}

/// Fewest presses whose toggles XOR to the light pattern.
///
/// Pressing a button twice cancels out, so only subsets matter.
pub fn fewest_presses_for_lights(machine: &Machine) -> Option<u32> {
    let masks = machine.button_masks();
    (0u32..1 << masks.len())
        .filter(|&subset| {
            masks
                .iter()
                .enumerate()
                .filter(|&(i, _)| subset & (1 << i) != 0)
                .fold(0, |acc, (_, mask)| acc ^ mask)
                == machine.lights
        })
        .map(u32::count_ones)
        .min()
}

/// Joltage counters as a DP over halved targets.
///
/// Any solution presses each button some number of times. The buttons
/// pressed an odd number of times form a subset whose effect has the same
/// parity as the target; removing one press of each leaves an even remainder
/// that is twice a solution for half the target. So
/// `cost(t) = min |S| + 2 * cost((t - effect(S)) / 2)` over subsets `S` with
/// matching parity and `effect(S) <= t`.
struct JoltageProblem {
    /// Subset effects keyed by the parity mask of the effect.
    by_parity: HashMap<u32, Vec<(u32, Vec<u16>)>>,
}

impl JoltageProblem {
    fn new(machine: &Machine) -> Self {
        let counters = machine.joltage.len();
        let mut by_parity: HashMap<u32, Vec<(u32, Vec<u16>)>> = HashMap::new();
        for subset in 0u32..1 << machine.buttons.len() {
            let mut effect = vec![0u16; counters];
            for (i, wires) in machine.buttons.iter().enumerate() {
                if subset & (1 << i) != 0 {
                    for &wire in wires {
                        effect[wire] += 1;
                    }
                }
            }
            by_parity
                .entry(parity(&effect))
                .or_default()
                .push((subset.count_ones(), effect));
        }
        Self { by_parity }
    }

    /// `(presses, halved remainder)` for every usable subset, in a fixed order.
    fn reductions(&self, target: &[u16]) -> Vec<(u32, Vec<u16>)> {
        self.by_parity
            .get(&parity(target))
            .into_iter()
            .flatten()
            .filter(|(_, effect)| effect.iter().zip(target).all(|(e, t)| e <= t))
            .map(|(presses, effect)| {
                let halved = target.iter().zip(effect).map(|(t, e)| (t - e) / 2).collect();
                (*presses, halved)
            })
            .collect()
    }
}

fn parity(values: &[u16]) -> u32 {
    values
        .iter()
        .enumerate()
        .fold(0, |mask, (i, v)| mask | (u32::from(v % 2) << i))
}

impl DpProblem for JoltageProblem {
    type Index = Vec<u16>;
    type Value = Option<u64>;

    fn deps(&self, target: &Vec<u16>) -> Vec<Vec<u16>> {
        if target.iter().all(|&t| t == 0) {
            return vec![];
        }
        self.reductions(target).into_iter().map(|(_, halved)| halved).collect()
    }

    fn compute(&self, target: &Vec<u16>, deps: Vec<Option<u64>>) -> Option<u64> {
        if target.iter().all(|&t| t == 0) {
            return Some(0);
        }
        self.reductions(target)
            .into_iter()
            .zip(deps)
            .filter_map(|((presses, _), rest)| rest.map(|rest| u64::from(presses) + 2 * rest))
            .min()
    }
}

/// Fewest presses that raise every counter exactly to its joltage target.
pub fn fewest_presses_for_joltage(machine: &Machine) -> Option<u64> {
    let cache = DpCache::new(HashMapBackend::new(), JoltageProblem::new(machine));
    // Every reduction halves a nonzero target, so states never repeat on a chain.
    let presses = cache.get(&machine.joltage).unwrap_or_else(|cycle| {
        tracing::error!(%cycle, "joltage recursion revisited a state");
        None
    });
    tracing::trace!(states = cache.cached_len(), ?presses, "joltage search finished");
    presses
}

fn total<T: Into<u64>>(
    machines: &[Machine],
    fewest: impl Fn(&Machine) -> Option<T>,
) -> Result<String, SolveError> {
    machines
        .iter()
        .enumerate()
        .map(|(idx, machine)| {
            fewest(machine)
                .map(Into::into)
                .ok_or_else(|| SolveError::failed(format!("machine {} cannot be configured", idx + 1)))
        })
        .sum::<Result<u64, _>>()
        .map(|sum| sum.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, fewest_presses_for_lights)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, fewest_presses_for_joltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;
    use proptest::prelude::*;

    const EXAMPLE: &str = include_str!("../../../../inputs/2025/day10_example.txt");

    fn solve(input: &str, part: u8) -> Result<String, SolveError> {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part_checked_range(&mut shared, part)
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1).unwrap(), "7");
        assert_eq!(solve(EXAMPLE, 2).unwrap(), "33");
    }

    #[test]
    fn test_example_machines_individually() {
        let machines = Solver::parse(EXAMPLE).unwrap();
        let lights: Vec<_> = machines.iter().map(fewest_presses_for_lights).collect();
        let joltage: Vec<_> = machines.iter().map(fewest_presses_for_joltage).collect();
        assert_eq!(lights, vec![Some(2), Some(3), Some(2)]);
        assert_eq!(joltage, vec![Some(10), Some(12), Some(11)]);
    }

    #[test]
    fn test_parse_machine_fields() {
        let machines = Solver::parse("[.##.] (3) (1,3) {3,5,4,7}").unwrap();
        assert_eq!(
            machines[0],
            Machine {
                lights: 0b0110,
                buttons: vec![vec![3], vec![1, 3]],
                joltage: vec![3, 5, 4, 7],
            }
        );
    }

    #[test]
    fn test_unreachable_targets_fail() {
        assert!(matches!(solve("[#.] (1) {0,1}", 1), Err(SolveError::SolveFailed(_))));
        assert!(matches!(solve("[.#] (0,1) {1,2}", 2), Err(SolveError::SolveFailed(_))));
    }

    #[test]
    fn test_rejects_malformed_machines() {
        assert!(matches!(Solver::parse("[.#] (2) {1,1}"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("[.#] (0) {1}"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("[.#] (0) {1,1}\n.# (0) {1,1}"), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
    }

    proptest! {
        #[test]
        fn prop_joltage_matches_presses_that_built_it(
            buttons in prop::collection::vec(prop::collection::btree_set(0usize..4, 1..4), 1..5),
            presses in prop::collection::vec(0u16..6, 5),
        ) {
            let buttons: Vec<Vec<usize>> = buttons.into_iter().map(|set| set.into_iter().collect()).collect();
            let mut joltage = vec![0u16; 4];
            for (wires, &count) in buttons.iter().zip(&presses) {
                for &w in wires {
                    joltage[w] += count;
                }
            }
            let machine = Machine { lights: 0, buttons, joltage };
            let used: u64 = presses.iter().take(machine.buttons.len()).map(|&p| u64::from(p)).sum();

            let best = fewest_presses_for_joltage(&machine);
            prop_assert!(best.is_some());
            prop_assert!(best.unwrap_or(u64::MAX) <= used);
        }
    }
}
