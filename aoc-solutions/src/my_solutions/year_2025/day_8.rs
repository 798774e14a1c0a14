use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

/// Closest pairs joined before part 1 measures the circuits.
pub const PAIRS_TO_CONNECT: usize = 1000;

/// Largest accepted coordinate magnitude; squared distances then fit in `u128`.
pub const MAX_COORDINATE: u64 = 1 << 40;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["union-find", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    x: i64,
    y: i64,
    z: i64,
}

impl Point {
    fn distance_squared(&self, other: &Point) -> u128 {
        let dx = u128::from(self.x.abs_diff(other.x));
        let dy = u128::from(self.y.abs_diff(other.y));
        let dz = u128::from(self.z.abs_diff(other.z));
        dx * dx + dy * dy + dz * dz
    }
}

#[derive(Debug)]
pub struct SharedData {
    points: Vec<Point>,
    /// `(distance², i, j)` for every pair `i < j`, nearest first.
    sorted_pairs: Option<Vec<(u128, usize, usize)>>,
}

impl SharedData {
    fn sorted_pairs(&mut self) -> &[(u128, usize, usize)] {
        let points = &self.points;
        self.sorted_pairs.get_or_insert_with(|| {
            let mut pairs: Vec<_> = points
                .iter()
                .enumerate()
                .tuple_combinations()
                .map(|((i, a), (j, b))| (a.distance_squared(b), i, j))
                .collect();
            pairs.sort_unstable();
            tracing::debug!(pairs = pairs.len(), "sorted junction box pairs");
            pairs
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let points = parse_lines(input, |line| {
            let coords: Vec<i64> = line
                .split(',')
                .map(|part| parse_coordinate(part.trim()))
                .collect::<anyhow::Result<_>>()?;
            match coords[..] {
                [x, y, z] => Ok(Point { x, y, z }),
                _ => bail!("expected 'x,y,z', found {line:?}"),
            }
        })?;

        Ok(SharedData {
            points,
            sorted_pairs: None,
        })
    }
}

fn parse_coordinate(raw: &str) -> anyhow::Result<i64> {
    let value = raw
        .parse::<i64>()
        .with_context(|| format!("invalid coordinate {raw:?}"))?;
    if value.unsigned_abs() > MAX_COORDINATE {
        bail!("coordinate {value} is outside ±{MAX_COORDINATE}");
    }
    Ok(value)
}

/// Union-find over junction boxes, tracking circuit sizes.
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            count: n,
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Join the circuits of `a` and `b`; `false` if they were already one.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.count -= 1;
        true
    }

    fn sizes(&mut self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.parent.len())
            .filter(|&node| self.find(node) == node)
            .collect();
        roots.into_iter().map(|root| self.size[root]).collect()
    }
}

/// Product of the three largest circuit sizes after joining the
/// `connections` closest pairs (pairs already in one circuit still count).
pub fn largest_circuits_product(shared: &mut SharedData, connections: usize) -> u64 {
    let mut circuits = Circuits::new(shared.points.len());
    for &(_, i, j) in shared.sorted_pairs().iter().take(connections) {
        circuits.union(i, j);
    }

    circuits
        .sizes()
        .into_iter()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(3)
        .map(|size| size as u64)
        .product()
}

/// Product of the X coordinates of the pair whose connection leaves a
/// single circuit.
pub fn last_connection_product(shared: &mut SharedData) -> Option<i128> {
    let mut circuits = Circuits::new(shared.points.len());
    let points = shared.points.clone();
    shared
        .sorted_pairs()
        .iter()
        .find(|&&(_, i, j)| circuits.union(i, j) && circuits.count == 1)
        .map(|&(_, i, j)| i128::from(points[i].x) * i128::from(points[j].x))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_circuits_product(shared, PAIRS_TO_CONNECT).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        last_connection_product(shared)
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed("need at least two junction boxes to connect"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const EXAMPLE: &str = include_str!("../../../../inputs/2025/day08_example.txt");

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(largest_circuits_product(&mut shared, 10), 40);
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 2).unwrap(), "25272");
    }

    #[test]
    fn test_part1_with_all_pairs_joins_everything() {
        // 190 pairs exist; 1000 connections merge all 20 boxes into one circuit.
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part_checked_range(&mut shared, 1).unwrap(), "20");
    }

    #[test]
    fn test_redundant_pairs_still_use_a_connection() {
        // A triangle plus a far point: the third closest pair is already connected.
        let mut shared = Solver::parse("0,0,0\n1,0,0\n0,1,0\n100,0,0").unwrap();
        assert_eq!(largest_circuits_product(&mut shared, 3), 3);
        assert_eq!(last_connection_product(&mut shared), Some(100));
    }

    #[test]
    fn test_single_box_has_no_last_connection() {
        let mut shared = Solver::parse("1,2,3").unwrap();
        assert!(matches!(
            Solver::solve_part_checked_range(&mut shared, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_far_apart_boxes_do_not_overflow() {
        let far = MAX_COORDINATE as i64;
        let input = format!("{far},{far},{far}\n{far},-{far},-{far}");
        let mut shared = Solver::parse(&input).unwrap();
        assert_eq!(largest_circuits_product(&mut shared, 1), 2);
        // 2^40 * 2^40
        assert_eq!(
            Solver::solve_part_checked_range(&mut shared, 2).unwrap(),
            "1208925819614629174706176"
        );
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let too_far = MAX_COORDINATE + 1;
        let input = format!("0,0,0\n{too_far},0,0");
        assert!(matches!(Solver::parse(&input), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
    }

    #[test]
    fn test_rejects_bad_points() {
        assert!(matches!(Solver::parse("1,2"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1,2,3\n1,b,3"), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
    }
}
