use std::collections::VecDeque;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["geometry", "compression"])]
pub struct Solver;

pub type Tile = (u32, u32);

impl AocParser for Solver {
    /// Red tiles in polygon order.
    type SharedData<'a> = Vec<Tile>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (x, y) = line
                .split_once(',')
                .with_context(|| format!("expected 'x,y', found {line:?}"))?;
            let x = x.trim().parse::<u32>().with_context(|| format!("invalid x {x:?}"))?;
            let y = y.trim().parse::<u32>().with_context(|| format!("invalid y {y:?}"))?;
            Ok((x, y))
        })
    }
}

fn area(a: Tile, b: Tile) -> u128 {
    (u128::from(a.0.abs_diff(b.0)) + 1) * (u128::from(a.1.abs_diff(b.1)) + 1)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::failed("need at least two red tiles"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = CompressedFloor::new(shared).map_err(SolveError::failed)?;
        shared
            .iter()
            .tuple_combinations()
            .filter(|&(&a, &b)| floor.contains_rectangle(a, b))
            .map(|(&a, &b)| area(a, b))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::failed("need at least two red tiles"))
    }
}

/// The red/green polygon on a compressed grid.
///
/// Each distinct coordinate gets its own column (row). A gap between two
/// coordinates that are not adjacent gets one more, so a cell is either
/// entirely inside the polygon or entirely outside. A border of outside
/// cells surrounds the lot.
struct CompressedFloor {
    xs: Axis,
    ys: Axis,
    /// `outside_prefix[r][c]` counts outside cells in rows `< r`, columns `< c`.
    outside_prefix: Vec<Vec<u64>>,
}

impl CompressedFloor {
    fn new(tiles: &[Tile]) -> anyhow::Result<Self> {
        if tiles.len() < 2 {
            bail!("need at least two red tiles");
        }
        let xs = Axis::new(tiles.iter().map(|t| t.0));
        let ys = Axis::new(tiles.iter().map(|t| t.1));
        let (width, height) = (xs.len, ys.len);

        let mut boundary = vec![vec![false; width]; height];
        for (idx, (&a, &b)) in tiles.iter().circular_tuple_windows().enumerate() {
            if a.0 != b.0 && a.1 != b.1 {
                bail!(
                    "red tiles {} and {} are not in the same row or column",
                    idx + 1,
                    (idx + 1) % tiles.len() + 1
                );
            }
            let (ca, ra) = (xs.index(a.0), ys.index(a.1));
            let (cb, rb) = (xs.index(b.0), ys.index(b.1));
            for row in boundary.iter_mut().take(ra.max(rb) + 1).skip(ra.min(rb)) {
                for cell in row.iter_mut().take(ca.max(cb) + 1).skip(ca.min(cb)) {
                    *cell = true;
                }
            }
        }

        // Flood the outside from the border corner.
        let mut outside = vec![vec![false; width]; height];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        outside[0][0] = true;
        while let Some((r, c)) = queue.pop_front() {
            let neighbours = [
                r.checked_sub(1).map(|r| (r, c)),
                (r + 1 < height).then_some((r + 1, c)),
                c.checked_sub(1).map(|c| (r, c)),
                (c + 1 < width).then_some((r, c + 1)),
            ];
            for (nr, nc) in neighbours.into_iter().flatten() {
                if !outside[nr][nc] && !boundary[nr][nc] {
                    outside[nr][nc] = true;
                    queue.push_back((nr, nc));
                }
            }
        }

        let mut outside_prefix = vec![vec![0u64; width + 1]; height + 1];
        for r in 0..height {
            for c in 0..width {
                outside_prefix[r + 1][c + 1] = u64::from(outside[r][c]) + outside_prefix[r][c + 1]
                    + outside_prefix[r + 1][c]
                    - outside_prefix[r][c];
            }
        }

        Ok(Self {
            xs,
            ys,
            outside_prefix,
        })
    }

    /// Whether every tile of the rectangle with corners `a` and `b` is red or green.
    fn contains_rectangle(&self, a: Tile, b: Tile) -> bool {
        let (c0, c1) = minmax(self.xs.index(a.0), self.xs.index(b.0));
        let (r0, r1) = minmax(self.ys.index(a.1), self.ys.index(b.1));
        let p = &self.outside_prefix;
        p[r1 + 1][c1 + 1] + p[r0][c0] - p[r0][c1 + 1] - p[r1 + 1][c0] == 0
    }
}

/// One compressed axis. Cell 0 and cell `len - 1` are the outside border.
struct Axis {
    coords: Vec<u32>,
    /// Compressed cell of each entry of `coords`.
    cell: Vec<usize>,
    len: usize,
}

impl Axis {
    fn new(values: impl Iterator<Item = u32>) -> Self {
        let coords: Vec<u32> = values.sorted_unstable().dedup().collect();
        let mut cell = Vec::with_capacity(coords.len());
        let mut next = 1;
        for (idx, &c) in coords.iter().enumerate() {
            if idx > 0 && c - coords[idx - 1] > 1 {
                next += 1;
            }
            cell.push(next);
            next += 1;
        }
        Self {
            coords,
            cell,
            len: next + 1,
        }
    }

    /// Compressed cell of a coordinate known to be on this axis.
    fn index(&self, value: u32) -> usize {
        self.cell[self.coords.partition_point(|&c| c < value)]
    }
}

fn minmax(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}
