use std::collections::HashSet;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;

use crate::utils::parse::content_lines;

const SHAPE_HEADER_PATTERN: &str = r"^(\d+):$";
const REGION_PATTERN: &str = r"^(\d+)x(\d+):((?:\s+\d+)*)\s*$";

/// Side of the square every present fits in for the quick acceptance check.
const PRESENT_BOX: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 12, tags = ["packing", "search"])]
pub struct Solver;

/// A present as `(row, col)` cells, normalized to start at `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<(usize, usize)>,
}

impl Shape {
    fn area(&self) -> usize {
        self.cells.len()
    }

    fn bounds(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (rows, cols)
    }

    /// Distinct rotations and reflections, each as offsets from its first
    /// cell in row-major order. Every other offset comes later in that order.
    fn orientations(&self) -> Vec<Vec<(isize, isize)>> {
        let base: Vec<(isize, isize)> = self
            .cells
            .iter()
            .map(|&(r, c)| (r as isize, c as isize))
            .collect();

        let mut seen = Vec::new();
        for flip in [false, true] {
            let mut cells: Vec<_> = base.iter().map(|&(r, c)| if flip { (r, -c) } else { (r, c) }).collect();
            for _ in 0..4 {
                cells = cells.iter().map(|&(r, c)| (c, -r)).collect();
                let mut normalized = cells.clone();
                normalized.sort_unstable();
                let (ar, ac) = normalized[0];
                let offsets: Vec<_> = normalized.iter().map(|&(r, c)| (r - ar, c - ac)).collect();
                if !seen.contains(&offsets) {
                    seen.push(offsets);
                }
            }
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    /// How many of each shape must fit.
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct Farm {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = Farm;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let header_re = Regex::new(SHAPE_HEADER_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;
        let region_re = Regex::new(REGION_PATTERN).map_err(|e| ParseError::Other(e.to_string()))?;

        let lines = content_lines(input);
        if lines.is_empty() {
            return Err(ParseError::MissingData("input is empty".into()));
        }

        let mut shapes: Vec<Shape> = Vec::new();
        let mut regions = Vec::new();
        let mut idx = 0;
        let fail = |line_idx: usize, e: anyhow::Error| {
            ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, e))
        };

        while idx < lines.len() {
            let line = lines[idx].trim();
            if line.is_empty() {
                idx += 1;
            } else if let Some(caps) = header_re.captures(line) {
                if !regions.is_empty() {
                    return Err(fail(idx, anyhow!("shape listed after the regions")));
                }
                let index: usize = caps[1].parse::<usize>().map_err(|e| fail(idx, anyhow!("{e}")))?;
                if index != shapes.len() {
                    return Err(fail(idx, anyhow!("expected shape {}, found {}", shapes.len(), index)));
                }
                let start = idx + 1;
                let mut end = start;
                while end < lines.len() && !lines[end].trim().is_empty() {
                    end += 1;
                }
                shapes.push(parse_shape(&lines[start..end]).map_err(|e| fail(start, e))?);
                idx = end;
            } else if let Some(caps) = region_re.captures(line) {
                regions.push(parse_region(&caps).map_err(|e| fail(idx, e))?);
                idx += 1;
            } else {
                return Err(fail(idx, anyhow!("unexpected line {line:?}")));
            }
        }

        if shapes.is_empty() {
            return Err(ParseError::MissingData("no present shapes".into()));
        }
        if let Some((pos, region)) = regions.iter().find_position(|r| r.counts.len() != shapes.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "(region {}) lists {} counts for {} shapes",
                pos + 1,
                region.counts.len(),
                shapes.len()
            )));
        }

        Ok(Farm { shapes, regions })
    }
}

fn parse_shape(rows: &[&str]) -> anyhow::Result<Shape> {
    let mut cells = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, b) in row.trim().bytes().enumerate() {
            match b {
                b'#' => cells.push((r, c)),
                b'.' => {}
                other => bail!("unexpected shape cell {:?}", other as char),
            }
        }
    }
    if cells.is_empty() {
        bail!("shape has no cells");
    }
    let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    Ok(Shape {
        cells: cells.into_iter().map(|(r, c)| (r - min_r, c - min_c)).collect(),
    })
}

fn parse_region(caps: &regex::Captures<'_>) -> anyhow::Result<Region> {
    let width: usize = caps[1].parse::<usize>().context("invalid region width")?;
    let height: usize = caps[2].parse::<usize>().context("invalid region height")?;
    let counts = caps[3]
        .split_whitespace()
        .map(|count| count.parse::<usize>().with_context(|| format!("invalid present count {count:?}")))
        .collect::<anyhow::Result<Vec<usize>>>()?;
    Ok(Region {
        width,
        height,
        counts,
    })
}

/// Whether all presents listed for `region` fit without overlapping.
pub fn region_fits(shapes: &[Shape], region: &Region) -> bool {
    let cells = region.width * region.height;
    let presents: usize = region.counts.iter().sum();
    let needed: usize = shapes.iter().zip(&region.counts).map(|(s, &n)| s.area() * n).sum();

    if needed > cells {
        return false;
    }
    let boxed = shapes
        .iter()
        .all(|s| s.bounds().0 <= PRESENT_BOX && s.bounds().1 <= PRESENT_BOX);
    if boxed && (region.width / PRESENT_BOX) * (region.height / PRESENT_BOX) >= presents {
        return true;
    }

    tracing::debug!(
        width = region.width,
        height = region.height,
        presents,
        "area checks inconclusive, searching placements"
    );
    Packer::new(shapes, region, cells - needed).search(0)
}

/// Exact packing search.
///
/// Cells are decided in row-major order: the first undecided cell either
/// holds the first cell of some remaining present, or stays empty while
/// spare cells remain. Failed states are remembered by the undecided window
/// of cells a present anchored at the current cell could still reach.
struct Packer {
    width: usize,
    height: usize,
    orientations: Vec<Vec<Vec<(isize, isize)>>>,
    /// Rows one placement may span.
    span: usize,
    filled: Vec<bool>,
    remaining: Vec<usize>,
    presents_left: usize,
    spare: usize,
    failed: HashSet<(usize, Vec<u64>, Vec<usize>, usize)>,
}

impl Packer {
    fn new(shapes: &[Shape], region: &Region, spare: usize) -> Self {
        let orientations: Vec<_> = shapes.iter().map(Shape::orientations).collect();
        let span = orientations
            .iter()
            .flatten()
            .flatten()
            .map(|&(dr, _)| dr as usize + 1)
            .max()
            .unwrap_or(1);
        Self {
            width: region.width,
            height: region.height,
            orientations,
            span,
            filled: vec![false; region.width * region.height],
            remaining: region.counts.clone(),
            presents_left: region.counts.iter().sum(),
            spare,
            failed: HashSet::new(),
        }
    }

    fn placement(&self, shape: usize, orientation: usize, row: usize, col: usize) -> Option<Vec<usize>> {
        self.orientations[shape][orientation]
            .iter()
            .map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr).filter(|&r| r < self.height)?;
                let c = col.checked_add_signed(dc).filter(|&c| c < self.width)?;
                let idx = r * self.width + c;
                (!self.filled[idx]).then_some(idx)
            })
            .collect()
    }

    fn state_key(&self, pos: usize) -> (usize, Vec<u64>, Vec<usize>, usize) {
        let end = (pos + self.span * self.width).min(self.filled.len());
        let window = self.filled[pos..end]
            .chunks(64)
            .map(|chunk| chunk.iter().enumerate().fold(0u64, |acc, (i, &f)| acc | (u64::from(f) << i)))
            .collect();
        (pos, window, self.remaining.clone(), self.spare)
    }

    fn search(&mut self, from: usize) -> bool {
        if self.presents_left == 0 {
            return true;
        }
        let Some(pos) = (from..self.filled.len()).find(|&p| !self.filled[p]) else {
            return false;
        };
        let key = self.state_key(pos);
        if self.failed.contains(&key) {
            return false;
        }

        let (row, col) = (pos / self.width, pos % self.width);
        for shape in 0..self.orientations.len() {
            if self.remaining[shape] == 0 {
                continue;
            }
            for orientation in 0..self.orientations[shape].len() {
                let Some(cells) = self.placement(shape, orientation, row, col) else {
                    continue;
                };
                self.set(&cells, true);
                self.remaining[shape] -= 1;
                self.presents_left -= 1;
                let found = self.search(pos + 1);
                self.presents_left += 1;
                self.remaining[shape] += 1;
                self.set(&cells, false);
                if found {
                    return true;
                }
            }
        }

        if self.spare > 0 {
            self.spare -= 1;
            self.filled[pos] = true;
            let found = self.search(pos + 1);
            self.filled[pos] = false;
            self.spare += 1;
            if found {
                return true;
            }
        }

        self.failed.insert(key);
        false
    }

    fn set(&mut self, cells: &[usize], value: bool) {
        for &idx in cells {
            self.filled[idx] = value;
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .iter()
            .filter(|region| region_fits(&shared.shapes, region))
            .count();
        Ok(fitting.to_string())
    }
}

/// The final day has no second puzzle.
impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverExt;

    const EXAMPLE: &str = include_str!("../../../../inputs/2025/day12_example.txt");

    fn solve(input: &str, part: u8) -> String {
        let mut shared = Solver::parse(input).unwrap();
        Solver::solve_part_checked_range(&mut shared, part).unwrap()
    }

    #[test]
    fn test_example() {
        assert_eq!(solve(EXAMPLE, 1), "2");
        assert_eq!(solve(EXAMPLE, 2), "0");
    }

    #[test]
    fn test_example_regions_individually() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let fits: Vec<_> = farm.regions.iter().map(|r| region_fits(&farm.shapes, r)).collect();
        assert_eq!(fits, vec![true, true, false]);
    }

    #[test]
    fn test_orientations_deduplicate_symmetric_shapes() {
        let square = parse_shape(&["##", "##"]).unwrap();
        assert_eq!(square.orientations().len(), 1);
        let bar = parse_shape(&["###"]).unwrap();
        assert_eq!(bar.orientations().len(), 2);
        let ell = parse_shape(&["#.", "#.", "##"]).unwrap();
        assert_eq!(ell.orientations().len(), 8);
    }

    #[test]
    fn test_search_handles_tight_fit() {
        // Two L trominoes tile a 2x3 rectangle exactly; three bars do not fit in 2x4.
        let input = "0:\n##\n#.\n\n1:\n###\n\n3x2: 2 0\n4x2: 0 3\n";
        let farm = Solver::parse(input).unwrap();
        assert!(region_fits(&farm.shapes, &farm.regions[0]));
        assert!(!region_fits(&farm.shapes, &farm.regions[1]));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(Solver::parse("1:\n#\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("0:\n#x\n"), Err(ParseError::InvalidFormat(msg)) if msg.starts_with("(line 2)")));
        assert!(matches!(Solver::parse("0:\n#\n\n2x2: 1 1\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("4x4: 1\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("0:\n#\n\nbanana\n"), Err(ParseError::InvalidFormat(_))));
    }
}
