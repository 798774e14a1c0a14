use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::content_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["parsing", "columns"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, numbers: &[u64]) -> Option<u64> {
        match self {
            Op::Add => numbers.iter().try_fold(0u64, |acc, &n| acc.checked_add(n)),
            Op::Mul => numbers.iter().try_fold(1u64, |acc, &n| acc.checked_mul(n)),
        }
    }
}

/// One worksheet problem read both ways.
#[derive(Debug)]
pub struct Problem {
    op: Op,
    /// Each number row read left to right.
    row_numbers: Vec<u64>,
    /// Each character column read top to bottom.
    column_numbers: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines = content_lines(input);
        if lines.is_empty() {
            return Err(ParseError::MissingData("worksheet is empty".into()));
        }
        if lines.len() < 2 {
            return Err(ParseError::MissingData("worksheet has no number rows".into()));
        }

        // Rows are padded so trimmed trailing spaces read as blank cells.
        let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let rows: Vec<Vec<u8>> = lines
            .iter()
            .map(|line| {
                let mut row = line.as_bytes().to_vec();
                row.resize(width, b' ');
                row
            })
            .collect();
        let (op_row, number_rows) = rows
            .split_last()
            .ok_or_else(|| ParseError::MissingData("worksheet is empty".into()))?;
        let op_line_no = lines.len();

        column_blocks(&rows)
            .into_iter()
            .map(|(start, end)| {
                let op = parse_op(&op_row[start..end])
                    .map_err(|e| anyhow!("(line {}) (column {}) {}", op_line_no, start + 1, e))?;
                let row_numbers = number_rows
                    .iter()
                    .enumerate()
                    .map(|(idx, row)| {
                        parse_row_number(&row[start..end])
                            .map_err(|e| anyhow!("(line {}) (column {}) {}", idx + 1, start + 1, e))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                let column_numbers = (start..end)
                    .filter_map(|col| column_number(number_rows, col).transpose())
                    .collect::<anyhow::Result<Vec<_>>>()
                    .map_err(|e| anyhow!("(column {}) {}", start + 1, e))?;
                Ok(Problem {
                    op,
                    row_numbers,
                    column_numbers,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Half-open column ranges separated by columns that are blank in every row.
fn column_blocks(rows: &[Vec<u8>]) -> Vec<(usize, usize)> {
    let width = rows.first().map_or(0, Vec::len);
    let blank = |col: usize| rows.iter().all(|row| row[col] == b' ');

    let mut blocks = Vec::new();
    let mut start = None;
    for col in 0..width {
        match (blank(col), start) {
            (false, None) => start = Some(col),
            (true, Some(s)) => {
                blocks.push((s, col));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        blocks.push((s, width));
    }
    blocks
}

fn parse_op(cells: &[u8]) -> anyhow::Result<Op> {
    let mut symbols = cells.iter().filter(|&&b| b != b' ');
    let op = match symbols.next() {
        Some(b'+') => Op::Add,
        Some(b'*') => Op::Mul,
        Some(&other) => bail!("unexpected operator {:?}", other as char),
        None => bail!("problem has no operator"),
    };
    if symbols.next().is_some() {
        bail!("problem has more than one operator");
    }
    Ok(op)
}

fn parse_row_number(cells: &[u8]) -> anyhow::Result<u64> {
    let text = std::str::from_utf8(cells)?.trim();
    text.parse::<u64>()
        .with_context(|| format!("invalid number {text:?}"))
}

/// Digits of column `col` read top to bottom, or `None` for an all-blank column.
fn column_number(rows: &[Vec<u8>], col: usize) -> anyhow::Result<Option<u64>> {
    let mut value: Option<u64> = None;
    for row in rows {
        match row[col] {
            b' ' => {}
            digit @ b'0'..=b'9' => {
                let acc = value.unwrap_or(0);
                value = Some(
                    acc.checked_mul(10)
                        .and_then(|v| v.checked_add(u64::from(digit - b'0')))
                        .context("column number overflows")?,
                );
            }
            other => bail!("unexpected character {:?}", other as char),
        }
    }
    Ok(value)
}

fn grand_total(problems: &[Problem], numbers: impl Fn(&Problem) -> &[u64]) -> Result<String, SolveError> {
    problems
        .iter()
        .enumerate()
        .map(|(idx, problem)| {
            problem
                .op
                .apply(numbers(problem))
                .ok_or_else(|| SolveError::failed(format!("problem {} overflows", idx + 1)))
        })
        .try_fold(0u128, |acc, value| value.map(|v| acc + u128::from(v)))
        .map(|total| total.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grand_total(shared, |problem| problem.row_numbers.as_slice())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        grand_total(shared, |problem| problem.column_numbers.as_slice())
    }
}
