//! Line-oriented parsing with line numbers in error messages.

use anyhow::anyhow;
use aoc_solver::ParseError;

/// Parse every non-trailing line of `input` with `parse_line`.
///
/// Trailing blank lines and `\r` line endings are ignored. The first failure
/// becomes a [`ParseError::InvalidFormat`] prefixed with its 1-based line number.
/// Input with no lines at all is [`ParseError::MissingData`].
pub fn parse_lines<'a, T>(
    input: &'a str,
    mut parse_line: impl FnMut(&'a str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    let lines = content_lines(input);
    if lines.is_empty() {
        return Err(ParseError::MissingData("input is empty".into()));
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(line_idx, line)| {
            parse_line(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
        })
        .collect::<anyhow::Result<Vec<T>>>()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

/// Lines of `input` with `\r` stripped and trailing blank lines removed.
///
/// Interior blank lines are kept; several puzzles use them as section breaks.
pub fn content_lines(input: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = input
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}
