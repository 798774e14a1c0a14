//! Rectangular character grids.

use anyhow::{anyhow, bail};
use aoc_solver::ParseError;

use super::parse::content_lines;

/// Row offsets and column offsets of the 8 surrounding cells.
const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from the lines of `input`, mapping each byte with `cell`.
    ///
    /// Every line must have the same width.
    pub fn parse(
        input: &str,
        mut cell: impl FnMut(u8) -> anyhow::Result<T>,
    ) -> Result<Self, ParseError> {
        let lines = content_lines(input);
        let Some(first) = lines.first() else {
            return Err(ParseError::MissingData("grid is empty".into()));
        };
        let width = first.len();
        if width == 0 {
            return Err(ParseError::MissingData("grid has an empty first row".into()));
        }

        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            push_row(line, width, &mut cell, &mut cells)
                .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", row + 1, e)))?;
        }

        Ok(Self {
            width,
            height: lines.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        (row < self.height && col < self.width).then(|| &self.cells[row * self.width + col])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.height && col < self.width {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// All `(row, col)` positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    /// In-bounds positions among the 8 cells around `(row, col)`.
    pub fn neighbours8(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let (width, height) = (self.width, self.height);
        NEIGHBOURS_8.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < height && c < width).then_some((r, c))
        })
    }
}

fn push_row<T>(
    line: &str,
    width: usize,
    cell: &mut impl FnMut(u8) -> anyhow::Result<T>,
    cells: &mut Vec<T>,
) -> anyhow::Result<()> {
    if line.len() != width {
        bail!("expected {} columns, found {}", width, line.len());
    }
    for (col, byte) in line.bytes().enumerate() {
        cells.push(cell(byte).map_err(|e| anyhow!("(column {}) {}", col + 1, e))?);
    }
    Ok(())
}

impl<T: PartialEq> Grid<T> {
    /// First position holding `value`, scanning row by row.
    pub fn find(&self, value: &T) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| cell == value)
            .map(|idx| (idx / self.width, idx % self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(input: &str) -> Grid<u8> {
        Grid::parse(input, Ok).unwrap()
    }

    #[test]
    fn test_parse_dimensions_and_access() {
        let grid = bytes("ab\ncd\nef\n");
        assert_eq!((grid.width(), grid.height()), (2, 3));
        assert_eq!(grid.get(2, 1), Some(&b'f'));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.find(&b'd'), Some((1, 1)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = Grid::parse("abc\nab\n", Ok).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.starts_with("(line 2)")));
    }

    #[test]
    fn test_cell_errors_name_line_and_column() {
        let err = Grid::parse("..\n.x\n", |b| match b {
            b'.' => Ok(false),
            other => bail!("unexpected {:?}", other as char),
        })
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.starts_with("(line 2) (column 2)")));
    }

    #[test]
    fn test_neighbours_are_clipped_at_edges() {
        let grid = bytes("...\n...\n...\n");
        assert_eq!(grid.neighbours8(0, 0).count(), 3);
        assert_eq!(grid.neighbours8(1, 0).count(), 5);
        assert_eq!(grid.neighbours8(1, 1).count(), 8);
        let mut corner: Vec<_> = grid.neighbours8(2, 2).collect();
        corner.sort();
        assert_eq!(corner, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_get_mut_and_positions() {
        let mut grid = bytes("..\n..\n");
        *grid.get_mut(1, 0).unwrap() = b'#';
        let marked: Vec<_> = grid.positions().filter(|&(r, c)| grid.get(r, c) == Some(&b'#')).collect();
        assert_eq!(marked, vec![(1, 0)]);
    }
}
