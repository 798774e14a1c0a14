//! Puzzle input lookup on the local filesystem

use crate::error::CliError;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based input store
///
/// Directory structure: `{inputs_dir}/{year}/day{day:02}.txt`, with examples
/// beside them as `day{day:02}_example.txt` or, when a part has its own
/// example, `day{day:02}_example_part{part}.txt`.
pub struct InputLocator {
    inputs_dir: PathBuf,
    example: bool,
}

impl InputLocator {
    pub fn new(inputs_dir: PathBuf, example: bool) -> Self {
        Self {
            inputs_dir,
            example,
        }
    }

    fn year_dir(&self, year: u16) -> PathBuf {
        self.inputs_dir.join(year.to_string())
    }

    /// Path of the real input for a year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.year_dir(year).join(format!("day{:02}.txt", day))
    }

    /// Path of the example input for a year/day/part, preferring the part-specific file
    pub fn example_path(&self, year: u16, day: u8, part: u8) -> PathBuf {
        let dir = self.year_dir(year);
        let part_specific = dir.join(format!("day{:02}_example_part{}.txt", day, part));
        if part_specific.is_file() {
            part_specific
        } else {
            dir.join(format!("day{:02}_example.txt", day))
        }
    }

    /// Path to read for a year/day/part, whether or not it exists
    pub fn path_for(&self, year: u16, day: u8, part: u8) -> PathBuf {
        if self.example {
            self.example_path(year, day, part)
        } else {
            self.input_path(year, day)
        }
    }

    /// Existing input file for a year/day/part
    pub fn locate(&self, year: u16, day: u8, part: u8) -> Result<PathBuf, CliError> {
        let path = self.path_for(year, day, part);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CliError::InputNotFound(path))
        }
    }

    /// Read an input file located with [`InputLocator::locate`]
    pub fn read(path: &Path) -> Result<String, CliError> {
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "read input");
        Ok(content)
    }
}
