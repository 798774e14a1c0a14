//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Day argument is not exactly two ASCII digits
    #[error("Invalid day {0:?}: expected two digits such as 01")]
    InvalidDay(String),

    /// Day argument is well formed but outside 1..=25
    #[error("Day {0} is out of range: expected 01 to 25")]
    DayOutOfRange(u8),

    /// Input file for the requested day does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<aoc_solver::SolveError> for CliError {
    fn from(e: aoc_solver::SolveError) -> Self {
        CliError::Solver(e.into())
    }
}
